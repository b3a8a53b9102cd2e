use super::types::{WebHit, WebSearchApiResponse, WebSearchRequest};
use anyhow::Result;
use lookout_http::{Auth, HttpClient, RequestOpts};
use std::time::Instant;

const BRAVE_API_BASE: &str = "https://api.search.brave.com/";
const BRAVE_PAGE_SIZE: u32 = 20;
const BRAVE_MAX_PAGE: u32 = 9;

/// Minimal client for Brave Search API (web vertical).
#[derive(Clone)]
pub struct BraveApi {
    http: HttpClient,
    token: String,
}

impl BraveApi {
    pub fn new(subscription_token: String) -> Result<Self> {
        Self::with_base_url(BRAVE_API_BASE, subscription_token)
    }

    pub fn with_base_url(base: &str, subscription_token: String) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(base)?,
            token: subscription_token,
        })
    }

    /// Up to `max_results` hits in Brave's ranking order.
    ///
    /// Pages in fixed steps of 20 and stops early when Brave reports no more
    /// results or returns an empty page. Results are not deduplicated.
    pub async fn search(&self, query: &str, max_results: usize) -> Result<Vec<WebHit>> {
        let mut hits = Vec::with_capacity(max_results);
        let mut page = 0u32;

        while hits.len() < max_results && page <= BRAVE_MAX_PAGE {
            // `offset` counts pages of `count`, so every page must be full size.
            let req = WebSearchRequest {
                query: query.to_string(),
                count: BRAVE_PAGE_SIZE,
                offset: page,
                result_filter: "web",
            };

            let started = Instant::now();
            let resp = self.search_page(&req).await?;
            let more = resp
                .query
                .as_ref()
                .and_then(|q| q.more_results_available)
                .unwrap_or(false);
            let results = resp.web.map(|w| w.results).unwrap_or_default();

            tracing::debug!(
                target: "web.brave",
                page,
                hit_count = results.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "brave.search.page"
            );

            if results.is_empty() {
                break;
            }
            hits.extend(results.into_iter().map(WebHit::from));
            if !more {
                break;
            }
            page += 1;
        }

        hits.truncate(max_results);
        Ok(hits)
    }

    async fn search_page(&self, req: &WebSearchRequest) -> Result<WebSearchApiResponse> {
        let params = req.params();
        let resp: WebSearchApiResponse = self
            .http
            .get_json(
                "res/v1/web/search",
                RequestOpts {
                    auth: Some(Auth::Header {
                        name: "x-subscription-token",
                        value: &self.token,
                    }),
                    query: Some(params.iter().map(|(k, v)| (*k, v.as_str().into())).collect()),
                    ..Default::default()
                },
            )
            .await?;
        Ok(resp)
    }
}
