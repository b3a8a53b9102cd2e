//! Thin wrapper around the Twitter/X v2 user lookup and recent search endpoints.
use crate::twitter::types::{SearchResponse, Tweet, User, UserResponse};
use anyhow::Result;
use lookout_http::{Auth, HttpClient, OAuth1Credentials, RequestOpts};

const TWITTER_API_BASE: &str = "https://api.twitter.com/";

#[derive(Clone)]
pub struct TwitterApi {
    http: HttpClient,
    creds: OAuth1Credentials,
}

impl TwitterApi {
    pub fn new(creds: OAuth1Credentials) -> Result<Self> {
        Self::with_base_url(TWITTER_API_BASE, creds)
    }

    pub fn with_base_url(base: &str, creds: OAuth1Credentials) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(base)?,
            creds,
        })
    }

    /// Look up a user by handle. `Ok(None)` when the API reports no such user.
    pub async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        let path = format!("2/users/by/username/{}", urlencoding::encode(username));
        let resp: UserResponse = self
            .http
            .get_json(
                &path,
                RequestOpts {
                    auth: Some(Auth::OAuth1(&self.creds)),
                    query: Some(vec![("user.fields", "description,public_metrics".into())]),
                    ..Default::default()
                },
            )
            .await?;

        if resp.data.is_none() {
            if let Some(problem) = resp.errors.as_ref().and_then(|e| e.first()) {
                tracing::debug!(
                    username,
                    title = ?problem.title,
                    detail = ?problem.detail,
                    "twitter user lookup returned no data"
                );
            }
        }
        Ok(resp.data)
    }

    /// Recent posts matching `query`, at most `max_results` of them.
    ///
    /// The API only accepts page sizes in 10..=100, so the request is clamped
    /// and the response truncated to what the caller asked for.
    pub async fn recent_search(&self, query: &str, max_results: u32) -> Result<Vec<Tweet>> {
        let page_size = max_results.clamp(10, 100);
        let resp: SearchResponse = self
            .http
            .get_json(
                "2/tweets/search/recent",
                RequestOpts {
                    auth: Some(Auth::OAuth1(&self.creds)),
                    query: Some(vec![
                        ("query", query.into()),
                        ("max_results", page_size.to_string().into()),
                        ("tweet.fields", "created_at,public_metrics".into()),
                    ]),
                    ..Default::default()
                },
            )
            .await?;

        tracing::debug!(
            result_count = ?resp.meta.as_ref().and_then(|m| m.result_count),
            "twitter recent search response"
        );

        let mut tweets = resp.data.unwrap_or_default();
        tweets.truncate(max_results as usize);
        Ok(tweets)
    }
}
