//! Public Instagram profile lookup through the web app's profile endpoint.
//!
//! No login is performed. Instagram throttles anonymous callers aggressively,
//! so a 401/429 here usually means "try again later" rather than bad input.
use crate::instagram::types::{Profile, WebProfileResponse};
use anyhow::{bail, Result};
use lookout_http::header::{HeaderMap, HeaderValue};
use lookout_http::{HttpClient, RequestOpts, StatusCode};

const INSTAGRAM_API_BASE: &str = "https://i.instagram.com/";
/// App id the instagram.com web client sends; the endpoint rejects requests without it.
const WEB_APP_ID: &str = "936619743392459";

#[derive(Clone)]
pub struct InstagramApi {
    http: HttpClient,
}

impl InstagramApi {
    pub fn new() -> Result<Self> {
        Self::with_base_url(INSTAGRAM_API_BASE)
    }

    pub fn with_base_url(base: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(base)?,
        })
    }

    pub async fn profile(&self, username: &str) -> Result<Profile> {
        let mut headers = HeaderMap::new();
        headers.insert("x-ig-app-id", HeaderValue::from_static(WEB_APP_ID));

        let resp = self
            .http
            .get_json::<WebProfileResponse>(
                "api/v1/users/web_profile_info/",
                RequestOpts {
                    headers: Some(headers),
                    query: Some(vec![("username", username.into())]),
                    ..Default::default()
                },
            )
            .await;

        let resp = match resp {
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {
                bail!("Profile {username} does not exist.")
            }
            other => other?,
        };

        match resp.data.and_then(|d| d.user) {
            Some(user) => Ok(user.into()),
            None => {
                tracing::debug!(username, status = ?resp.status, "instagram profile missing from response");
                bail!("Profile {username} does not exist.")
            }
        }
    }
}
