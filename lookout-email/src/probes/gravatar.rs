use crate::{Probe, ProbeOutcome};
use async_trait::async_trait;
use lookout_http::{HttpClient, RequestOpts, StatusCode};
use serde::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};

const GRAVATAR_BASE: &str = "https://gravatar.com/";

/// Public Gravatar profile keyed by the SHA-256 of the address.
pub struct Gravatar {
    http: HttpClient,
}

#[derive(Deserialize)]
struct ProfileDoc {
    #[serde(default)]
    entry: Vec<Entry>,
}

#[derive(Deserialize)]
struct Entry {
    #[serde(default, rename = "displayName")]
    display_name: Option<String>,
    #[serde(default, rename = "profileUrl")]
    profile_url: Option<String>,
}

impl Gravatar {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_base_url(GRAVATAR_BASE)
    }

    pub fn with_base_url(base: &str) -> anyhow::Result<Self> {
        Ok(Self {
            http: HttpClient::new(base)?,
        })
    }

    fn hash(email: &str) -> String {
        hex::encode(Sha256::digest(super::normalize(email).as_bytes()))
    }
}

#[async_trait]
impl Probe for Gravatar {
    fn name(&self) -> &str {
        "gravatar"
    }

    async fn check(&self, email: &str) -> anyhow::Result<ProbeOutcome> {
        let path = format!("{}.json", Self::hash(email));
        match self
            .http
            .get_json::<ProfileDoc>(&path, RequestOpts::default())
            .await
        {
            Ok(doc) => {
                let other = doc.entry.into_iter().next().map(|e| {
                    json!({
                        "display_name": e.display_name,
                        "profile_url": e.profile_url,
                    })
                });
                Ok(ProbeOutcome::present(self.name(), other))
            }
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {
                Ok(ProbeOutcome::absent(self.name()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
