use crate::{Probe, ProbeOutcome};
use async_trait::async_trait;
use lookout_http::{HttpClient, RequestOpts};
use serde::Deserialize;

const SPOTIFY_BASE: &str = "https://spclient.wg.spotify.com/";

/// Spotify signup validation: status 20 means the address is taken.
pub struct Spotify {
    http: HttpClient,
}

const STATUS_AVAILABLE: i64 = 1;
const STATUS_REGISTERED: i64 = 20;

#[derive(Deserialize)]
struct Validation {
    status: i64,
}

impl Spotify {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_base_url(SPOTIFY_BASE)
    }

    pub fn with_base_url(base: &str) -> anyhow::Result<Self> {
        Ok(Self {
            http: HttpClient::new(base)?,
        })
    }
}

#[async_trait]
impl Probe for Spotify {
    fn name(&self) -> &str {
        "spotify"
    }

    async fn check(&self, email: &str) -> anyhow::Result<ProbeOutcome> {
        let v: Validation = self
            .http
            .get_json(
                "signup/public/v1/account",
                RequestOpts {
                    query: Some(vec![
                        ("validate", "1".into()),
                        ("email", super::normalize(email).into()),
                    ]),
                    ..Default::default()
                },
            )
            .await?;

        match v.status {
            STATUS_REGISTERED => Ok(ProbeOutcome::present(self.name(), None)),
            STATUS_AVAILABLE => Ok(ProbeOutcome::absent(self.name())),
            other => anyhow::bail!("unexpected signup validation status {other}"),
        }
    }
}
