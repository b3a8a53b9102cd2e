use crate::{Probe, ProbeOutcome};
use async_trait::async_trait;
use lookout_http::{HttpClient, RequestOpts};
use serde::Deserialize;
use serde_json::json;

const FIREFOX_ACCOUNTS_BASE: &str = "https://api.accounts.firefox.com/";

/// Mozilla accounts status endpoint.
pub struct Firefox {
    http: HttpClient,
}

#[derive(Deserialize)]
struct Status {
    exists: bool,
}

impl Firefox {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_base_url(FIREFOX_ACCOUNTS_BASE)
    }

    pub fn with_base_url(base: &str) -> anyhow::Result<Self> {
        Ok(Self {
            http: HttpClient::new(base)?,
        })
    }
}

#[async_trait]
impl Probe for Firefox {
    fn name(&self) -> &str {
        "firefox"
    }

    async fn check(&self, email: &str) -> anyhow::Result<ProbeOutcome> {
        let status: Status = self
            .http
            .post_json(
                "v1/account/status",
                &json!({ "email": super::normalize(email) }),
                RequestOpts::default(),
            )
            .await?;

        Ok(if status.exists {
            ProbeOutcome::present(self.name(), None)
        } else {
            ProbeOutcome::absent(self.name())
        })
    }
}
