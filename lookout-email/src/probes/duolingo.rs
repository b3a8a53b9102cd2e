use crate::{Probe, ProbeOutcome};
use async_trait::async_trait;
use lookout_http::{HttpClient, RequestOpts};
use serde::Deserialize;
use serde_json::json;

const DUOLINGO_BASE: &str = "https://www.duolingo.com/";

/// Duolingo user search, which accepts an email filter.
pub struct Duolingo {
    http: HttpClient,
}

#[derive(Deserialize)]
struct Users {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Deserialize)]
struct User {
    #[serde(default)]
    username: Option<String>,
}

impl Duolingo {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_base_url(DUOLINGO_BASE)
    }

    pub fn with_base_url(base: &str) -> anyhow::Result<Self> {
        Ok(Self {
            http: HttpClient::new(base)?,
        })
    }
}

#[async_trait]
impl Probe for Duolingo {
    fn name(&self) -> &str {
        "duolingo"
    }

    async fn check(&self, email: &str) -> anyhow::Result<ProbeOutcome> {
        let found: Users = self
            .http
            .get_json(
                "2017-06-30/users",
                RequestOpts {
                    query: Some(vec![("email", super::normalize(email).into())]),
                    ..Default::default()
                },
            )
            .await?;

        Ok(match found.users.into_iter().next() {
            Some(user) => ProbeOutcome::present(
                self.name(),
                user.username.map(|u| json!({ "username": u })),
            ),
            None => ProbeOutcome::absent(self.name()),
        })
    }
}
