//! Provider seams used by the adapters.
//!
//! Each trait is the narrow slice of a provider client an adapter needs. The
//! real clients implement them here; tests substitute stubs.
use async_trait::async_trait;
use lookout_common::LookoutError;
use lookout_social::instagram::{types::Profile, InstagramApi};
use lookout_social::twitter::{
    types::{Tweet, User},
    TwitterApi,
};
use lookout_web::brave::{BraveApi, WebHit};

#[async_trait]
pub trait SocialSource: Send + Sync {
    /// `Ok(None)` when the account does not exist.
    async fn user(&self, username: &str) -> Result<Option<User>, LookoutError>;

    async fn recent_posts(&self, query: &str, max_results: u32)
        -> Result<Vec<Tweet>, LookoutError>;
}

#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn profile(&self, username: &str) -> Result<Profile, LookoutError>;
}

#[async_trait]
pub trait SearchSource: Send + Sync {
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<WebHit>, LookoutError>;
}

fn provider(err: anyhow::Error) -> LookoutError {
    LookoutError::provider(err.to_string())
}

#[async_trait]
impl SocialSource for TwitterApi {
    async fn user(&self, username: &str) -> Result<Option<User>, LookoutError> {
        self.user_by_username(username).await.map_err(provider)
    }

    async fn recent_posts(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<Tweet>, LookoutError> {
        self.recent_search(query, max_results).await.map_err(provider)
    }
}

#[async_trait]
impl MediaSource for InstagramApi {
    async fn profile(&self, username: &str) -> Result<Profile, LookoutError> {
        InstagramApi::profile(self, username).await.map_err(provider)
    }
}

#[async_trait]
impl SearchSource for BraveApi {
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<WebHit>, LookoutError> {
        BraveApi::search(self, query, num_results)
            .await
            .map_err(provider)
    }
}
