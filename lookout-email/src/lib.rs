//! Email enumeration: per-platform probes answering "is this address registered here?".
//!
//! Each probe is independent. The caller decides what to do when one fails;
//! the pipeline logs and skips it. [`default_registry`] returns the fixed,
//! ordered set of probes shipped with Lookout.
use async_trait::async_trait;
use serde_json::Value;

pub mod probes;

pub use probes::{Duolingo, Firefox, Gravatar, Spotify};

/// What one probe learned about an address.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub platform: String,
    pub exists: bool,
    /// Platform-specific extras (display name, profile URL, ...).
    pub other: Option<Value>,
}

impl ProbeOutcome {
    pub fn absent(platform: &str) -> Self {
        Self {
            platform: platform.to_string(),
            exists: false,
            other: None,
        }
    }

    pub fn present(platform: &str, other: Option<Value>) -> Self {
        Self {
            platform: platform.to_string(),
            exists: true,
            other,
        }
    }
}

#[async_trait]
pub trait Probe: Send + Sync {
    /// Stable platform name, used in logs and results.
    fn name(&self) -> &str;

    async fn check(&self, email: &str) -> anyhow::Result<ProbeOutcome>;
}

/// The shipped probe set, in the order they run.
pub fn default_registry() -> anyhow::Result<Vec<Box<dyn Probe>>> {
    Ok(vec![
        Box::new(Gravatar::new()?),
        Box::new(Firefox::new()?),
        Box::new(Duolingo::new()?),
        Box::new(Spotify::new()?),
    ])
}
