//! Types shared by every Lookout crate.
//!
//! This crate holds the error taxonomy used across the pipeline and the
//! diagnostic logger. It stays small so provider crates can depend on it
//! without pulling in the orchestration layer.
//!
//! # Overview
//!
//! - [`LookoutError`] and [`Result`]: the four failure classes a request can hit
//! - [`observability`]: one-time `tracing` setup writing `<timestamp> - <LEVEL> - <message>` lines
//!
//! # Examples
//!
//! Provider failures display their message verbatim:
//!
//! ```rust
//! use lookout_common::LookoutError;
//!
//! let err = LookoutError::provider("not found");
//! assert_eq!(err.to_string(), "not found");
//! ```

pub mod observability;

/// Failure classes surfaced by the Lookout pipeline.
///
/// None of these terminate the process. Adapters and the persister turn
/// them into data (an envelope `error` field or an artifact status).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookoutError {
    /// Required credentials for a provider category are missing.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A request is missing or has malformed parameters.
    #[error("{0}")]
    Validation(String),

    /// The external provider failed (network, auth, rate limit, not found).
    #[error("{0}")]
    Provider(String),

    /// Writing a result artifact failed.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl LookoutError {
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

/// Convenient alias for results that use [`LookoutError`].
pub type Result<T> = std::result::Result<T, LookoutError>;
