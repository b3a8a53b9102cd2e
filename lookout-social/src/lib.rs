//! Social network clients used by Lookout.
//!
//! - [`twitter`]: Twitter/X API v2, OAuth 1.0a user context
//! - [`instagram`]: public Instagram profile lookup, no credentials
pub mod instagram;
pub mod twitter;
