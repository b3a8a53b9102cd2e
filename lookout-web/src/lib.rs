//! Web discovery for Lookout.
//!
//! - Brave Search API client (`brave`), web vertical only
pub mod brave;
