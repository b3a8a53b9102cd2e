//! Twitter/X API integration surface.
//!
//! Submodules provide the HTTP client wrapper and the typed response models.
//! Only user lookup and recent search are used; pagination (`next_token`) is
//! not followed because recent search already returns up to 100 posts per call.
pub mod client;
pub mod types;

pub use client::TwitterApi;
