pub mod client;
pub mod types;

pub use client::BraveApi;
pub use types::WebHit;
