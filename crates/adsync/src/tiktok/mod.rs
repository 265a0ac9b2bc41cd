//! TikTok for Business integration.
//!
//! OAuth-based with refresh tokens. The API wraps every response in a
//! `{code, message, data}` envelope with HTTP 200, so platform errors
//! and rate limiting are detected from the envelope code.

mod adapter;
mod client;
mod convert;
mod error;
mod types;

pub use adapter::TiktokAdapter;
pub use client::{API_HOST, API_PREFIX, TiktokClient};
pub use convert::map_campaign_status;
pub use error::TiktokError;
