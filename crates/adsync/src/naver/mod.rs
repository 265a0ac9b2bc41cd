//! Naver SearchAd integration.
//!
//! The only api-key platform: the credential is a serialized
//! `{apiKey, apiSecret, customerId}` triple and every request carries an
//! HMAC-SHA256 signature over `{timestamp}.{method}.{path}`. Amounts are
//! KRW integers and pass through without unit conversion.

mod adapter;
mod client;
mod convert;
mod error;
mod types;

pub use adapter::NaverAdapter;
pub use client::{API_HOST, NaverClient};
pub use convert::map_campaign_status;
pub use error::NaverError;
pub use types::NaverCredentials;
