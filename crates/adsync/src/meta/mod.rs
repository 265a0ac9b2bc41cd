//! Meta (Facebook/Instagram) advertising integration.
//!
//! OAuth-based, no refresh token. Spend arrives in decimal currency
//! units; conversions and revenue are derived from purchase actions.

mod adapter;
mod client;
mod convert;
mod error;
mod types;

pub use adapter::MetaAdapter;
pub use client::{API_VERSION, DIALOG_HOST, GRAPH_HOST, MetaClient};
pub use convert::map_campaign_status;
pub use error::MetaError;
