//! Durable ad account record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::platform::Platform;

/// A connected advertising account as the account store persists it.
///
/// `access_token` and `refresh_token` hold *ciphertext*; the sync engine
/// decrypts through the token cipher collaborator immediately before an
/// adapter call and never writes plaintext back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdAccount {
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Which adapter/client pair handles this account. Immutable.
    pub platform: Platform,
    /// Platform-side account identifier.
    pub external_account_id: String,
    pub name: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// IANA timezone name.
    pub timezone: String,
    /// Encrypted platform credential.
    pub access_token: String,
    /// Encrypted refresh token, absent for platforms without refresh
    /// semantics and for api-key platforms.
    pub refresh_token: Option<String>,
    pub token_expires_at: Option<DateTime<Utc>>,
    /// Whether bulk sync should include this account.
    pub is_active: bool,
}
