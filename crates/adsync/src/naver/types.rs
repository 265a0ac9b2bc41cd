//! Naver SearchAd API data types and credential parsing.

use serde::Deserialize;

use crate::platform::CredentialFormatError;

/// The api-key credential triple the caller carries as one opaque
/// serialized string.
///
/// The "access token" for Naver is not a token at all: it is a JSON
/// object `{"apiKey", "apiSecret", "customerId"}` that gets parsed back
/// out on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaverCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub customer_id: String,
}

impl NaverCredentials {
    /// Parse the serialized credential string.
    ///
    /// Invalid JSON and missing fields are distinct failures: the first
    /// means the string was never a credential, the second that a
    /// partially configured one was stored.
    pub fn parse(token: &str) -> Result<Self, CredentialFormatError> {
        let value: serde_json::Value = serde_json::from_str(token)
            .map_err(|e| CredentialFormatError::NotParseable(e.to_string()))?;

        let mut missing = Vec::new();
        let mut field = |name: &'static str| -> String {
            match value.get(name).and_then(|v| v.as_str()) {
                Some(s) if !s.is_empty() => s.to_string(),
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let api_key = field("apiKey");
        let api_secret = field("apiSecret");
        let customer_id = field("customerId");

        if !missing.is_empty() {
            return Err(CredentialFormatError::MissingFields(missing.join(", ")));
        }

        Ok(Self {
            api_key,
            api_secret,
            customer_id,
        })
    }
}

/// One campaign from `GET /ncc/campaigns`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaverCampaign {
    pub ncc_campaign_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    /// Manual lock toggled by the user; when set it supersedes the
    /// status string entirely.
    #[serde(default)]
    pub user_lock: bool,
}

/// `GET /stats` response.
#[derive(Debug, Clone, Deserialize)]
pub struct NaverStatResponse {
    #[serde(default)]
    pub data: Vec<NaverStatRow>,
}

/// One daily stat row. Monetary amounts are KRW integers (no decimal
/// subunit) and pass through without conversion.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaverStatRow {
    pub stat_dt: String,
    #[serde(default)]
    pub imp_cnt: i64,
    #[serde(default)]
    pub clk_cnt: i64,
    #[serde(default)]
    pub sales_amt: i64,
    #[serde(default)]
    pub ccnt: i64,
    #[serde(default)]
    pub conv_amt: i64,
}
