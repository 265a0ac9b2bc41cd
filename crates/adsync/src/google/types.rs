//! Google Ads REST API data types.
//!
//! The REST surface serializes protobuf messages: field names are
//! camelCase, int64 values arrive as strings, doubles as numbers. Every
//! field is optional on the wire, so these structs default aggressively.

use serde::Deserialize;

/// OAuth token endpoint response.
///
/// A refresh grant returns no new refresh token; the old one stays
/// valid.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// `customers:listAccessibleCustomers` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAccessibleCustomersResponse {
    /// Resource names of the form `customers/1234567890`.
    #[serde(default)]
    pub resource_names: Vec<String>,
}

/// `googleAds:search` response page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchRow>,
}

/// One `googleAds:search` result row; populated fields depend on the
/// GAQL select list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRow {
    #[serde(default)]
    pub customer: Option<GoogleCustomer>,
    #[serde(default)]
    pub campaign: Option<GoogleCampaign>,
    #[serde(default)]
    pub metrics: Option<GoogleMetrics>,
    #[serde(default)]
    pub segments: Option<GoogleSegments>,
}

/// Customer attributes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCustomer {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub descriptive_name: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    /// Manager (MCC) accounts aggregate others and are never directly
    /// usable for serving.
    #[serde(default)]
    pub manager: bool,
    #[serde(default)]
    pub status: Option<String>,
}

/// Campaign attributes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCampaign {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
}

/// Metric fields. int64 metrics arrive as strings, doubles as numbers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleMetrics {
    #[serde(default)]
    pub cost_micros: Option<String>,
    #[serde(default)]
    pub impressions: Option<String>,
    #[serde(default)]
    pub clicks: Option<String>,
    #[serde(default)]
    pub conversions: Option<f64>,
    #[serde(default)]
    pub conversions_value: Option<f64>,
}

/// Segment fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSegments {
    #[serde(default)]
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_row_deserializes_camel_case() {
        let json = r#"{
            "campaign": {"id": "111", "name": "Brand", "status": "ENABLED"},
            "metrics": {"costMicros": "1500000", "impressions": "20", "clicks": "3",
                        "conversions": 1.4, "conversionsValue": 12.5},
            "segments": {"date": "2026-07-01"}
        }"#;

        let row: SearchRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.campaign.as_ref().unwrap().id, "111");
        let metrics = row.metrics.unwrap();
        assert_eq!(metrics.cost_micros.as_deref(), Some("1500000"));
        assert_eq!(metrics.conversions, Some(1.4));
        assert_eq!(row.segments.unwrap().date.as_deref(), Some("2026-07-01"));
    }

    #[test]
    fn test_accessible_customers_response() {
        let json = r#"{"resourceNames": ["customers/123", "customers/456"]}"#;
        let resp: ListAccessibleCustomersResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.resource_names, vec!["customers/123", "customers/456"]);
    }
}
