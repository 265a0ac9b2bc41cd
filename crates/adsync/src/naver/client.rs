//! Naver SearchAd API client with HMAC request signing.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use base64::Engine;
use chrono::{NaiveDate, Utc};
use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use sha2::Sha256;

use super::error::{NaverError, is_rate_limit_error, parse_error_envelope};
use super::types::{NaverCampaign, NaverCredentials, NaverStatResponse};
use crate::entity::Platform;
use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpMethod, HttpRequest, HttpTransport};
use crate::retry::{RetryConfig, with_retry};

type HmacSha256 = Hmac<Sha256>;

/// Default SearchAd API host.
pub const API_HOST: &str = "https://api.searchad.naver.com";

/// Naver SearchAd API client.
///
/// There is no app-level credential: every request is signed with the
/// per-account secret from the parsed credential triple. The signature
/// covers `{timestamp}.{METHOD}.{path}` (the path only, never the
/// query) and travels in the `X-Signature` header.
#[derive(Clone)]
pub struct NaverClient {
    transport: Arc<dyn HttpTransport>,
    api_host: String,
    retry: RetryConfig,
}

impl NaverClient {
    /// Create a client against the production API.
    pub fn new() -> Result<Self, NaverError> {
        let transport = ReqwestTransport::with_timeout(StdDuration::from_secs(30))?;
        Ok(Self::new_with_transport(API_HOST, Arc::new(transport)))
    }

    pub fn new_with_transport(api_host: &str, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            api_host: api_host.trim_end_matches('/').to_string(),
            retry: RetryConfig::default(),
        }
    }

    /// Compute the request signature.
    pub(crate) fn sign(secret: &str, timestamp: &str, method: HttpMethod, path: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(format!("{timestamp}.{}.{path}", method.as_str()).as_bytes());
        base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
    }

    fn signed_request(
        &self,
        credentials: &NaverCredentials,
        path: &str,
        params: &[(&str, &str)],
    ) -> HttpRequest {
        let timestamp = Utc::now().timestamp_millis().to_string();
        let signature = Self::sign(&credentials.api_secret, &timestamp, HttpMethod::Get, path);

        let url = if params.is_empty() {
            format!("{}{}", self.api_host, path)
        } else {
            let mut serializer = url::form_urlencoded::Serializer::new(String::new());
            for (k, v) in params {
                serializer.append_pair(k, v);
            }
            format!("{}{}?{}", self.api_host, path, serializer.finish())
        };

        HttpRequest::get(url)
            .with_header("X-Timestamp", timestamp)
            .with_header("X-API-KEY", credentials.api_key.clone())
            .with_header("X-Customer", credentials.customer_id.clone())
            .with_header("X-Signature", signature)
    }

    async fn send_once(&self, request: HttpRequest) -> Result<serde_json::Value, NaverError> {
        let response = self.transport.send(request).await?;

        if response.is_success() {
            return Ok(serde_json::from_slice(&response.body)?);
        }
        if response.status == 429 {
            return Err(NaverError::RateLimited {
                body: response.body,
            });
        }
        match parse_error_envelope(&response.body) {
            Some((message, code)) => Err(NaverError::api(message, code)),
            None => Err(NaverError::api(None, None)),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        credentials: &NaverCredentials,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, NaverError> {
        let value = with_retry(
            || {
                // Re-sign on each attempt so the timestamp stays fresh
                // across backoff sleeps.
                let request = self.signed_request(credentials, path, params);
                self.send_once(request)
            },
            is_rate_limit_error,
            self.retry.clone(),
            Platform::Naver,
            "searchad request",
        )
        .await
        .map_err(NaverError::into_exhausted)?;
        Ok(serde_json::from_value(value)?)
    }

    /// List the customer's campaigns. Also used as the credential probe.
    pub async fn campaigns(
        &self,
        credentials: &NaverCredentials,
    ) -> Result<Vec<NaverCampaign>, NaverError> {
        self.get(credentials, "/ncc/campaigns", &[]).await
    }

    /// Daily stat rows for one campaign over an inclusive window.
    pub async fn stats(
        &self,
        credentials: &NaverCredentials,
        campaign_id: &str,
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<NaverStatResponse, NaverError> {
        let fields = r#"["impCnt","clkCnt","salesAmt","ccnt","convAmt"]"#;
        let time_range = format!(r#"{{"since":"{since}","until":"{until}"}}"#);
        self.get(
            credentials,
            "/stats",
            &[
                ("id", campaign_id),
                ("fields", fields),
                ("timeRange", time_range.as_str()),
                ("timeIncrement", "1"),
            ],
        )
        .await
    }
}
