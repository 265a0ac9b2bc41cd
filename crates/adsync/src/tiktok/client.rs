//! TikTok Business API client.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDate, Utc};
use serde::de::DeserializeOwned;

use super::error::{
    TiktokError, is_rate_limit_envelope, is_rate_limit_error, parse_error_envelope,
};
use super::types::{
    AdvertiserInfoList, AdvertiserList, CODE_OK, CampaignList, Envelope, ReportList,
    TiktokTokenData,
};
use crate::entity::Platform;
use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpRequest, HttpTransport};
use crate::platform::TokenExchange;
use crate::retry::{RetryConfig, with_retry};

/// Default Business API host.
pub const API_HOST: &str = "https://business-api.tiktok.com";

/// Path prefix all Business API endpoints share.
pub const API_PREFIX: &str = "/open_api/v1.3";

/// Token lifetime assumed when the endpoint omits `expires_in`
/// (Business API tokens run 24 hours).
const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// TikTok Business API client.
///
/// Owns the HTTP mechanics for the TikTok adapter: the `Access-Token`
/// header, rate-limit retry, and normalization of the response envelope.
/// The envelope arrives with HTTP 200 even on failure, so error
/// detection inspects `code` rather than the status line.
#[derive(Clone)]
pub struct TiktokClient {
    transport: Arc<dyn HttpTransport>,
    app_id: String,
    secret: String,
    api_host: String,
    retry: RetryConfig,
}

impl TiktokClient {
    /// Create a client against the production API.
    pub fn new(app_id: &str, secret: &str) -> Result<Self, TiktokError> {
        let transport = ReqwestTransport::with_timeout(StdDuration::from_secs(30))?;
        Ok(Self::new_with_transport(
            app_id,
            secret,
            API_HOST,
            Arc::new(transport),
        ))
    }

    pub fn new_with_transport(
        app_id: &str,
        secret: &str,
        api_host: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            app_id: app_id.to_string(),
            secret: secret.to_string(),
            api_host: api_host.trim_end_matches('/').to_string(),
            retry: RetryConfig::default(),
        }
    }

    /// Build the user-facing portal authorization URL.
    #[must_use]
    pub fn portal_url(&self, redirect_uri: &str, state: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("app_id", &self.app_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("state", state)
            .finish();
        format!("{}/portal/auth?{}", self.api_host, query)
    }

    fn api_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in params {
            serializer.append_pair(k, v);
        }
        format!(
            "{}{}{}?{}",
            self.api_host,
            API_PREFIX,
            path,
            serializer.finish()
        )
    }

    /// Issue one request and unwrap the envelope without retrying.
    async fn send_once(&self, request: HttpRequest) -> Result<serde_json::Value, TiktokError> {
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            if response.status == 429 {
                return Err(TiktokError::RateLimited {
                    body: response.body,
                });
            }
            return match parse_error_envelope(&response.body) {
                Some((message, code)) => Err(TiktokError::api(message, code)),
                None => Err(TiktokError::api(None, None)),
            };
        }

        let envelope: Envelope = serde_json::from_slice(&response.body)?;
        if envelope.code == CODE_OK {
            return Ok(envelope.data.unwrap_or(serde_json::Value::Null));
        }
        if is_rate_limit_envelope(&envelope) {
            return Err(TiktokError::RateLimited {
                body: response.body,
            });
        }
        Err(TiktokError::api(
            envelope.message,
            Some(envelope.code.to_string()),
        ))
    }

    async fn request_data<T: DeserializeOwned>(
        &self,
        request: &HttpRequest,
    ) -> Result<T, TiktokError> {
        let data = with_retry(
            || self.send_once(request.clone()),
            is_rate_limit_error,
            self.retry.clone(),
            Platform::Tiktok,
            "business api request",
        )
        .await
        .map_err(TiktokError::into_exhausted)?;
        Ok(serde_json::from_value(data)?)
    }

    fn token_exchange_from(data: TiktokTokenData) -> TokenExchange {
        let ttl = data.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        TokenExchange {
            access_token: data.access_token,
            refresh_token: data.refresh_token,
            expires_at: Utc::now() + Duration::seconds(ttl),
        }
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, auth_code: &str) -> Result<TokenExchange, TiktokError> {
        let url = format!("{}{}/oauth2/access_token/", self.api_host, API_PREFIX);
        let request = HttpRequest::post_json(
            url,
            &serde_json::json!({
                "app_id": self.app_id,
                "secret": self.secret,
                "auth_code": auth_code,
            }),
        );
        let data: TiktokTokenData = self.request_data(&request).await?;
        Ok(Self::token_exchange_from(data))
    }

    /// Refresh an access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenExchange, TiktokError> {
        let url = format!("{}{}/oauth2/refresh_token/", self.api_host, API_PREFIX);
        let request = HttpRequest::post_json(
            url,
            &serde_json::json!({
                "app_id": self.app_id,
                "secret": self.secret,
                "refresh_token": refresh_token,
            }),
        );
        let data: TiktokTokenData = self.request_data(&request).await?;
        Ok(Self::token_exchange_from(data))
    }

    /// List the advertiser ids this token is authorized for.
    pub async fn advertisers(&self, token: &str) -> Result<AdvertiserList, TiktokError> {
        let url = self.api_url(
            "/oauth2/advertiser/get/",
            &[
                ("app_id", self.app_id.as_str()),
                ("secret", self.secret.as_str()),
            ],
        );
        let request = HttpRequest::get(url).with_header("Access-Token", token);
        self.request_data(&request).await
    }

    /// Fetch advertiser attributes for a set of ids.
    pub async fn advertiser_info(
        &self,
        token: &str,
        advertiser_ids: &[String],
    ) -> Result<AdvertiserInfoList, TiktokError> {
        let ids_json = serde_json::to_string(advertiser_ids)?;
        let url = self.api_url("/advertiser/info/", &[("advertiser_ids", ids_json.as_str())]);
        let request = HttpRequest::get(url).with_header("Access-Token", token);
        self.request_data(&request).await
    }

    /// Probe whether a token is still usable.
    pub async fn validate(&self, token: &str) -> Result<bool, TiktokError> {
        match self.advertisers(token).await {
            Ok(_) => Ok(true),
            Err(TiktokError::Api { .. }) => Ok(false),
            Err(other) => Err(other),
        }
    }

    /// List one advertiser's campaigns.
    pub async fn campaigns(
        &self,
        token: &str,
        advertiser_id: &str,
    ) -> Result<CampaignList, TiktokError> {
        let url = self.api_url(
            "/campaign/get/",
            &[("advertiser_id", advertiser_id), ("page_size", "1000")],
        );
        let request = HttpRequest::get(url).with_header("Access-Token", token);
        self.request_data(&request).await
    }

    /// Daily report rows for one campaign over an inclusive window.
    pub async fn insights(
        &self,
        token: &str,
        campaign_id: &str,
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<ReportList, TiktokError> {
        let dimensions = r#"["campaign_id","stat_time_day"]"#;
        let metrics = r#"["spend","impressions","clicks","conversions","total_purchase_value"]"#;
        let filters = format!(
            r#"[{{"field_name":"campaign_ids","filter_type":"IN","filter_value":"[\"{campaign_id}\"]"}}]"#
        );
        let since = since.to_string();
        let until = until.to_string();

        let url = self.api_url(
            "/report/integrated/get/",
            &[
                ("report_type", "BASIC"),
                ("data_level", "AUCTION_CAMPAIGN"),
                ("dimensions", dimensions),
                ("metrics", metrics),
                ("filters", filters.as_str()),
                ("start_date", since.as_str()),
                ("end_date", until.as_str()),
            ],
        );
        let request = HttpRequest::get(url).with_header("Access-Token", token);
        self.request_data(&request).await
    }
}
