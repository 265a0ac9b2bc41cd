//! Google Ads API client.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDate, Utc};

use super::error::{
    GoogleError, is_rate_limit_error, is_rate_limit_response, parse_error_envelope,
};
use super::types::{GoogleTokenResponse, ListAccessibleCustomersResponse, SearchResponse};
use crate::entity::Platform;
use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpMethod, HttpRequest, HttpTransport};
use crate::platform::TokenExchange;
use crate::retry::{RetryConfig, with_retry};

/// Default Google Ads API host.
pub const API_HOST: &str = "https://googleads.googleapis.com";

/// OAuth consent screen host.
pub const AUTH_HOST: &str = "https://accounts.google.com";

/// OAuth token endpoint.
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Google Ads API version all paths are pinned to.
pub const API_VERSION: &str = "v16";

/// OAuth scope for the Ads API.
const ADWORDS_SCOPE: &str = "https://www.googleapis.com/auth/adwords";

/// Token lifetime assumed when the endpoint omits `expires_in`.
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Google Ads API client.
///
/// Owns the HTTP mechanics for the Google adapter: bearer plus
/// developer-token headers, GAQL search requests, rate-limit retry, and
/// normalization of the Google error envelope.
#[derive(Clone)]
pub struct GoogleClient {
    transport: Arc<dyn HttpTransport>,
    client_id: String,
    client_secret: String,
    developer_token: String,
    api_host: String,
    auth_host: String,
    token_url: String,
    retry: RetryConfig,
}

impl GoogleClient {
    /// Create a client against the production API.
    pub fn new(
        client_id: &str,
        client_secret: &str,
        developer_token: &str,
    ) -> Result<Self, GoogleError> {
        let transport = ReqwestTransport::with_timeout(StdDuration::from_secs(30))?;
        Ok(Self::new_with_transport(
            client_id,
            client_secret,
            developer_token,
            API_HOST,
            AUTH_HOST,
            TOKEN_URL,
            Arc::new(transport),
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_with_transport(
        client_id: &str,
        client_secret: &str,
        developer_token: &str,
        api_host: &str,
        auth_host: &str,
        token_url: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            developer_token: developer_token.to_string(),
            api_host: api_host.trim_end_matches('/').to_string(),
            auth_host: auth_host.trim_end_matches('/').to_string(),
            token_url: token_url.to_string(),
            retry: RetryConfig::default(),
        }
    }

    /// Build the user-facing OAuth consent URL.
    ///
    /// `access_type=offline` + `prompt=consent` make Google issue a
    /// refresh token on the first exchange.
    #[must_use]
    pub fn consent_url(&self, redirect_uri: &str, state: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", ADWORDS_SCOPE)
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent")
            .append_pair("state", state)
            .finish();
        format!("{}/o/oauth2/v2/auth?{}", self.auth_host, query)
    }

    async fn send_once(&self, request: HttpRequest) -> Result<serde_json::Value, GoogleError> {
        let response = self.transport.send(request).await?;

        if response.is_success() {
            return Ok(serde_json::from_slice(&response.body)?);
        }
        if is_rate_limit_response(response.status, &response.body) {
            return Err(GoogleError::RateLimited {
                body: response.body,
            });
        }
        match parse_error_envelope(&response.body) {
            Some((message, code)) => Err(GoogleError::api(message, code)),
            None => Err(GoogleError::api(None, None)),
        }
    }

    async fn request_json(&self, request: &HttpRequest) -> Result<serde_json::Value, GoogleError> {
        with_retry(
            || self.send_once(request.clone()),
            is_rate_limit_error,
            self.retry.clone(),
            Platform::Google,
            "ads request",
        )
        .await
        .map_err(GoogleError::into_exhausted)
    }

    fn token_request(&self, params: &[(&str, &str)]) -> HttpRequest {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in params {
            serializer.append_pair(k, v);
        }
        HttpRequest {
            method: HttpMethod::Post,
            url: self.token_url.clone(),
            headers: vec![(
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            )],
            body: serializer.finish().into_bytes(),
        }
    }

    fn token_exchange_from(token: GoogleTokenResponse) -> TokenExchange {
        let ttl = token.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        TokenExchange {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: Utc::now() + Duration::seconds(ttl),
        }
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenExchange, GoogleError> {
        let request = self.token_request(&[
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ]);
        let value = self.request_json(&request).await?;
        let token: GoogleTokenResponse = serde_json::from_value(value)?;
        Ok(Self::token_exchange_from(token))
    }

    /// Refresh an access token. The response carries no new refresh
    /// token, so the result's `refresh_token` is `None` (unchanged).
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenExchange, GoogleError> {
        let request = self.token_request(&[
            ("refresh_token", refresh_token),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ]);
        let value = self.request_json(&request).await?;
        let token: GoogleTokenResponse = serde_json::from_value(value)?;
        Ok(Self::token_exchange_from(token))
    }

    fn search_url(&self, customer_id: &str) -> String {
        format!(
            "{}/{}/customers/{}/googleAds:search",
            self.api_host, API_VERSION, customer_id
        )
    }

    /// Run one GAQL query against a customer.
    ///
    /// `customer_id` may be empty when the insight reference carried no
    /// account context; the request still goes out and the platform's
    /// own error comes back normalized.
    pub async fn search(
        &self,
        token: &str,
        customer_id: &str,
        query: &str,
    ) -> Result<SearchResponse, GoogleError> {
        let request = HttpRequest::post_json(
            self.search_url(customer_id),
            &serde_json::json!({ "query": query }),
        )
        .with_header("Authorization", format!("Bearer {token}"))
        .with_header("developer-token", self.developer_token.clone());

        let value = self.request_json(&request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// List customer resource names reachable with this token.
    pub async fn accessible_customers(&self, token: &str) -> Result<Vec<String>, GoogleError> {
        let url = format!(
            "{}/{}/customers:listAccessibleCustomers",
            self.api_host, API_VERSION
        );
        let request = HttpRequest::get(url)
            .with_header("Authorization", format!("Bearer {token}"))
            .with_header("developer-token", self.developer_token.clone());

        let value = self.request_json(&request).await?;
        let resp: ListAccessibleCustomersResponse = serde_json::from_value(value)?;
        Ok(resp.resource_names)
    }

    /// Probe whether a token is still usable.
    pub async fn validate(&self, token: &str) -> Result<bool, GoogleError> {
        match self.accessible_customers(token).await {
            Ok(_) => Ok(true),
            Err(GoogleError::Api { .. }) => Ok(false),
            Err(other) => Err(other),
        }
    }

    /// Customer attribute query used to normalize an ad account.
    pub async fn customer(
        &self,
        token: &str,
        customer_id: &str,
    ) -> Result<SearchResponse, GoogleError> {
        const QUERY: &str = "SELECT customer.id, customer.descriptive_name, \
             customer.currency_code, customer.time_zone, customer.manager, \
             customer.status FROM customer";
        self.search(token, customer_id, QUERY).await
    }

    /// Campaign listing query.
    pub async fn campaigns(
        &self,
        token: &str,
        customer_id: &str,
    ) -> Result<SearchResponse, GoogleError> {
        const QUERY: &str =
            "SELECT campaign.id, campaign.name, campaign.status FROM campaign ORDER BY campaign.id";
        self.search(token, customer_id, QUERY).await
    }

    /// Daily metrics query for one campaign over an inclusive window.
    pub async fn insights(
        &self,
        token: &str,
        customer_id: &str,
        campaign_id: &str,
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<SearchResponse, GoogleError> {
        let query = format!(
            "SELECT segments.date, metrics.cost_micros, metrics.impressions, \
             metrics.clicks, metrics.conversions, metrics.conversions_value \
             FROM campaign WHERE campaign.id = {campaign_id} \
             AND segments.date BETWEEN '{since}' AND '{until}' \
             ORDER BY segments.date"
        );
        self.search(token, customer_id, &query).await
    }
}
