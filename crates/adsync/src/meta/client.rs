//! Meta Graph API client.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDate, Utc};
use serde::de::DeserializeOwned;

use super::error::{MetaError, is_rate_limit_error, is_rate_limit_response, parse_error_envelope};
use super::types::{MetaAdAccount, MetaCampaign, MetaInsightRow, MetaTokenResponse, Paged};
use crate::entity::Platform;
use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpRequest, HttpTransport};
use crate::platform::TokenExchange;
use crate::retry::{RetryConfig, with_retry};

/// Default Graph API host.
pub const GRAPH_HOST: &str = "https://graph.facebook.com";

/// Host serving the user-facing OAuth dialog.
pub const DIALOG_HOST: &str = "https://www.facebook.com";

/// Graph API version all paths are pinned to.
pub const API_VERSION: &str = "v19.0";

/// Token lifetime assumed when the token endpoint omits `expires_in`
/// (Meta long-lived tokens run ~60 days).
const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 24 * 60 * 60;

/// Meta Graph API client.
///
/// Owns the HTTP mechanics for the Meta adapter: auth query parameters,
/// rate-limit retry with exponential backoff, and normalization of the
/// Graph error envelope.
#[derive(Clone)]
pub struct MetaClient {
    transport: Arc<dyn HttpTransport>,
    app_id: String,
    app_secret: String,
    graph_host: String,
    dialog_host: String,
    retry: RetryConfig,
}

impl MetaClient {
    /// Create a client against the production Graph API.
    pub fn new(app_id: &str, app_secret: &str) -> Result<Self, MetaError> {
        let transport = ReqwestTransport::with_timeout(StdDuration::from_secs(30))?;
        Ok(Self::new_with_transport(
            app_id,
            app_secret,
            GRAPH_HOST,
            DIALOG_HOST,
            Arc::new(transport),
        ))
    }

    pub fn new_with_transport(
        app_id: &str,
        app_secret: &str,
        graph_host: &str,
        dialog_host: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            app_id: app_id.to_string(),
            app_secret: app_secret.to_string(),
            graph_host: graph_host.trim_end_matches('/').to_string(),
            dialog_host: dialog_host.trim_end_matches('/').to_string(),
            retry: RetryConfig::default(),
        }
    }

    /// Build the user-facing OAuth dialog URL.
    #[must_use]
    pub fn dialog_url(&self, redirect_uri: &str, state: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("client_id", &self.app_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("state", state)
            .append_pair("scope", "ads_read,ads_management")
            .append_pair("response_type", "code")
            .finish();
        format!("{}/{}/dialog/oauth?{}", self.dialog_host, API_VERSION, query)
    }

    fn api_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in params {
            serializer.append_pair(k, v);
        }
        format!(
            "{}/{}{}?{}",
            self.graph_host,
            API_VERSION,
            path,
            serializer.finish()
        )
    }

    /// Issue one request without retrying; rate limit responses keep
    /// their body so the envelope survives retry exhaustion.
    async fn send_once(&self, request: HttpRequest) -> Result<serde_json::Value, MetaError> {
        let response = self.transport.send(request).await?;

        if response.is_success() {
            return Ok(serde_json::from_slice(&response.body)?);
        }
        if is_rate_limit_response(response.status, &response.body) {
            return Err(MetaError::RateLimited {
                body: response.body,
            });
        }
        match parse_error_envelope(&response.body) {
            Some((message, code)) => Err(MetaError::api(message, code)),
            None => Err(MetaError::api(None, None)),
        }
    }

    /// Issue a request with the client's retry policy applied.
    async fn request_json(&self, request: &HttpRequest) -> Result<serde_json::Value, MetaError> {
        with_retry(
            || self.send_once(request.clone()),
            is_rate_limit_error,
            self.retry.clone(),
            Platform::Meta,
            "graph request",
        )
        .await
        .map_err(MetaError::into_exhausted)
    }

    async fn get<T: DeserializeOwned>(&self, url: String) -> Result<T, MetaError> {
        let value = self.request_json(&HttpRequest::get(url)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Meta issues no refresh token; the result's `refresh_token` is
    /// always `None`.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenExchange, MetaError> {
        let url = self.api_url(
            "/oauth/access_token",
            &[
                ("client_id", self.app_id.as_str()),
                ("client_secret", self.app_secret.as_str()),
                ("redirect_uri", redirect_uri),
                ("code", code),
            ],
        );
        let token: MetaTokenResponse = self.get(url).await?;

        let ttl = token.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        Ok(TokenExchange {
            access_token: token.access_token,
            refresh_token: None,
            expires_at: Utc::now() + Duration::seconds(ttl),
        })
    }

    /// Probe whether a token is still usable.
    pub async fn validate(&self, token: &str) -> Result<bool, MetaError> {
        let url = self.api_url("/me", &[("fields", "id"), ("access_token", token)]);
        match self.get::<serde_json::Value>(url).await {
            Ok(_) => Ok(true),
            Err(MetaError::Api { .. }) => Ok(false),
            Err(other) => Err(other),
        }
    }

    /// List the ad accounts reachable with this token.
    pub async fn ad_accounts(&self, token: &str) -> Result<Vec<MetaAdAccount>, MetaError> {
        let url = self.api_url(
            "/me/adaccounts",
            &[
                ("fields", "account_id,name,currency,timezone_name,account_status"),
                ("access_token", token),
            ],
        );
        let page: Paged<MetaAdAccount> = self.get(url).await?;
        Ok(page.data)
    }

    /// List one account's campaigns.
    pub async fn campaigns(
        &self,
        token: &str,
        account_id: &str,
    ) -> Result<Vec<MetaCampaign>, MetaError> {
        let url = self.api_url(
            &format!("/act_{account_id}/campaigns"),
            &[("fields", "id,name,status"), ("access_token", token)],
        );
        let page: Paged<MetaCampaign> = self.get(url).await?;
        Ok(page.data)
    }

    /// Daily insight rows for one campaign over an inclusive window.
    pub async fn insights(
        &self,
        token: &str,
        campaign_id: &str,
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<MetaInsightRow>, MetaError> {
        let time_range = format!(r#"{{"since":"{since}","until":"{until}"}}"#);
        let url = self.api_url(
            &format!("/{campaign_id}/insights"),
            &[
                ("fields", "spend,impressions,clicks,actions,action_values"),
                ("time_increment", "1"),
                ("time_range", time_range.as_str()),
                ("access_token", token),
            ],
        );
        let page: Paged<MetaInsightRow> = self.get(url).await?;
        Ok(page.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, MockTransport};

    fn client(transport: &MockTransport) -> MetaClient {
        MetaClient::new_with_transport(
            "app-id",
            "app-secret",
            "https://graph.test",
            "https://dialog.test",
            Arc::new(transport.clone()),
        )
    }

    #[test]
    fn test_dialog_url_carries_redirect_and_state() {
        let transport = MockTransport::new();
        let url = client(&transport).dialog_url("https://app.example/cb", "xyzzy");

        assert!(url.starts_with("https://dialog.test/v19.0/dialog/oauth?"));
        assert!(url.contains("client_id=app-id"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example%2Fcb"));
        assert!(url.contains("state=xyzzy"));
        assert!(url.contains("response_type=code"));
    }

    #[tokio::test]
    async fn test_ad_accounts_parses_paged_response() {
        let transport = MockTransport::new();
        let client = client(&transport);
        let url = client.api_url(
            "/me/adaccounts",
            &[
                ("fields", "account_id,name,currency,timezone_name,account_status"),
                ("access_token", "tok"),
            ],
        );
        transport.push_json(
            HttpMethod::Get,
            url,
            200,
            &serde_json::json!({"data": [{
                "account_id": "123",
                "name": "Acme",
                "currency": "USD",
                "timezone_name": "America/Los_Angeles",
                "account_status": 1
            }]}),
        );

        let accounts = client.ad_accounts("tok").await.expect("accounts");
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].account_id, "123");
        assert_eq!(accounts[0].account_status, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_then_success_performs_two_calls() {
        let transport = MockTransport::new();
        let client = client(&transport);
        let url = client.api_url(
            "/act_9/campaigns",
            &[("fields", "id,name,status"), ("access_token", "tok")],
        );

        transport.push_json(
            HttpMethod::Get,
            url.clone(),
            429,
            &serde_json::json!({"error": {"message": "limit", "code": 17}}),
        );
        transport.push_json(
            HttpMethod::Get,
            url,
            200,
            &serde_json::json!({"data": [{"id": "c1", "name": "A", "status": "ACTIVE"}]}),
        );

        let campaigns = client.campaigns("tok", "9").await.expect("campaigns");
        assert_eq!(campaigns.len(), 1);
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_exhaustion_normalizes_envelope_after_three_calls() {
        let transport = MockTransport::new();
        let client = client(&transport);
        let url = client.api_url(
            "/act_9/campaigns",
            &[("fields", "id,name,status"), ("access_token", "tok")],
        );
        for _ in 0..3 {
            transport.push_json(
                HttpMethod::Get,
                url.clone(),
                429,
                &serde_json::json!({"error": {"message": "User request limit reached", "code": 17}}),
            );
        }

        let err = client
            .campaigns("tok", "9")
            .await
            .expect_err("budget exhausted");
        assert_eq!(
            err.to_string(),
            "Meta API Error: User request limit reached (code: 17)"
        );
        assert_eq!(transport.request_count(), 3);
    }

    #[tokio::test]
    async fn test_non_rate_limit_error_is_not_retried() {
        let transport = MockTransport::new();
        let client = client(&transport);
        let url = client.api_url("/me", &[("fields", "id"), ("access_token", "bad")]);
        transport.push_json(
            HttpMethod::Get,
            url,
            400,
            &serde_json::json!({"error": {"message": "Invalid OAuth access token", "code": 190}}),
        );

        let valid = client.validate("bad").await.expect("probe completes");
        assert!(!valid);
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_error_without_envelope_substitutes_placeholders() {
        let transport = MockTransport::new();
        let client = client(&transport);
        let url = client.api_url(
            "/me/adaccounts",
            &[
                ("fields", "account_id,name,currency,timezone_name,account_status"),
                ("access_token", "tok"),
            ],
        );
        transport.push_response(
            HttpMethod::Get,
            url,
            crate::http::HttpResponse {
                status: 500,
                headers: Vec::new(),
                body: b"<html>oops</html>".to_vec(),
            },
        );

        let err = client.ad_accounts("tok").await.expect_err("error");
        assert_eq!(err.to_string(), "Meta API Error: Unknown error (code: unknown)");
    }

    #[tokio::test]
    async fn test_exchange_code_has_no_refresh_token() {
        let transport = MockTransport::new();
        let client = client(&transport);
        let url = client.api_url(
            "/oauth/access_token",
            &[
                ("client_id", "app-id"),
                ("client_secret", "app-secret"),
                ("redirect_uri", "https://app.example/cb"),
                ("code", "c0de"),
            ],
        );
        transport.push_json(
            HttpMethod::Get,
            url,
            200,
            &serde_json::json!({"access_token": "t0k", "token_type": "bearer", "expires_in": 3600}),
        );

        let before = Utc::now();
        let exchange = client
            .exchange_code("c0de", "https://app.example/cb")
            .await
            .expect("exchange");

        assert_eq!(exchange.access_token, "t0k");
        assert!(exchange.refresh_token.is_none());
        assert!(exchange.expires_at >= before + Duration::seconds(3500));
        assert!(exchange.expires_at <= Utc::now() + Duration::seconds(3700));
    }

    #[tokio::test]
    async fn test_transport_error_passes_through_unnormalized() {
        let transport = MockTransport::new();
        let client = client(&transport);

        // No mock registered: the transport itself fails.
        let err = client.ad_accounts("tok").await.expect_err("transport error");
        assert!(matches!(err, MetaError::Http(_)));
    }
}
