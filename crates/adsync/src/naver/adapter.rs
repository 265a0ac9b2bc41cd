//! Naver adapter: capability contract implementation for the api-key
//! platform.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::client::NaverClient;
use super::convert::{to_normalized_account, to_normalized_campaign, to_normalized_insight};
use super::types::NaverCredentials;
use crate::entity::{AuthType, Platform};
use crate::platform::{
    AdPlatform, NormalizedAdAccount, NormalizedCampaign, NormalizedInsight, PlatformError, Result,
    TokenExchange,
};

/// Adapter translating the capability contract onto the Naver client.
///
/// The contract's OAuth operations exist but always fail: callers are
/// expected to branch on [`AuthType::ApiKey`] before invoking them. The
/// "token" every other operation receives is the serialized credential
/// triple, parsed on each call.
pub struct NaverAdapter {
    client: NaverClient,
}

impl NaverAdapter {
    #[must_use]
    pub fn new(client: NaverClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdPlatform for NaverAdapter {
    fn platform(&self) -> Platform {
        Platform::Naver
    }

    fn auth_type(&self) -> AuthType {
        AuthType::ApiKey
    }

    fn auth_url(&self, _redirect_uri: &str, _state: &str) -> Result<String> {
        Err(PlatformError::unsupported(Platform::Naver, "auth_url"))
    }

    async fn exchange_code(&self, _code: &str, _redirect_uri: &str) -> Result<TokenExchange> {
        Err(PlatformError::unsupported(Platform::Naver, "exchange_code"))
    }

    async fn refresh_token(&self, _refresh_token: &str) -> Result<TokenExchange> {
        Err(PlatformError::unsupported(Platform::Naver, "refresh_token"))
    }

    async fn validate_token(&self, token: &str) -> Result<bool> {
        let credentials = NaverCredentials::parse(token)?;
        match self.client.campaigns(&credentials).await {
            Ok(_) => Ok(true),
            Err(super::error::NaverError::Api { .. }) => Ok(false),
            Err(other) => Err(other.into()),
        }
    }

    async fn ad_accounts(&self, token: &str) -> Result<Vec<NormalizedAdAccount>> {
        let credentials = NaverCredentials::parse(token)?;
        // Probe with the signed credential so a bad key/secret surfaces
        // here instead of silently yielding a phantom account.
        self.client.campaigns(&credentials).await?;
        Ok(vec![to_normalized_account(&credentials)])
    }

    async fn campaigns(
        &self,
        token: &str,
        _external_account_id: &str,
    ) -> Result<Vec<NormalizedCampaign>> {
        let credentials = NaverCredentials::parse(token)?;
        let campaigns = self.client.campaigns(&credentials).await?;
        Ok(campaigns.iter().map(to_normalized_campaign).collect())
    }

    async fn insights(
        &self,
        token: &str,
        external_campaign_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<NormalizedInsight>> {
        let credentials = NaverCredentials::parse(token)?;
        let stats = self
            .client
            .stats(
                &credentials,
                external_campaign_id,
                start.date_naive(),
                end.date_naive(),
            )
            .await?;
        Ok(stats.data.iter().filter_map(to_normalized_insight).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, MockTransport};
    use std::sync::Arc;

    const TOKEN: &str = r#"{"apiKey": "key", "apiSecret": "secret", "customerId": "777"}"#;

    fn adapter(transport: &MockTransport) -> NaverAdapter {
        NaverAdapter::new(NaverClient::new_with_transport(
            "https://naver.test",
            Arc::new(transport.clone()),
        ))
    }

    #[test]
    fn test_identity() {
        let transport = MockTransport::new();
        let adapter = adapter(&transport);
        assert_eq!(adapter.platform(), Platform::Naver);
        assert_eq!(adapter.auth_type(), AuthType::ApiKey);
    }

    #[tokio::test]
    async fn test_oauth_operations_always_fail() {
        let transport = MockTransport::new();
        let adapter = adapter(&transport);

        let err = adapter.auth_url("https://cb", "s").expect_err("api key");
        assert!(err.to_string().contains("not supported for this auth type"));

        let err = adapter
            .exchange_code("c", "https://cb")
            .await
            .expect_err("api key");
        assert!(matches!(err, PlatformError::Unsupported { .. }));

        let err = adapter.refresh_token("r").await.expect_err("api key");
        assert!(matches!(err, PlatformError::Unsupported { .. }));

        // None of these may touch the network.
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_ad_accounts_round_trips_valid_credential() {
        let transport = MockTransport::new();
        let adapter = adapter(&transport);
        transport.push_json(
            HttpMethod::Get,
            "https://naver.test/ncc/campaigns",
            200,
            &serde_json::json!([]),
        );

        let accounts = adapter.ad_accounts(TOKEN).await.expect("accounts");
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].external_account_id, "777");
        assert_eq!(accounts[0].currency, "KRW");
    }

    #[tokio::test]
    async fn test_ad_accounts_invalid_json_credential() {
        let transport = MockTransport::new();
        let adapter = adapter(&transport);

        let err = adapter
            .ad_accounts("definitely not json")
            .await
            .expect_err("syntax error");
        assert!(matches!(err, PlatformError::Credential(_)));
        assert!(err.to_string().contains("not parseable"));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_ad_accounts_missing_field_credential() {
        let transport = MockTransport::new();
        let adapter = adapter(&transport);

        let err = adapter
            .ad_accounts(r#"{"apiKey": "key", "apiSecret": "secret"}"#)
            .await
            .expect_err("missing customerId");
        assert!(matches!(err, PlatformError::Credential(_)));
        assert!(err.to_string().contains("missing required fields"));
        assert!(err.to_string().contains("customerId"));
    }

    #[tokio::test]
    async fn test_campaigns_apply_user_lock_override() {
        let transport = MockTransport::new();
        let adapter = adapter(&transport);
        transport.push_json(
            HttpMethod::Get,
            "https://naver.test/ncc/campaigns",
            200,
            &serde_json::json!([
                {"nccCampaignId": "cmp-1", "name": "A", "status": "ELIGIBLE", "userLock": false},
                {"nccCampaignId": "cmp-2", "name": "B", "status": "ELIGIBLE", "userLock": true}
            ]),
        );

        let campaigns = adapter.campaigns(TOKEN, "777").await.expect("campaigns");
        assert_eq!(campaigns[0].status, crate::entity::CampaignStatus::Active);
        assert_eq!(campaigns[1].status, crate::entity::CampaignStatus::Paused);
    }
}
