//! Meta adapter: capability contract implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::client::MetaClient;
use super::convert::{to_normalized_account, to_normalized_campaign, to_normalized_insight};
use crate::entity::{AuthType, Platform};
use crate::platform::{
    AdPlatform, NormalizedAdAccount, NormalizedCampaign, NormalizedInsight, PlatformError, Result,
    TokenExchange,
};

/// Adapter translating the capability contract onto the Meta client.
///
/// Meta is OAuth-based but issues no refresh token: `exchange_code`
/// returns `refresh_token: None` and `refresh_token()` is a supported
/// absence that always errors.
pub struct MetaAdapter {
    client: MetaClient,
}

impl MetaAdapter {
    #[must_use]
    pub fn new(client: MetaClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdPlatform for MetaAdapter {
    fn platform(&self) -> Platform {
        Platform::Meta
    }

    fn auth_type(&self) -> AuthType {
        AuthType::OAuth
    }

    fn auth_url(&self, redirect_uri: &str, state: &str) -> Result<String> {
        Ok(self.client.dialog_url(redirect_uri, state))
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenExchange> {
        Ok(self.client.exchange_code(code, redirect_uri).await?)
    }

    async fn refresh_token(&self, _refresh_token: &str) -> Result<TokenExchange> {
        Err(PlatformError::unsupported(Platform::Meta, "refresh_token"))
    }

    async fn validate_token(&self, token: &str) -> Result<bool> {
        Ok(self.client.validate(token).await?)
    }

    async fn ad_accounts(&self, token: &str) -> Result<Vec<NormalizedAdAccount>> {
        let raw = self.client.ad_accounts(token).await?;
        Ok(raw.iter().map(to_normalized_account).collect())
    }

    async fn campaigns(
        &self,
        token: &str,
        external_account_id: &str,
    ) -> Result<Vec<NormalizedCampaign>> {
        let raw = self.client.campaigns(token, external_account_id).await?;
        Ok(raw.iter().map(to_normalized_campaign).collect())
    }

    async fn insights(
        &self,
        token: &str,
        external_campaign_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<NormalizedInsight>> {
        let raw = self
            .client
            .insights(token, external_campaign_id, start.date_naive(), end.date_naive())
            .await?;
        Ok(raw.iter().filter_map(to_normalized_insight).collect())
    }
}
