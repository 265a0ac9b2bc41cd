//! TikTok adapter: capability contract implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::client::TiktokClient;
use super::convert::{to_normalized_account, to_normalized_campaign, to_normalized_insight};
use crate::entity::{AuthType, Platform};
use crate::platform::{
    AdPlatform, NormalizedAdAccount, NormalizedCampaign, NormalizedInsight, Result, TokenExchange,
};

/// Adapter translating the capability contract onto the TikTok client.
pub struct TiktokAdapter {
    client: TiktokClient,
}

impl TiktokAdapter {
    #[must_use]
    pub fn new(client: TiktokClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdPlatform for TiktokAdapter {
    fn platform(&self) -> Platform {
        Platform::Tiktok
    }

    fn auth_type(&self) -> AuthType {
        AuthType::OAuth
    }

    fn auth_url(&self, redirect_uri: &str, state: &str) -> Result<String> {
        Ok(self.client.portal_url(redirect_uri, state))
    }

    async fn exchange_code(&self, code: &str, _redirect_uri: &str) -> Result<TokenExchange> {
        // The portal flow validates the redirect URI when issuing the
        // code; the token endpoint itself only wants the code.
        Ok(self.client.exchange_code(code).await?)
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenExchange> {
        Ok(self.client.refresh(refresh_token).await?)
    }

    async fn validate_token(&self, token: &str) -> Result<bool> {
        Ok(self.client.validate(token).await?)
    }

    async fn ad_accounts(&self, token: &str) -> Result<Vec<NormalizedAdAccount>> {
        let advertisers = self.client.advertisers(token).await?;
        let ids: Vec<String> = advertisers
            .list
            .iter()
            .map(|a| a.advertiser_id.clone())
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let info = self.client.advertiser_info(token, &ids).await?;
        Ok(info.list.iter().map(to_normalized_account).collect())
    }

    async fn campaigns(
        &self,
        token: &str,
        external_account_id: &str,
    ) -> Result<Vec<NormalizedCampaign>> {
        let campaigns = self.client.campaigns(token, external_account_id).await?;
        Ok(campaigns.list.iter().map(to_normalized_campaign).collect())
    }

    async fn insights(
        &self,
        token: &str,
        external_campaign_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<NormalizedInsight>> {
        let report = self
            .client
            .insights(
                token,
                external_campaign_id,
                start.date_naive(),
                end.date_naive(),
            )
            .await?;
        Ok(report.list.iter().filter_map(to_normalized_insight).collect())
    }
}
