//! Google Ads adapter: capability contract implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::client::GoogleClient;
use super::convert::{
    split_campaign_ref, to_normalized_account, to_normalized_campaign, to_normalized_insight,
};
use crate::entity::{AuthType, Platform};
use crate::platform::{
    AdPlatform, NormalizedAdAccount, NormalizedCampaign, NormalizedInsight, Result, TokenExchange,
};

/// Adapter translating the capability contract onto the Google client.
pub struct GoogleAdapter {
    client: GoogleClient,
}

impl GoogleAdapter {
    #[must_use]
    pub fn new(client: GoogleClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdPlatform for GoogleAdapter {
    fn platform(&self) -> Platform {
        Platform::Google
    }

    fn auth_type(&self) -> AuthType {
        AuthType::OAuth
    }

    fn auth_url(&self, redirect_uri: &str, state: &str) -> Result<String> {
        Ok(self.client.consent_url(redirect_uri, state))
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenExchange> {
        Ok(self.client.exchange_code(code, redirect_uri).await?)
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenExchange> {
        Ok(self.client.refresh(refresh_token).await?)
    }

    async fn validate_token(&self, token: &str) -> Result<bool> {
        Ok(self.client.validate(token).await?)
    }

    async fn ad_accounts(&self, token: &str) -> Result<Vec<NormalizedAdAccount>> {
        let resource_names = self.client.accessible_customers(token).await?;

        let mut accounts = Vec::with_capacity(resource_names.len());
        for resource_name in resource_names {
            let customer_id = resource_name
                .strip_prefix("customers/")
                .unwrap_or(&resource_name);
            let response = self.client.customer(token, customer_id).await?;
            if let Some(customer) = response.results.first().and_then(|r| r.customer.as_ref()) {
                accounts.push(to_normalized_account(customer, customer_id));
            }
        }
        Ok(accounts)
    }

    async fn campaigns(
        &self,
        token: &str,
        external_account_id: &str,
    ) -> Result<Vec<NormalizedCampaign>> {
        let response = self.client.campaigns(token, external_account_id).await?;
        Ok(response
            .results
            .iter()
            .filter_map(|row| to_normalized_campaign(row, external_account_id))
            .collect())
    }

    async fn insights(
        &self,
        token: &str,
        external_campaign_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<NormalizedInsight>> {
        let (customer_id, campaign_id) = split_campaign_ref(external_campaign_id);
        let response = self
            .client
            .insights(
                token,
                customer_id.unwrap_or_default(),
                campaign_id,
                start.date_naive(),
                end.date_naive(),
            )
            .await?;
        Ok(response
            .results
            .iter()
            .filter_map(to_normalized_insight)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, MockTransport};
    use std::sync::Arc;

    fn adapter(transport: &MockTransport) -> GoogleAdapter {
        GoogleAdapter::new(GoogleClient::new_with_transport(
            "client-id",
            "client-secret",
            "dev-token",
            "https://ads.test",
            "https://auth.test",
            "https://token.test/token",
            Arc::new(transport.clone()),
        ))
    }

    #[test]
    fn test_identity() {
        let transport = MockTransport::new();
        let adapter = adapter(&transport);
        assert_eq!(adapter.platform(), Platform::Google);
        assert_eq!(adapter.auth_type(), AuthType::OAuth);
    }

    #[tokio::test]
    async fn test_campaigns_carry_composite_ids() {
        let transport = MockTransport::new();
        let adapter = adapter(&transport);
        transport.push_json(
            HttpMethod::Post,
            "https://ads.test/v16/customers/555/googleAds:search",
            200,
            &serde_json::json!({"results": [
                {"campaign": {"id": "1", "name": "Brand", "status": "ENABLED"}},
                {"campaign": {"id": "2", "name": "Generic", "status": "UNDER_REVIEW"}}
            ]}),
        );

        let campaigns = adapter.campaigns("tok", "555").await.expect("campaigns");
        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns[0].external_campaign_id, "555:1");
        assert_eq!(campaigns[1].external_campaign_id, "555:2");
        assert_eq!(campaigns[1].status, crate::entity::CampaignStatus::Paused);
    }

    #[tokio::test]
    async fn test_insights_split_composite_reference() {
        let transport = MockTransport::new();
        let adapter = adapter(&transport);
        transport.push_json(
            HttpMethod::Post,
            "https://ads.test/v16/customers/555/googleAds:search",
            200,
            &serde_json::json!({"results": [{
                "metrics": {"costMicros": "1500000", "impressions": "10", "clicks": "2",
                            "conversions": 1.0, "conversionsValue": 5.0},
                "segments": {"date": "2026-07-01"}
            }]}),
        );

        let start = "2026-07-01T00:00:00Z".parse().unwrap();
        let end = "2026-07-02T00:00:00Z".parse().unwrap();
        let insights = adapter
            .insights("tok", "555:42", start, end)
            .await
            .expect("insights");

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].spend, 1.5);

        // The query must target the campaign id, not the composite.
        let body = String::from_utf8(transport.requests()[0].body.clone()).unwrap();
        assert!(body.contains("campaign.id = 42"));
        assert!(body.contains("BETWEEN '2026-07-01' AND '2026-07-02'"));
    }

    #[tokio::test]
    async fn test_insights_without_separator_use_empty_customer() {
        let transport = MockTransport::new();
        let adapter = adapter(&transport);
        transport.push_json(
            HttpMethod::Post,
            "https://ads.test/v16/customers//googleAds:search",
            200,
            &serde_json::json!({"results": []}),
        );

        let start = "2026-07-01T00:00:00Z".parse().unwrap();
        let end = "2026-07-02T00:00:00Z".parse().unwrap();
        let insights = adapter
            .insights("tok", "42", start, end)
            .await
            .expect("missing separator is handled, not thrown");
        assert!(insights.is_empty());
    }

    #[tokio::test]
    async fn test_ad_accounts_fetches_each_customer() {
        let transport = MockTransport::new();
        let adapter = adapter(&transport);
        transport.push_json(
            HttpMethod::Get,
            "https://ads.test/v16/customers:listAccessibleCustomers",
            200,
            &serde_json::json!({"resourceNames": ["customers/111", "customers/222"]}),
        );
        transport.push_json(
            HttpMethod::Post,
            "https://ads.test/v16/customers/111/googleAds:search",
            200,
            &serde_json::json!({"results": [{"customer": {
                "id": "111", "descriptiveName": "Serving", "currencyCode": "USD",
                "timeZone": "America/New_York", "manager": false, "status": "ENABLED"
            }}]}),
        );
        transport.push_json(
            HttpMethod::Post,
            "https://ads.test/v16/customers/222/googleAds:search",
            200,
            &serde_json::json!({"results": [{"customer": {
                "id": "222", "descriptiveName": "Manager", "currencyCode": "USD",
                "timeZone": "America/New_York", "manager": true, "status": "ENABLED"
            }}]}),
        );

        let accounts = adapter.ad_accounts("tok").await.expect("accounts");
        assert_eq!(accounts.len(), 2);
        assert!(accounts[0].is_active);
        assert!(!accounts[1].is_active);
    }
}
