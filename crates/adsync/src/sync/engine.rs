//! Sync orchestrator.
//!
//! Walks an organization's active accounts, refreshes campaigns and
//! pulls a trailing window of daily insights, with per-entity failure
//! isolation:
//!
//! - a single insight failure is invisible outside its campaign's loop
//!   iteration;
//! - a campaign-sync failure fails only that account's report entry;
//! - one account's failure never prevents the remaining accounts from
//!   being processed.
//!
//! Accounts and campaigns are processed strictly sequentially, one
//! outstanding network call at a time. One slow account therefore delays
//! the accounts after it in the same call; that is a documented
//! trade-off, and the per-item loop body sits behind
//! [`for_each_isolated`] so a bounded-concurrency variant can replace
//! the iteration without changing the result contract.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::types::{
    AccountSyncResult, BulkSyncReport, CampaignSyncOutcome, DateRange, INSIGHT_CACHE_TTL_SECS,
    INSIGHT_WINDOW_DAYS, InsightSyncOutcome, SyncError,
};
use crate::entity::{AdAccount, Campaign};
use crate::platform::AdapterRegistry;
use crate::store::{
    AdAccountStore, CampaignStore, InsightStore, NewCampaign, NewInsight, SyncCache, TokenCipher,
};

/// Run `op` over each item in sequence, capturing per-item failures
/// instead of aborting the iteration.
///
/// The bulk driver's isolation contract lives here: callers get every
/// item back, paired with its outcome.
pub(crate) async fn for_each_isolated<T, R, Op, Fut>(
    items: Vec<T>,
    mut op: Op,
) -> Vec<(T, Result<R, SyncError>)>
where
    T: Clone,
    Op: FnMut(T) -> Fut,
    Fut: Future<Output = Result<R, SyncError>>,
{
    let mut results = Vec::with_capacity(items.len());
    for item in items {
        let outcome = op(item.clone()).await;
        results.push((item, outcome));
    }
    results
}

/// Orchestrates campaign and insight synchronization across the adapter
/// registry and the collaborator stores.
pub struct SyncEngine {
    registry: Arc<AdapterRegistry>,
    accounts: Arc<dyn AdAccountStore>,
    campaigns: Arc<dyn CampaignStore>,
    insights: Arc<dyn InsightStore>,
    cipher: Arc<dyn TokenCipher>,
    cache: Option<Arc<dyn SyncCache>>,
}

impl SyncEngine {
    pub fn new(
        registry: Arc<AdapterRegistry>,
        accounts: Arc<dyn AdAccountStore>,
        campaigns: Arc<dyn CampaignStore>,
        insights: Arc<dyn InsightStore>,
        cipher: Arc<dyn TokenCipher>,
    ) -> Self {
        Self {
            registry,
            accounts,
            campaigns,
            insights,
            cipher,
            cache: None,
        }
    }

    /// Attach the optional insight refetch-suppression cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn SyncCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Fetch one account's current campaign list and reconcile it
    /// against the stored records.
    ///
    /// A per-campaign store failure is appended to the outcome's
    /// `errors` and does not abort the remaining campaigns.
    pub async fn sync_campaigns(
        &self,
        ad_account_id: Uuid,
    ) -> Result<CampaignSyncOutcome, SyncError> {
        let account = self
            .accounts
            .find_by_id(ad_account_id)
            .await?
            .ok_or(SyncError::AccountNotFound(ad_account_id))?;

        let adapter = self.registry.adapter(account.platform)?;
        let token = self.cipher.decrypt(&account.access_token)?;

        let fetched = adapter
            .campaigns(&token, &account.external_account_id)
            .await?;
        tracing::debug!(
            account = %account.external_account_id,
            platform = %account.platform,
            count = fetched.len(),
            "reconciling campaigns"
        );

        let mut outcome = CampaignSyncOutcome::default();
        for normalized in fetched {
            let reconciled = self.reconcile_campaign(&account, &normalized).await;
            match reconciled {
                Ok(Reconciled::Created) => {
                    outcome.created += 1;
                    outcome.synced += 1;
                }
                Ok(Reconciled::Updated) => {
                    outcome.updated += 1;
                    outcome.synced += 1;
                }
                Ok(Reconciled::Unchanged) => outcome.synced += 1,
                Err(e) => {
                    tracing::warn!(
                        campaign = %normalized.external_campaign_id,
                        error = %e,
                        "campaign reconcile failed"
                    );
                    outcome
                        .errors
                        .push(format!("{}: {}", normalized.external_campaign_id, e));
                }
            }
        }
        Ok(outcome)
    }

    async fn reconcile_campaign(
        &self,
        account: &AdAccount,
        normalized: &crate::platform::NormalizedCampaign,
    ) -> Result<Reconciled, SyncError> {
        let existing = self
            .campaigns
            .find_by_external_id(account.id, &normalized.external_campaign_id)
            .await?;

        match existing {
            Some(mut campaign) => {
                if campaign.differs_from(&normalized.name, normalized.status) {
                    campaign.name = normalized.name.clone();
                    campaign.status = normalized.status;
                    campaign.updated_at = Utc::now();
                    self.campaigns.update(&campaign).await?;
                    Ok(Reconciled::Updated)
                } else {
                    Ok(Reconciled::Unchanged)
                }
            }
            None => {
                self.campaigns
                    .insert(NewCampaign {
                        ad_account_id: account.id,
                        external_campaign_id: normalized.external_campaign_id.clone(),
                        name: normalized.name.clone(),
                        status: normalized.status,
                    })
                    .await?;
                Ok(Reconciled::Created)
            }
        }
    }

    /// Pull one campaign's daily metrics over an explicit window and
    /// reconcile them against the stored records.
    pub async fn sync_insights(
        &self,
        campaign_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<InsightSyncOutcome, SyncError> {
        let date_range = DateRange { start, end };

        let campaign = self
            .campaigns
            .find_by_id(campaign_id)
            .await?
            .ok_or(SyncError::CampaignNotFound(campaign_id))?;
        let account = self
            .accounts
            .find_by_id(campaign.ad_account_id)
            .await?
            .ok_or(SyncError::AccountNotFound(campaign.ad_account_id))?;

        let cache_key = format!(
            "insights:{}:{}:{}",
            campaign.id,
            start.date_naive(),
            end.date_naive()
        );
        if let Some(cache) = &self.cache
            && cache.get(&cache_key).await.is_some()
        {
            tracing::debug!(campaign = %campaign.external_campaign_id, "insight window cached, skipping refetch");
            return Ok(InsightSyncOutcome::empty(date_range));
        }

        let adapter = self.registry.adapter(account.platform)?;
        let token = self.cipher.decrypt(&account.access_token)?;

        let fetched = adapter
            .insights(&token, &campaign.external_campaign_id, start, end)
            .await?;

        let mut outcome = InsightSyncOutcome::empty(date_range);
        for insight in fetched {
            let reconciled = self.reconcile_insight(&campaign, &insight).await;
            match reconciled {
                Ok(Reconciled::Created) => {
                    outcome.created += 1;
                    outcome.synced += 1;
                }
                Ok(Reconciled::Updated) => {
                    outcome.updated += 1;
                    outcome.synced += 1;
                }
                Ok(Reconciled::Unchanged) => outcome.synced += 1,
                Err(e) => outcome.errors.push(format!("{}: {}", insight.date, e)),
            }
        }

        if let Some(cache) = &self.cache
            && outcome.errors.is_empty()
        {
            cache.set(&cache_key, "1", INSIGHT_CACHE_TTL_SECS).await;
        }
        Ok(outcome)
    }

    async fn reconcile_insight(
        &self,
        campaign: &Campaign,
        normalized: &crate::platform::NormalizedInsight,
    ) -> Result<Reconciled, SyncError> {
        let existing = self
            .insights
            .find_by_date(campaign.id, normalized.date)
            .await?;

        match existing {
            Some(mut record) => {
                if record.differs_from(normalized) {
                    record.spend = normalized.spend;
                    record.impressions = normalized.impressions;
                    record.clicks = normalized.clicks;
                    record.conversions = normalized.conversions;
                    record.revenue = normalized.revenue;
                    self.insights.update(&record).await?;
                    Ok(Reconciled::Updated)
                } else {
                    Ok(Reconciled::Unchanged)
                }
            }
            None => {
                self.insights
                    .insert(NewInsight {
                        campaign_id: campaign.id,
                        date: normalized.date,
                        spend: normalized.spend,
                        impressions: normalized.impressions,
                        clicks: normalized.clicks,
                        conversions: normalized.conversions,
                        revenue: normalized.revenue,
                    })
                    .await?;
                Ok(Reconciled::Created)
            }
        }
    }

    /// Bulk driver: sync every active account of an organization,
    /// anchored at the current instant.
    pub async fn sync_all_active_accounts(
        &self,
        organization_id: Uuid,
        platform: Option<crate::entity::Platform>,
    ) -> Result<BulkSyncReport, SyncError> {
        self.sync_all_active_accounts_at(organization_id, platform, Utc::now())
            .await
    }

    /// Bulk driver anchored at an explicit instant.
    ///
    /// Only the initial account-list load can fail this call; every
    /// per-account failure is captured in the report.
    pub async fn sync_all_active_accounts_at(
        &self,
        organization_id: Uuid,
        platform: Option<crate::entity::Platform>,
        now: DateTime<Utc>,
    ) -> Result<BulkSyncReport, SyncError> {
        let accounts = self
            .accounts
            .find_active_by_organization(organization_id, platform)
            .await?;
        let total_accounts = accounts.len();
        let window_start = now - Duration::days(INSIGHT_WINDOW_DAYS);

        tracing::debug!(%organization_id, total_accounts, "starting bulk sync");

        let outcomes = for_each_isolated(accounts, |account| {
            self.sync_account(account, window_start, now)
        })
        .await;

        let mut report = BulkSyncReport {
            total_accounts,
            successful: 0,
            failed: 0,
            results: Vec::with_capacity(total_accounts),
        };
        for (account, outcome) in outcomes {
            match outcome {
                Ok(tally) => {
                    report.successful += 1;
                    report.results.push(AccountSyncResult {
                        ad_account_id: account.id,
                        account_name: account.name,
                        campaigns: Some(tally),
                        error: None,
                    });
                }
                Err(e) => {
                    tracing::warn!(account = %account.name, error = %e, "account sync failed");
                    report.failed += 1;
                    report.results.push(AccountSyncResult {
                        ad_account_id: account.id,
                        account_name: account.name,
                        campaigns: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }
        Ok(report)
    }

    /// One account's bulk-sync body: campaigns first, then a trailing
    /// insight window per active campaign. Individual insight failures
    /// are swallowed and never affect the account's classification.
    async fn sync_account(
        &self,
        account: AdAccount,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<CampaignSyncOutcome, SyncError> {
        let tally = self.sync_campaigns(account.id).await?;

        let active = self.campaigns.find_active(account.id).await?;
        for campaign in active {
            if let Err(e) = self
                .sync_insights(campaign.id, window_start, window_end)
                .await
            {
                tracing::warn!(
                    campaign = %campaign.external_campaign_id,
                    error = %e,
                    "insight sync failed, continuing with remaining campaigns"
                );
            }
        }
        Ok(tally)
    }
}

/// What reconciling one record did.
enum Reconciled {
    Created,
    Updated,
    Unchanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_for_each_isolated_captures_failures_in_order() {
        let items = vec![1u32, 2, 3];
        let results = for_each_isolated(items, |n| async move {
            if n == 2 {
                Err(SyncError::AccountNotFound(Uuid::nil()))
            } else {
                Ok(n * 10)
            }
        })
        .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, 1);
        assert_eq!(*results[0].1.as_ref().unwrap(), 10);
        assert!(results[1].1.is_err());
        assert_eq!(*results[2].1.as_ref().unwrap(), 30);
    }

    #[tokio::test]
    async fn test_for_each_isolated_empty_input() {
        let results: Vec<(u32, Result<u32, SyncError>)> =
            for_each_isolated(Vec::new(), |n| async move { Ok(n) }).await;
        assert!(results.is_empty());
    }
}
