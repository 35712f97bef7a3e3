//! Campaign progress service.

use crate::lifecycle::campaign::CampaignProgress;
use crate::model::campaign::{Campaign, CampaignId};
use crate::repo::campaign_repo::CampaignRepository;
use crate::repo::RepoResult;

/// Campaign facade for creation and progress-bar queries.
pub struct CampaignService<R: CampaignRepository> {
    repo: R,
}

impl<R: CampaignRepository> CampaignService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_campaign(
        &self,
        name: impl Into<String>,
        campaign_start: i64,
        campaign_weeks: u32,
    ) -> RepoResult<Campaign> {
        let campaign = Campaign::new(name, campaign_start, campaign_weeks);
        self.repo.create_campaign(&campaign)?;
        Ok(campaign)
    }

    /// Progress of one campaign, or `None` when it does not exist.
    pub fn progress_of(&self, id: CampaignId, now: i64) -> RepoResult<Option<CampaignProgress>> {
        Ok(self
            .repo
            .get_campaign(id)?
            .map(|campaign| campaign.progress(now)))
    }

    /// Every campaign paired with its progress.
    pub fn list_progress(&self, now: i64) -> RepoResult<Vec<(Campaign, CampaignProgress)>> {
        Ok(self
            .repo
            .list_campaigns()?
            .into_iter()
            .map(|campaign| {
                let progress = campaign.progress(now);
                (campaign, progress)
            })
            .collect())
    }
}
