//! Advertising campaign record.

use crate::lifecycle::campaign::{progress, CampaignProgress};
use crate::model::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CampaignId = Uuid;

/// Ad campaign with a planned duration in weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    /// Unix epoch milliseconds.
    pub campaign_start: i64,
    /// Planned duration; expected to be at least 1.
    pub campaign_weeks: u32,
}

impl Campaign {
    pub fn new(name: impl Into<String>, campaign_start: i64, campaign_weeks: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            campaign_start,
            campaign_weeks,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.campaign_weeks == 0 {
            return Err(ValidationError::ZeroCampaignWeeks);
        }
        Ok(())
    }

    /// Week-based progress as of `now`.
    pub fn progress(&self, now: i64) -> CampaignProgress {
        progress(self.campaign_start, self.campaign_weeks, now)
    }
}
