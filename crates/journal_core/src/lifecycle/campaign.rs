//! Week-based progress of advertising campaigns.
//!
//! Weeks use the same elapsed-unit bucketing as lifecycle days, with a
//! seven-day unit and a clamp to the planned duration.

use crate::lifecycle::{elapsed_units, DAY_MS};
use serde::{Deserialize, Serialize};

/// Milliseconds in one campaign week.
pub const WEEK_MS: i64 = 7 * DAY_MS;

/// Progress-bar projection of a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignProgress {
    pub current_week: u32,
    pub total_weeks: u32,
    /// Formatted as `S{current}/{total}`.
    pub label: String,
    /// Rounded half up, `0..=100`.
    pub percent: u32,
}

/// Computes `current_week = min(total, max(1, ceil(days / 7)))` with label and
/// percentage.
///
/// `total_weeks == 0` is undefined input and is treated as a one-week
/// campaign.
pub fn progress(campaign_start: i64, total_weeks: u32, now: i64) -> CampaignProgress {
    let total_weeks = total_weeks.max(1);
    let current_week = current_week(campaign_start, total_weeks, now);
    let percent = (200 * u64::from(current_week) + u64::from(total_weeks))
        / (2 * u64::from(total_weeks));

    CampaignProgress {
        current_week,
        total_weeks,
        label: format!("S{current_week}/{total_weeks}"),
        percent: u32::try_from(percent).unwrap_or(100),
    }
}

/// 1-based campaign week clamped to `total_weeks`.
pub fn current_week(campaign_start: i64, total_weeks: u32, now: i64) -> u32 {
    elapsed_units(campaign_start, now, WEEK_MS).min(total_weeks.max(1))
}
