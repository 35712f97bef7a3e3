//! Daily lifecycle advancement.
//!
//! # Responsibility
//! - Move every non-archived article one lifecycle step forward.
//! - Persist `(elapsed_day_count, zone)` transitions item by item.
//!
//! # Invariants
//! - A failed write on one item never aborts the rest of the batch.
//! - Archived items are never written.
//! - A stored day is never moved backwards; in `Recompute` mode an item whose
//!   stored day is ahead of elapsed time is left as is.
//! - In `Increment` mode two runs on the same day advance an item twice;
//!   callers must run the job once per calendar day.

use crate::lifecycle::classifier::{classify, elapsed_day};
use crate::model::content_item::ContentItem;
use crate::model::zone::Zone;
use crate::repo::content_repo::ContentRepository;
use crate::repo::RepoResult;
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// How the next lifecycle day is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceMode {
    /// `stored day + 1`; not idempotent.
    #[default]
    Increment,
    /// `elapsed_day(published_at, now)`; repeated runs converge.
    Recompute,
}

impl AdvanceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::Recompute => "recompute",
        }
    }

    pub fn parse(value: &str) -> Option<AdvanceMode> {
        match value.trim().to_ascii_lowercase().as_str() {
            "increment" => Some(Self::Increment),
            "recompute" => Some(Self::Recompute),
            _ => None,
        }
    }
}

/// Aggregate outcome of one advancement run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceReport {
    /// Non-archived items examined.
    pub processed_count: u32,
    /// Items that moved forward into a later non-terminal zone.
    pub advanced_count: u32,
    /// Items that reached `ARCHIVES` in this run.
    pub archived_count: u32,
    /// Items whose write failed and were left untouched.
    pub failed_count: u32,
    /// RFC 3339 UTC instant the run was evaluated at.
    pub timestamp: String,
}

/// Applies one lifecycle step to stored articles.
pub struct LifecycleAdvancer<R: ContentRepository> {
    repo: R,
    mode: AdvanceMode,
}

impl<R: ContentRepository> LifecycleAdvancer<R> {
    pub fn new(repo: R) -> Self {
        Self::with_mode(repo, AdvanceMode::default())
    }

    pub fn with_mode(repo: R, mode: AdvanceMode) -> Self {
        Self { repo, mode }
    }

    pub fn mode(&self) -> AdvanceMode {
        self.mode
    }

    /// Loads the non-archived working set and advances it.
    ///
    /// # Errors
    /// - Returns repository errors from the initial read only; per-item write
    ///   failures are counted in `failed_count`.
    pub fn advance_active(&self, now: i64) -> RepoResult<AdvanceReport> {
        let items = self.repo.list_active()?;
        Ok(self.advance(&items, now))
    }

    /// Advances the given items and persists each transition independently.
    pub fn advance(&self, items: &[ContentItem], now: i64) -> AdvanceReport {
        let started_at = Instant::now();
        info!(
            "event=lifecycle_advance module=service status=start mode={} items={}",
            self.mode.as_str(),
            items.len()
        );

        let mut report = AdvanceReport {
            timestamp: format_timestamp(now),
            ..AdvanceReport::default()
        };

        for item in items {
            if item.is_archived() {
                continue;
            }
            report.processed_count += 1;

            let new_day = self.next_day(item, now);
            if new_day < item.elapsed_day_count {
                debug!(
                    "event=lifecycle_advance_item module=service status=skipped reason=stored_day_ahead item_id={} stored_day={} day={}",
                    item.id, item.elapsed_day_count, new_day
                );
                continue;
            }
            let new_zone = classify(new_day);
            if new_day == item.elapsed_day_count && new_zone == item.zone {
                continue;
            }

            if let Err(err) = self.repo.update_lifecycle(item.id, new_day, new_zone) {
                report.failed_count += 1;
                warn!(
                    "event=lifecycle_advance_item module=service status=error item_id={} day={} zone={} error={}",
                    item.id,
                    new_day,
                    new_zone.as_str(),
                    err
                );
                continue;
            }

            if new_zone == Zone::Archives {
                report.archived_count += 1;
            } else if new_zone > item.zone {
                report.advanced_count += 1;
            }
        }

        info!(
            "event=lifecycle_advance module=service status=ok duration_ms={} processed={} advanced={} archived={} failed={}",
            started_at.elapsed().as_millis(),
            report.processed_count,
            report.advanced_count,
            report.archived_count,
            report.failed_count
        );

        report
    }

    fn next_day(&self, item: &ContentItem, now: i64) -> u32 {
        match self.mode {
            AdvanceMode::Increment => item.elapsed_day_count.saturating_add(1),
            AdvanceMode::Recompute => elapsed_day(item.published_at, now),
        }
    }
}

pub(crate) fn format_timestamp(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|instant| instant.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| epoch_ms.to_string())
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, AdvanceMode};

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!(AdvanceMode::parse(" Recompute "), Some(AdvanceMode::Recompute));
        assert_eq!(AdvanceMode::parse("increment"), Some(AdvanceMode::Increment));
        assert_eq!(AdvanceMode::parse("daily"), None);
    }

    #[test]
    fn timestamp_is_rfc3339_utc() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00.000Z");
    }
}
