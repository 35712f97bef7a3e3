//! Content-lifecycle engine for the journal and ad campaigns.
//!
//! Articles move through eight display zones over a 21-day window and then
//! retire to the archive; campaigns report week-based progress. Every
//! computation takes `now` explicitly.

pub mod config;
pub mod db;
pub mod lifecycle;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, JobConfig};
pub use lifecycle::campaign::{progress, CampaignProgress};
pub use lifecycle::classifier::{classify, elapsed_day, zone_at};
pub use lifecycle::grouping::{group_by_zone, ZoneGroups};
pub use lifecycle::ladder::{LadderError, Rung, StagedLadder};
pub use lifecycle::DAY_MS;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::campaign::{Campaign, CampaignId};
pub use model::content_item::{ContentItem, ContentItemId};
pub use model::zone::Zone;
pub use model::ValidationError;
pub use repo::campaign_repo::{CampaignRepository, SqliteCampaignRepository};
pub use repo::content_repo::{ContentRepository, SqliteContentRepository};
pub use repo::job_run_repo::{JobRun, JobRunRepository, SqliteJobRunRepository};
pub use repo::{RepoError, RepoResult};
pub use service::advance_service::{AdvanceMode, AdvanceReport, LifecycleAdvancer};
pub use service::campaign_service::CampaignService;
pub use service::daily_job::{calendar_day, DailyJob, JobError};
pub use service::journal_service::JournalService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
