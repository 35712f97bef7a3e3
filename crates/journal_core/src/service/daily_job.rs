//! Externally triggered daily advancement job.
//!
//! # Responsibility
//! - Authorize the trigger with a shared secret before touching storage.
//! - Optionally refuse a second run on the same UTC calendar day.
//! - Run the advancer and record the run in the ledger.
//!
//! # Invariants
//! - Unauthorized triggers have no side effects.
//! - With the guard on, the calendar day is claimed before any item is
//!   advanced; a failed claim or a lost race advances nothing.
//! - Secret comparison is constant-time for equal-length inputs.

use crate::repo::content_repo::ContentRepository;
use crate::repo::job_run_repo::{JobRun, JobRunRepository};
use crate::repo::RepoError;
use crate::service::advance_service::{AdvanceReport, LifecycleAdvancer};
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use subtle::ConstantTimeEq;

/// Job failures, each mapped to an HTTP-style status for the trigger caller.
#[derive(Debug)]
pub enum JobError {
    /// Missing or wrong trigger secret.
    Unauthorized,
    /// A run is already recorded for this UTC calendar day.
    AlreadyRan { run_day: String },
    /// `now` cannot be represented as a calendar instant.
    InvalidClock(i64),
    /// Storage failure before or after the batch.
    Repo(RepoError),
}

impl JobError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::AlreadyRan { .. } => 409,
            Self::InvalidClock(_) | Self::Repo(_) => 500,
        }
    }
}

impl Display for JobError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "unauthorized trigger"),
            Self::AlreadyRan { run_day } => write!(f, "lifecycle job already ran on {run_day}"),
            Self::InvalidClock(now) => write!(f, "timestamp {now} is out of calendar range"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for JobError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Daily job wiring the advancer to its trigger and run ledger.
pub struct DailyJob<C: ContentRepository, J: JobRunRepository> {
    advancer: LifecycleAdvancer<C>,
    runs: J,
    secret: String,
    once_per_day: bool,
}

impl<C: ContentRepository, J: JobRunRepository> DailyJob<C, J> {
    pub fn new(advancer: LifecycleAdvancer<C>, runs: J, secret: impl Into<String>) -> Self {
        Self {
            advancer,
            runs,
            secret: secret.into(),
            once_per_day: true,
        }
    }

    /// Enables or disables the once-per-calendar-day guard.
    pub fn once_per_day(mut self, enabled: bool) -> Self {
        self.once_per_day = enabled;
        self
    }

    /// Runs the job for `now` when `presented_secret` matches.
    ///
    /// # Errors
    /// - `Unauthorized` before any storage access when the secret is wrong.
    /// - `AlreadyRan` when the guard is on and today is already claimed.
    /// - `Repo` when the day cannot be claimed or the working set cannot be
    ///   read. A failure to write final counts is logged, not returned.
    pub fn run(&self, presented_secret: Option<&str>, now: i64) -> Result<AdvanceReport, JobError> {
        if !self.is_authorized(presented_secret) {
            warn!("event=lifecycle_job module=service status=rejected reason=unauthorized");
            return Err(JobError::Unauthorized);
        }

        let run_day = calendar_day(now)?;
        if self.once_per_day && !self.runs.claim_day(&run_day, now)? {
            info!("event=lifecycle_job module=service status=skipped reason=already_ran run_day={run_day}");
            return Err(JobError::AlreadyRan { run_day });
        }

        let report = match self.advancer.advance_active(now) {
            Ok(report) => report,
            Err(err) => {
                error!("event=lifecycle_job module=service status=error stage=load error={err}");
                if self.once_per_day {
                    if let Err(release_err) = self.runs.release_day(&run_day) {
                        error!(
                            "event=lifecycle_job module=service status=error stage=release run_day={run_day} error={release_err}"
                        );
                    }
                }
                return Err(err.into());
            }
        };

        let run = JobRun {
            run_day: run_day.clone(),
            ran_at: now,
            processed_count: report.processed_count,
            advanced_count: report.advanced_count,
            archived_count: report.archived_count,
            failed_count: report.failed_count,
        };
        // Items are already advanced and the day stays claimed; only the
        // ledger counts are lost.
        if let Err(err) = self.runs.record_run(&run) {
            error!(
                "event=lifecycle_job module=service status=error stage=record run_day={run_day} error={err}"
            );
        }

        info!(
            "event=lifecycle_job module=service status=ok run_day={} processed={} advanced={} archived={} failed={}",
            run_day,
            report.processed_count,
            report.advanced_count,
            report.archived_count,
            report.failed_count
        );
        Ok(report)
    }

    fn is_authorized(&self, presented_secret: Option<&str>) -> bool {
        match presented_secret {
            Some(presented) if !self.secret.is_empty() => {
                bool::from(presented.as_bytes().ct_eq(self.secret.as_bytes()))
            }
            _ => false,
        }
    }
}

/// UTC calendar day of an epoch-millisecond instant, `YYYY-MM-DD`.
pub fn calendar_day(now: i64) -> Result<String, JobError> {
    DateTime::<Utc>::from_timestamp_millis(now)
        .map(|instant| instant.format("%Y-%m-%d").to_string())
        .ok_or(JobError::InvalidClock(now))
}
