//! Ledger of completed daily advancement runs.
//!
//! # Invariants
//! - At most one row per UTC calendar day (`run_day` is the primary key).
//! - A day is claimed by a single insert before any item is advanced, so two
//!   triggers for the same day cannot both win the claim.

use crate::repo::RepoResult;
use rusqlite::{params, Connection, OptionalExtension};

/// One recorded advancement run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRun {
    /// UTC calendar day, `YYYY-MM-DD`.
    pub run_day: String,
    /// Unix epoch milliseconds.
    pub ran_at: i64,
    pub processed_count: u32,
    pub advanced_count: u32,
    pub archived_count: u32,
    pub failed_count: u32,
}

/// Repository interface for the once-per-day run ledger.
pub trait JobRunRepository {
    fn has_run_on(&self, run_day: &str) -> RepoResult<bool>;
    /// Inserts an empty ledger row for `run_day`.
    ///
    /// Returns `false` without writing when the day is already claimed.
    fn claim_day(&self, run_day: &str, ran_at: i64) -> RepoResult<bool>;
    /// Drops the ledger row for `run_day` so the day can be claimed again.
    fn release_day(&self, run_day: &str) -> RepoResult<()>;
    /// Writes final counts for `run.run_day`, inserting the row if missing.
    fn record_run(&self, run: &JobRun) -> RepoResult<()>;
    fn get_run(&self, run_day: &str) -> RepoResult<Option<JobRun>>;
}

/// SQLite-backed run ledger.
pub struct SqliteJobRunRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteJobRunRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl JobRunRepository for SqliteJobRunRepository<'_> {
    fn has_run_on(&self, run_day: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM job_runs WHERE run_day = ?1);",
            [run_day],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn claim_day(&self, run_day: &str, ran_at: i64) -> RepoResult<bool> {
        let inserted = self.conn.execute(
            "INSERT INTO job_runs (
                run_day,
                ran_at,
                processed_count,
                advanced_count,
                archived_count,
                failed_count
            ) VALUES (?1, ?2, 0, 0, 0, 0)
            ON CONFLICT(run_day) DO NOTHING;",
            params![run_day, ran_at],
        )?;
        Ok(inserted == 1)
    }

    fn release_day(&self, run_day: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM job_runs WHERE run_day = ?1;", [run_day])?;
        Ok(())
    }

    fn record_run(&self, run: &JobRun) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO job_runs (
                run_day,
                ran_at,
                processed_count,
                advanced_count,
                archived_count,
                failed_count
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(run_day) DO UPDATE SET
                ran_at = excluded.ran_at,
                processed_count = excluded.processed_count,
                advanced_count = excluded.advanced_count,
                archived_count = excluded.archived_count,
                failed_count = excluded.failed_count;",
            params![
                run.run_day.as_str(),
                run.ran_at,
                i64::from(run.processed_count),
                i64::from(run.advanced_count),
                i64::from(run.archived_count),
                i64::from(run.failed_count),
            ],
        )?;
        Ok(())
    }

    fn get_run(&self, run_day: &str) -> RepoResult<Option<JobRun>> {
        let run = self
            .conn
            .query_row(
                "SELECT run_day, ran_at, processed_count, advanced_count, archived_count, failed_count
                 FROM job_runs
                 WHERE run_day = ?1;",
                [run_day],
                |row| {
                    Ok(JobRun {
                        run_day: row.get(0)?,
                        ran_at: row.get(1)?,
                        processed_count: row.get(2)?,
                        advanced_count: row.get(3)?,
                        archived_count: row.get(4)?,
                        failed_count: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(run)
    }
}
