//! Command-line trigger for the journal lifecycle job.
//!
//! # Usage
//! - `journal_cli ping`: print core linkage info.
//! - `journal_cli advance [SECRET]`: run the daily job; the secret defaults to
//!   `JOURNAL_TRIGGER_SECRET` so it stays out of process listings.
//!
//! Prints a JSON body and exits `0` on success, `2` on rejection, `1` on
//! failure.

use journal_core::db::open_db;
use journal_core::{
    init_logging, DailyJob, JobConfig, JobError, LifecycleAdvancer, SqliteContentRepository,
    SqliteJobRunRepository,
};
use log::error;
use serde_json::json;
use std::process::ExitCode;

const ENV_TRIGGER_SECRET: &str = "JOURNAL_TRIGGER_SECRET";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("ping") | None => {
            println!("journal_core ping={}", journal_core::ping());
            println!("journal_core version={}", journal_core::core_version());
            ExitCode::SUCCESS
        }
        Some("advance") => {
            let presented = args
                .get(1)
                .cloned()
                .or_else(|| std::env::var(ENV_TRIGGER_SECRET).ok());
            run_advance(presented.as_deref())
        }
        Some(other) => {
            eprintln!("unknown command `{other}`; expected ping|advance");
            ExitCode::from(64)
        }
    }
}

fn run_advance(presented_secret: Option<&str>) -> ExitCode {
    let config = match JobConfig::from_env() {
        Ok(config) => config,
        Err(err) => return fail(500, &err.to_string()),
    };

    if let Some(log_dir) = config.log_dir.as_ref().and_then(|dir| dir.to_str()) {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=lifecycle_job module=cli status=error stage=open_db error={err}");
            return fail(500, &err.to_string());
        }
    };

    let advancer =
        LifecycleAdvancer::with_mode(SqliteContentRepository::new(&conn), config.advance_mode);
    let job = DailyJob::new(
        advancer,
        SqliteJobRunRepository::new(&conn),
        config.cron_secret.as_str(),
    )
    .once_per_day(config.once_per_day);

    let now = chrono::Utc::now().timestamp_millis();
    match job.run(presented_secret, now) {
        Ok(report) => {
            let body = json!({ "status": 200, "result": report });
            println!("{body}");
            ExitCode::SUCCESS
        }
        Err(err @ (JobError::Unauthorized | JobError::AlreadyRan { .. })) => {
            let body = json!({ "status": err.status_code(), "error": err.to_string() });
            println!("{body}");
            ExitCode::from(2)
        }
        Err(err) => fail(err.status_code(), &err.to_string()),
    }
}

fn fail(status: u16, message: &str) -> ExitCode {
    let body = json!({ "status": status, "error": message });
    println!("{body}");
    ExitCode::FAILURE
}
