//! Environment-driven configuration for the daily lifecycle job.
//!
//! # Invariants
//! - The trigger secret is never empty.
//! - `log_dir`, when set, is absolute.

use crate::logging::default_log_level;
use crate::service::advance_service::AdvanceMode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_CRON_SECRET: &str = "JOURNAL_CRON_SECRET";
pub const ENV_DB_PATH: &str = "JOURNAL_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "JOURNAL_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "JOURNAL_LOG_DIR";
pub const ENV_ADVANCE_MODE: &str = "JOURNAL_ADVANCE_MODE";
pub const ENV_ONCE_PER_DAY: &str = "JOURNAL_ONCE_PER_DAY";

/// Configuration parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "missing required setting `{key}`"),
            Self::Invalid { key, value } => write!(f, "invalid value `{value}` for `{key}`"),
        }
    }
}

impl Error for ConfigError {}

/// Settings for one invocation of the daily job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub cron_secret: String,
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub advance_mode: AdvanceMode,
    pub once_per_day: bool,
}

impl JobConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let cron_secret = read(ENV_CRON_SECRET).ok_or(ConfigError::Missing(ENV_CRON_SECRET))?;
        let db_path = read(ENV_DB_PATH)
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing(ENV_DB_PATH))?;

        let log_level = read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string());

        let log_dir = match read(ENV_LOG_DIR) {
            Some(value) if Path::new(&value).is_absolute() => Some(PathBuf::from(value)),
            Some(value) => {
                return Err(ConfigError::Invalid {
                    key: ENV_LOG_DIR,
                    value,
                })
            }
            None => None,
        };

        let advance_mode = match read(ENV_ADVANCE_MODE) {
            Some(value) => AdvanceMode::parse(&value).ok_or(ConfigError::Invalid {
                key: ENV_ADVANCE_MODE,
                value,
            })?,
            None => AdvanceMode::default(),
        };

        let once_per_day = match read(ENV_ONCE_PER_DAY) {
            Some(value) => parse_flag(&value).ok_or(ConfigError::Invalid {
                key: ENV_ONCE_PER_DAY,
                value,
            })?,
            None => true,
        };

        Ok(Self {
            cron_secret,
            db_path,
            log_level,
            log_dir,
            advance_mode,
            once_per_day,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, JobConfig, ENV_CRON_SECRET, ENV_DB_PATH, ENV_LOG_DIR};
    use crate::service::advance_service::AdvanceMode;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_keys_are_absent() {
        let config = JobConfig::from_lookup(lookup(&[
            ("JOURNAL_CRON_SECRET", "s3cret"),
            ("JOURNAL_DB_PATH", "/tmp/journal.db"),
        ]))
        .expect("minimal config should parse");

        assert_eq!(config.cron_secret, "s3cret");
        assert_eq!(config.advance_mode, AdvanceMode::Increment);
        assert!(config.once_per_day);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn blank_secret_is_treated_as_missing() {
        let err = JobConfig::from_lookup(lookup(&[
            ("JOURNAL_CRON_SECRET", "   "),
            ("JOURNAL_DB_PATH", "/tmp/journal.db"),
        ]))
        .expect_err("blank secret must be rejected");
        assert_eq!(err, ConfigError::Missing(ENV_CRON_SECRET));

        let err = JobConfig::from_lookup(lookup(&[("JOURNAL_CRON_SECRET", "x")]))
            .expect_err("missing db path must be rejected");
        assert_eq!(err, ConfigError::Missing(ENV_DB_PATH));
    }

    #[test]
    fn invalid_values_are_reported_with_their_key() {
        let err = JobConfig::from_lookup(lookup(&[
            ("JOURNAL_CRON_SECRET", "x"),
            ("JOURNAL_DB_PATH", "/tmp/journal.db"),
            ("JOURNAL_LOG_DIR", "logs"),
        ]))
        .expect_err("relative log dir must be rejected");
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == ENV_LOG_DIR));

        let config = JobConfig::from_lookup(lookup(&[
            ("JOURNAL_CRON_SECRET", "x"),
            ("JOURNAL_DB_PATH", "/tmp/journal.db"),
            ("JOURNAL_ADVANCE_MODE", "recompute"),
            ("JOURNAL_ONCE_PER_DAY", "off"),
        ]))
        .expect("explicit settings should parse");
        assert_eq!(config.advance_mode, AdvanceMode::Recompute);
        assert!(!config.once_per_day);
    }
}
