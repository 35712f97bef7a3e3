//! Domain model for journal articles and ad campaigns.
//!
//! # Responsibility
//! - Define the records the lifecycle engine reads and mutates.
//! - Keep timestamps as Unix epoch milliseconds throughout core.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - `published_at` and `campaign_start` never change once set.

pub mod campaign;
pub mod content_item;
pub mod zone;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Write-path validation failures for model records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    EmptyName,
    ZeroElapsedDay,
    ZeroCampaignWeeks,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title cannot be empty"),
            Self::EmptyName => write!(f, "campaign name cannot be empty"),
            Self::ZeroElapsedDay => write!(f, "elapsed_day_count must be at least 1"),
            Self::ZeroCampaignWeeks => write!(f, "campaign_weeks must be at least 1"),
        }
    }
}

impl Error for ValidationError {}
