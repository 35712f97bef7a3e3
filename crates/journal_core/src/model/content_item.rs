//! Journal article lifecycle record.
//!
//! # Responsibility
//! - Carry the publication timestamp and the cached lifecycle position.
//!
//! # Invariants
//! - `elapsed_day_count >= 1`.
//! - After an advancer run `zone == classify(elapsed_day_count)`; between runs
//!   it may lag wall-clock time, so reads derive the zone from `published_at`.

use crate::lifecycle::classifier::{classify, zone_at};
use crate::model::zone::Zone;
use crate::model::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ContentItemId = Uuid;

/// Published journal article as seen by the lifecycle engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: ContentItemId,
    pub title: String,
    /// Unix epoch milliseconds.
    pub published_at: i64,
    /// 1-based lifecycle day, written only by the advancer.
    pub elapsed_day_count: u32,
    /// Cached zone, written only by the advancer.
    pub zone: Zone,
    /// Sponsored items sort first inside a zone.
    pub sponsored: bool,
}

impl ContentItem {
    /// Creates an article on its first lifecycle day with a generated ID.
    pub fn new(title: impl Into<String>, published_at: i64) -> Self {
        Self::with_id(Uuid::new_v4(), title, published_at)
    }

    /// Creates an article on its first lifecycle day with a caller-provided ID.
    pub fn with_id(id: ContentItemId, title: impl Into<String>, published_at: i64) -> Self {
        Self {
            id,
            title: title.into(),
            published_at,
            elapsed_day_count: 1,
            zone: classify(1),
            sponsored: false,
        }
    }

    pub fn sponsored(mut self, sponsored: bool) -> Self {
        self.sponsored = sponsored;
        self
    }

    /// Zone derived from wall-clock time rather than the cached field.
    pub fn current_zone(&self, now: i64) -> Zone {
        zone_at(self.published_at, now)
    }

    /// Checks write-path invariants before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.elapsed_day_count == 0 {
            return Err(ValidationError::ZeroElapsedDay);
        }
        Ok(())
    }

    pub fn is_archived(&self) -> bool {
        self.zone.is_terminal()
    }
}
