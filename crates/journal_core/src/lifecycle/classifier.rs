//! Elapsed-day to zone classification.
//!
//! # Invariants
//! - Classification is monotonic: a later day never maps to an earlier zone.
//! - The zone table is validated once on first use; a malformed table panics
//!   because it is a programming error, not a runtime condition.

use crate::lifecycle::ladder::{Rung, StagedLadder};
use crate::lifecycle::{elapsed_units, DAY_MS};
use crate::model::zone::Zone;
use once_cell::sync::Lazy;

/// Inclusive last day of each zone; anything later is archived.
const ZONE_RULES: &[Rung<Zone>] = &[
    Rung { max: 3, stage: Zone::Une },
    Rung { max: 6, stage: Zone::FaceUne },
    Rung { max: 8, stage: Zone::Pages4To5 },
    Rung { max: 10, stage: Zone::Pages6To7 },
    Rung { max: 12, stage: Zone::Pages8To9 },
    Rung { max: 16, stage: Zone::Pages10To11 },
    Rung { max: 21, stage: Zone::Pages12To13 },
];

static ZONE_LADDER: Lazy<StagedLadder<Zone>> = Lazy::new(|| {
    StagedLadder::new(ZONE_RULES.to_vec(), Zone::Archives).expect("valid zone rule table")
});

/// Returns the validated zone ladder.
pub fn zone_ladder() -> &'static StagedLadder<Zone> {
    &ZONE_LADDER
}

/// Maps a 1-based lifecycle day to its zone. Day `0` behaves like day `1`.
pub fn classify(day: u32) -> Zone {
    ZONE_LADDER.stage_for(day)
}

/// Lifecycle day of an article: `max(1, ceil((now - published_at) / 1 day))`.
///
/// Day 1 is the publication day itself; future timestamps clamp to day 1.
pub fn elapsed_day(published_at: i64, now: i64) -> u32 {
    elapsed_units(published_at, now, DAY_MS)
}

/// Read-path zone, derived purely from elapsed time.
pub fn zone_at(published_at: i64, now: i64) -> Zone {
    classify(elapsed_day(published_at, now))
}

#[cfg(test)]
mod tests {
    use super::{classify, elapsed_day, zone_at, zone_ladder};
    use crate::lifecycle::DAY_MS;
    use crate::model::zone::Zone;

    const NOW: i64 = 1_760_000_000_000;

    #[test]
    fn boundaries_are_exact() {
        assert_eq!(classify(3), Zone::Une);
        assert_eq!(classify(4), Zone::FaceUne);
        assert_eq!(classify(6), Zone::FaceUne);
        assert_eq!(classify(7), Zone::Pages4To5);
        assert_eq!(classify(16), Zone::Pages10To11);
        assert_eq!(classify(21), Zone::Pages12To13);
        assert_eq!(classify(22), Zone::Archives);
    }

    #[test]
    fn non_positive_day_does_not_crash() {
        assert_eq!(classify(0), Zone::Une);
    }

    #[test]
    fn classification_is_monotonic() {
        let mut previous = classify(1).index();
        for day in 2..=60 {
            let current = classify(day).index();
            assert!(current >= previous, "day {day} moved backwards");
            previous = current;
        }
    }

    #[test]
    fn ladder_covers_every_zone_once() {
        assert_eq!(zone_ladder().stages().collect::<Vec<_>>(), Zone::ALL.to_vec());
    }

    #[test]
    fn elapsed_day_rounds_up_and_clamps() {
        assert_eq!(elapsed_day(NOW, NOW), 1);
        assert_eq!(elapsed_day(NOW + DAY_MS * 3, NOW), 1);
        assert_eq!(elapsed_day(NOW - 1, NOW), 1);
        assert_eq!(elapsed_day(NOW - DAY_MS, NOW), 1);
        assert_eq!(elapsed_day(NOW - DAY_MS - 1, NOW), 2);
        assert_eq!(elapsed_day(i64::MIN, NOW), u32::MAX);
    }

    #[test]
    fn item_published_seven_days_ago_is_on_pages_4_5() {
        let published_at = NOW - 7 * DAY_MS;
        assert_eq!(elapsed_day(published_at, NOW), 7);
        assert_eq!(zone_at(published_at, NOW), Zone::Pages4To5);
    }
}
