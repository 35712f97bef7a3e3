//! Time-driven lifecycle computations.
//!
//! # Responsibility
//! - Map elapsed time to display zones and campaign weeks.
//! - Group articles into zone buckets for rendering.
//!
//! # Invariants
//! - Every function takes `now` explicitly; nothing reads the system clock.
//! - All functions here are total and side-effect free.

pub mod campaign;
pub mod classifier;
pub mod grouping;
pub mod ladder;

/// Milliseconds in one lifecycle day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// `ceil(elapsed / unit)` clamped to `1..=u32::MAX`; non-positive spans count
/// as the first unit.
pub(crate) fn elapsed_units(start: i64, now: i64, unit_ms: i64) -> u32 {
    let elapsed = now.saturating_sub(start);
    if elapsed <= 0 {
        return 1;
    }
    let units = elapsed / unit_ms + i64::from(elapsed % unit_ms != 0);
    u32::try_from(units).unwrap_or(u32::MAX).max(1)
}
