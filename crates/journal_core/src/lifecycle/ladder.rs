//! Generic threshold ladder mapping a 1-based position to a stage.
//!
//! # Responsibility
//! - Hold an ordered rule table of `(max, stage)` rungs plus a terminal stage.
//! - Resolve a position to the first rung whose inclusive `max` covers it.
//!
//! # Invariants
//! - Rung `max` values are strictly ascending and never zero.
//! - Resolution is total: positions past the last rung map to the terminal
//!   stage, and position `0` resolves like position `1`.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// One ladder step: positions `<= max` (and above the previous rung) resolve
/// to `stage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rung<S> {
    pub max: u32,
    pub stage: S,
}

/// Structural defects of a rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LadderError {
    /// Table has no rungs.
    Empty,
    /// Rung at `index` has `max == 0`, so no position can reach it.
    ZeroThreshold { index: usize },
    /// Rung at `index` does not strictly exceed its predecessor.
    NotAscending { index: usize, previous: u32, max: u32 },
}

impl Display for LadderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "ladder has no rungs"),
            Self::ZeroThreshold { index } => write!(f, "rung {index} has a zero threshold"),
            Self::NotAscending {
                index,
                previous,
                max,
            } => write!(
                f,
                "rung {index} threshold {max} does not exceed previous threshold {previous}"
            ),
        }
    }
}

impl Error for LadderError {}

/// Ordered rule table with a terminal stage for everything beyond it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedLadder<S> {
    rungs: Vec<Rung<S>>,
    terminal: S,
}

impl<S: Copy + PartialEq> StagedLadder<S> {
    /// Builds and validates a ladder.
    ///
    /// # Errors
    /// - Returns `LadderError` when the table is empty, has a zero threshold,
    ///   or is not strictly ascending.
    pub fn new(rungs: Vec<Rung<S>>, terminal: S) -> Result<Self, LadderError> {
        let ladder = Self { rungs, terminal };
        ladder.validate()?;
        Ok(ladder)
    }

    /// Checks structural invariants of the rule table.
    pub fn validate(&self) -> Result<(), LadderError> {
        if self.rungs.is_empty() {
            return Err(LadderError::Empty);
        }

        let mut previous: Option<u32> = None;
        for (index, rung) in self.rungs.iter().enumerate() {
            if rung.max == 0 {
                return Err(LadderError::ZeroThreshold { index });
            }
            if let Some(previous) = previous {
                if rung.max <= previous {
                    return Err(LadderError::NotAscending {
                        index,
                        previous,
                        max: rung.max,
                    });
                }
            }
            previous = Some(rung.max);
        }

        Ok(())
    }

    /// Resolves a 1-based position to its stage.
    pub fn stage_for(&self, position: u32) -> S {
        let position = position.max(1);
        self.rungs
            .iter()
            .find(|rung| rung.max >= position)
            .map_or(self.terminal, |rung| rung.stage)
    }

    /// Stage reached after the last rung.
    pub fn terminal(&self) -> S {
        self.terminal
    }

    /// First stage on the ladder.
    pub fn first(&self) -> S {
        self.rungs.first().map_or(self.terminal, |rung| rung.stage)
    }

    /// Largest position still covered by a rung.
    pub fn last_threshold(&self) -> u32 {
        self.rungs.last().map_or(0, |rung| rung.max)
    }

    /// All stages in ladder order, terminal last.
    pub fn stages(&self) -> impl Iterator<Item = S> + '_ {
        self.rungs
            .iter()
            .map(|rung| rung.stage)
            .chain(std::iter::once(self.terminal))
    }

    /// Ladder ordinal of `stage`, or `None` when it is not on the ladder.
    pub fn index_of(&self, stage: S) -> Option<usize> {
        self.stages().position(|candidate| candidate == stage)
    }
}
