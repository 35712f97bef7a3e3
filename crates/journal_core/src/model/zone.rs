//! Display zones of the journal layout.
//!
//! # Responsibility
//! - Enumerate the eight fixed positions an article moves through.
//! - Provide exhaustive lookups for labels, ordinals and wire names.
//!
//! # Invariants
//! - Declaration order is layout order; `Ord` follows it.
//! - `Archives` is terminal.

use serde::{Deserialize, Serialize};

/// One of the eight display positions an article can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Zone {
    /// Front page.
    Une,
    /// Page facing the front page.
    FaceUne,
    #[serde(rename = "PAGES_4_5")]
    Pages4To5,
    #[serde(rename = "PAGES_6_7")]
    Pages6To7,
    #[serde(rename = "PAGES_8_9")]
    Pages8To9,
    #[serde(rename = "PAGES_10_11")]
    Pages10To11,
    #[serde(rename = "PAGES_12_13")]
    Pages12To13,
    /// Terminal zone; never advanced again.
    Archives,
}

impl Zone {
    /// Every zone in layout order.
    pub const ALL: [Zone; 8] = [
        Zone::Une,
        Zone::FaceUne,
        Zone::Pages4To5,
        Zone::Pages6To7,
        Zone::Pages8To9,
        Zone::Pages10To11,
        Zone::Pages12To13,
        Zone::Archives,
    ];

    /// Zero-based layout ordinal.
    pub fn index(self) -> usize {
        match self {
            Self::Une => 0,
            Self::FaceUne => 1,
            Self::Pages4To5 => 2,
            Self::Pages6To7 => 3,
            Self::Pages8To9 => 4,
            Self::Pages10To11 => 5,
            Self::Pages12To13 => 6,
            Self::Archives => 7,
        }
    }

    /// Reader-facing section title.
    pub fn label(self) -> &'static str {
        match self {
            Self::Une => "À la une",
            Self::FaceUne => "Face à la une",
            Self::Pages4To5 => "Pages 4-5",
            Self::Pages6To7 => "Pages 6-7",
            Self::Pages8To9 => "Pages 8-9",
            Self::Pages10To11 => "Pages 10-11",
            Self::Pages12To13 => "Pages 12-13",
            Self::Archives => "Archives",
        }
    }

    /// Stable identifier shared by storage and JSON payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Une => "UNE",
            Self::FaceUne => "FACE_UNE",
            Self::Pages4To5 => "PAGES_4_5",
            Self::Pages6To7 => "PAGES_6_7",
            Self::Pages8To9 => "PAGES_8_9",
            Self::Pages10To11 => "PAGES_10_11",
            Self::Pages12To13 => "PAGES_12_13",
            Self::Archives => "ARCHIVES",
        }
    }

    /// Parses a stable identifier back into a zone.
    pub fn parse(value: &str) -> Option<Zone> {
        Self::ALL.into_iter().find(|zone| zone.as_str() == value)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Archives)
    }
}
