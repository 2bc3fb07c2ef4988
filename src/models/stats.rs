//! Derived draw statistics models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::NUMBERS_PER_DRAW;

/// A fixed, contiguous band of the number range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub lower: u8,
    pub upper: u8,
    pub label: &'static str,
}

impl Section {
    pub fn contains(&self, number: u8) -> bool {
        (self.lower..=self.upper).contains(&number)
    }
}

/// The five bands partitioning 1..=45, in display order.
pub const SECTIONS: [Section; 5] = [
    Section {
        lower: 1,
        upper: 10,
        label: "1-10",
    },
    Section {
        lower: 11,
        upper: 20,
        label: "11-20",
    },
    Section {
        lower: 21,
        upper: 30,
        label: "21-30",
    },
    Section {
        lower: 31,
        upper: 40,
        label: "31-40",
    },
    Section {
        lower: 41,
        upper: 45,
        label: "41-45",
    },
];

/// Index into [`SECTIONS`] of the band holding `number`.
pub fn section_index(number: u8) -> Option<usize> {
    SECTIONS.iter().position(|s| s.contains(number))
}

/// A frequently drawn number and how often it appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotNumber {
    pub number: u8,
    pub count: u32,
}

/// Occurrence count for one band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCount {
    pub label: String,
    pub lower: u8,
    pub upper: u8,
    pub count: u32,
}

impl SectionCount {
    pub fn empty(section: &Section) -> Self {
        Self {
            label: section.label.to_string(),
            lower: section.lower,
            upper: section.upper,
            count: 0,
        }
    }
}

/// Aggregate statistics over one most-recent-first window of draws.
///
/// Only meaningful relative to the exact window it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawStatistics {
    /// Sequence number of the most recent draw in the window
    pub latest_sequence_number: u32,

    /// Sequence number of the oldest draw in the window
    pub oldest_sequence_number: u32,

    /// Number of draws analysed
    pub draw_count: usize,

    /// Date of the most recent draw
    pub latest_date: NaiveDate,

    /// Main numbers of the most recent draw
    pub latest_numbers: [u8; NUMBERS_PER_DRAW],

    /// Bonus ball of the most recent draw
    pub latest_bonus: u8,

    /// Most frequent numbers, count descending
    pub hot_numbers: Vec<HotNumber>,

    /// Numbers absent or overdue, ascending
    pub cold_numbers: Vec<u8>,

    /// Main-number sums of the latest draws, oldest first
    pub recent_sums: Vec<u32>,

    /// Occurrences per band, in band order
    pub section_distribution: Vec<SectionCount>,
}

impl DrawStatistics {
    /// Total classified occurrences across all bands.
    pub fn section_total(&self) -> u32 {
        self.section_distribution.iter().map(|s| s.count).sum()
    }
}
