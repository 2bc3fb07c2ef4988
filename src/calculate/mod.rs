//! Draw statistics engine.
//!
//! Computes derived metrics from a window of draws:
//! - Hot numbers (frequency ranking)
//! - Cold numbers (absent or overdue)
//! - Recent sum trend
//! - Occurrences per number band
//!
//! Everything here is a pure function of its input. Accumulators are built
//! fresh on every call, so the engine can be used from concurrent requests.

pub mod summary;

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{
    section_index, DrawRecord, DrawStatistics, HotNumber, RecordError, SectionCount, MAX_NUMBER,
    SECTIONS,
};

pub use summary::render_summary;

/// How many hot numbers to report.
pub const HOT_NUMBER_LIMIT: usize = 5;

/// How many cold numbers to report.
pub const COLD_NUMBER_LIMIT: usize = 7;

/// A number last seen this many draws before the latest one is cold.
pub const COLD_THRESHOLD: u32 = 10;

/// How many of the latest draws feed the sum trend.
pub const RECENT_SUM_WINDOW: usize = 5;

/// Errors raised by [`analyze`].
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No draw records to analyze")]
    InsufficientData,

    #[error("Invalid draw record: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("Draws must be most-recent-first: #{current} follows #{previous}")]
    OutOfOrder { previous: u32, current: u32 },
}

/// Compute statistics over `records`.
///
/// `records` must be ordered most-recent-first with strictly decreasing
/// sequence numbers. The first sighting of a number during iteration is
/// therefore its latest appearance; violations are rejected rather than
/// silently producing wrong last-seen values.
pub fn analyze(records: &[DrawRecord]) -> Result<DrawStatistics, AnalysisError> {
    let (latest, oldest) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(AnalysisError::InsufficientData),
    };

    for record in records {
        record.validate()?;
    }
    for pair in records.windows(2) {
        if pair[1].sequence_number >= pair[0].sequence_number {
            return Err(AnalysisError::OutOfOrder {
                previous: pair[0].sequence_number,
                current: pair[1].sequence_number,
            });
        }
    }

    let latest_sequence = latest.sequence_number;

    let mut recent_sums: Vec<u32> = records
        .iter()
        .take(RECENT_SUM_WINDOW)
        .map(DrawRecord::sum)
        .collect();
    recent_sums.reverse();

    let mut counts: HashMap<u8, u32> = HashMap::new();
    let mut first_seen_order: Vec<u8> = Vec::new();
    let mut last_seen: HashMap<u8, u32> = HashMap::new();
    let mut sections: Vec<SectionCount> = SECTIONS.iter().map(SectionCount::empty).collect();

    for record in records {
        for &number in &record.numbers {
            let count = counts.entry(number).or_insert(0);
            if *count == 0 {
                first_seen_order.push(number);
            }
            *count += 1;

            last_seen.entry(number).or_insert(record.sequence_number);

            if let Some(idx) = section_index(number) {
                sections[idx].count += 1;
            }
        }
    }

    let mut ranked: Vec<HotNumber> = first_seen_order
        .iter()
        .map(|&number| HotNumber {
            number,
            count: counts.get(&number).copied().unwrap_or(0),
        })
        .collect();
    // Stable: equal counts keep first-seen order.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(HOT_NUMBER_LIMIT);

    let cold_numbers: Vec<u8> = (1..=MAX_NUMBER)
        .filter(|number| match last_seen.get(number) {
            None => true,
            Some(&seen) => latest_sequence - seen >= COLD_THRESHOLD,
        })
        .take(COLD_NUMBER_LIMIT)
        .collect();

    Ok(DrawStatistics {
        latest_sequence_number: latest_sequence,
        oldest_sequence_number: oldest.sequence_number,
        draw_count: records.len(),
        latest_date: latest.date,
        latest_numbers: latest.numbers,
        latest_bonus: latest.bonus_number,
        hot_numbers: ranked,
        cold_numbers,
        recent_sums,
        section_distribution: sections,
    })
}
