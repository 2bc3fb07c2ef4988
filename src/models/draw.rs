//! Historical draw record model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest number that can be drawn.
pub const MAX_NUMBER: u8 = 45;

/// Main numbers drawn per period (the bonus ball is separate).
pub const NUMBERS_PER_DRAW: usize = 6;

/// Reasons a draw record violates the data model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Sequence number must be positive")]
    ZeroSequence,

    #[error("Draw #{sequence}: number {number} out of range 1-45")]
    OutOfRange { sequence: u32, number: u8 },

    #[error("Draw #{sequence}: number {number} appears more than once")]
    Duplicate { sequence: u32, number: u8 },

    #[error("Draw #{sequence}: main numbers are not sorted ascending")]
    Unsorted { sequence: u32 },

    #[error("Draw #{sequence}: bonus number {bonus} out of range 1-45")]
    BonusOutOfRange { sequence: u32, bonus: u8 },

    #[error("Draw #{sequence}: bonus number {bonus} repeats a main number")]
    BonusRepeated { sequence: u32, bonus: u8 },
}

/// One completed lottery draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    /// Draw number, increasing by one each week
    pub sequence_number: u32,

    /// Date the draw was held
    pub date: NaiveDate,

    /// Main numbers, sorted ascending
    pub numbers: [u8; NUMBERS_PER_DRAW],

    /// Bonus ball
    pub bonus_number: u8,
}

impl DrawRecord {
    /// Build a record, sorting the main numbers and checking every invariant.
    pub fn new(
        sequence_number: u32,
        date: NaiveDate,
        mut numbers: [u8; NUMBERS_PER_DRAW],
        bonus_number: u8,
    ) -> Result<Self, RecordError> {
        numbers.sort_unstable();
        let record = Self {
            sequence_number,
            date,
            numbers,
            bonus_number,
        };
        record.validate()?;
        Ok(record)
    }

    /// Check a record that may not have gone through [`DrawRecord::new`].
    pub fn validate(&self) -> Result<(), RecordError> {
        let sequence = self.sequence_number;
        if sequence == 0 {
            return Err(RecordError::ZeroSequence);
        }

        for &number in &self.numbers {
            if !is_valid_number(number) {
                return Err(RecordError::OutOfRange { sequence, number });
            }
        }

        for pair in self.numbers.windows(2) {
            if pair[0] == pair[1] {
                return Err(RecordError::Duplicate {
                    sequence,
                    number: pair[0],
                });
            }
            if pair[0] > pair[1] {
                return Err(RecordError::Unsorted { sequence });
            }
        }

        let bonus = self.bonus_number;
        if !is_valid_number(bonus) {
            return Err(RecordError::BonusOutOfRange { sequence, bonus });
        }
        if self.numbers.contains(&bonus) {
            return Err(RecordError::BonusRepeated { sequence, bonus });
        }

        Ok(())
    }

    /// Sum of the six main numbers.
    pub fn sum(&self) -> u32 {
        self.numbers.iter().map(|&n| n as u32).sum()
    }
}

/// Whether `number` is inside the drawable range.
pub fn is_valid_number(number: u8) -> bool {
    (1..=MAX_NUMBER).contains(&number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()
    }

    #[test]
    fn test_new_sorts_numbers() {
        let record = DrawRecord::new(1100, date(), [45, 3, 17, 9, 28, 1], 12).unwrap();
        assert_eq!(record.numbers, [1, 3, 9, 17, 28, 45]);
        assert_eq!(record.bonus_number, 12);
    }

    #[test]
    fn test_sum() {
        let record = DrawRecord::new(1, date(), [1, 2, 3, 4, 5, 6], 7).unwrap();
        assert_eq!(record.sum(), 21);

        let record = DrawRecord::new(2, date(), [40, 41, 42, 43, 44, 45], 1).unwrap();
        assert_eq!(record.sum(), 255);
    }

    #[test]
    fn test_zero_sequence_rejected() {
        let err = DrawRecord::new(0, date(), [1, 2, 3, 4, 5, 6], 7).unwrap_err();
        assert_eq!(err, RecordError::ZeroSequence);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = DrawRecord::new(5, date(), [0, 2, 3, 4, 5, 6], 7).unwrap_err();
        assert_eq!(err, RecordError::OutOfRange { sequence: 5, number: 0 });

        let err = DrawRecord::new(5, date(), [1, 2, 3, 4, 5, 46], 7).unwrap_err();
        assert_eq!(err, RecordError::OutOfRange { sequence: 5, number: 46 });
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = DrawRecord::new(5, date(), [1, 2, 2, 4, 5, 6], 7).unwrap_err();
        assert_eq!(err, RecordError::Duplicate { sequence: 5, number: 2 });
    }

    #[test]
    fn test_bonus_checks() {
        let err = DrawRecord::new(5, date(), [1, 2, 3, 4, 5, 6], 46).unwrap_err();
        assert_eq!(err, RecordError::BonusOutOfRange { sequence: 5, bonus: 46 });

        let err = DrawRecord::new(5, date(), [1, 2, 3, 4, 5, 6], 6).unwrap_err();
        assert_eq!(err, RecordError::BonusRepeated { sequence: 5, bonus: 6 });
    }

    #[test]
    fn test_validate_catches_unsorted_literal() {
        let record = DrawRecord {
            sequence_number: 9,
            date: date(),
            numbers: [6, 5, 4, 3, 2, 1],
            bonus_number: 7,
        };
        assert_eq!(record.validate(), Err(RecordError::Unsorted { sequence: 9 }));
    }

    #[test]
    fn test_draw_serialization() {
        let record = DrawRecord::new(1100, date(), [1, 2, 3, 4, 5, 6], 7).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"sequence_number\":1100"));
        assert!(json.contains("\"date\":\"2024-01-06\""));

        let parsed: DrawRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
