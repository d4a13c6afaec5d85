//! Validated request schema at the engine boundary.
//!
//! The core's functions are total over their documented domain, so range
//! checks happen here, once, before a value reaches them.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::types::{Rating, VerseId};

/// Number of surahs in the mushaf.
pub const SURAH_COUNT: u16 = 114;

/// A review submission as it arrives from a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub surah: u16,
    pub ayah: u16,
    /// Comparator accuracy percentage, 0-100.
    pub accuracy: u8,
    /// Explicit rating override, 1-4. When absent the rating is derived
    /// from the accuracy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// A review request whose fields have all been range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedReview {
    pub verse: VerseId,
    pub accuracy: u8,
    pub rating: Rating,
}

impl ReviewRequest {
    /// Range-check every field and resolve the effective rating.
    pub fn validate(&self) -> Result<ValidatedReview> {
        if !(1..=SURAH_COUNT).contains(&self.surah) {
            return Err(ValidationError::SurahOutOfRange { value: self.surah });
        }
        if self.ayah == 0 {
            return Err(ValidationError::AyahOutOfRange);
        }
        if self.accuracy > 100 {
            return Err(ValidationError::AccuracyOutOfRange {
                value: self.accuracy,
            });
        }
        let rating = match self.rating {
            Some(value) => {
                Rating::from_value(value).ok_or(ValidationError::InvalidRating { value })?
            }
            None => Rating::from_accuracy(self.accuracy),
        };
        Ok(ValidatedReview {
            verse: VerseId::new(self.surah, self.ayah),
            accuracy: self.accuracy,
            rating,
        })
    }
}
