//! Session-level glue: the compare-then-review convenience wrapper and the
//! caller-owned session progress record.
//!
//! The engine holds no state across calls; whatever "current session" means
//! lives in the caller and is threaded through these value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::comparison::{compare_recitation, ComparisonResult, Sensitivity};
use crate::scheduler::review;
use crate::types::{MemoryCard, Rating};

/// Everything one recitation produced: the word-level verdict, the rating
/// derived from it, and the rescheduled card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecitationReview {
    pub comparison: ComparisonResult,
    pub rating: Rating,
    pub card: MemoryCard,
}

/// Compare a transcript against the canonical verse and feed the resulting
/// accuracy straight into the scheduler.
pub fn review_recitation(
    card: &MemoryCard,
    canonical: &str,
    transcript: &str,
    sensitivity: Sensitivity,
    now: DateTime<Utc>,
) -> RecitationReview {
    let comparison = compare_recitation(canonical, transcript, sensitivity);
    let rating = Rating::from_accuracy(comparison.accuracy);
    let card = review(card, rating, comparison.accuracy, now);
    RecitationReview {
        comparison,
        rating,
        card,
    }
}

/// Caller-owned progress through a review session. `record` is pure and
/// returns the updated copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProgress {
    pub verses_reviewed: u32,
    pub perfect_count: u32,
    pub mistake_count: u32,
    pub accuracy_sum: u32,
}

impl SessionProgress {
    pub fn record(&self, comparison: &ComparisonResult) -> SessionProgress {
        SessionProgress {
            verses_reviewed: self.verses_reviewed + 1,
            perfect_count: self.perfect_count + u32::from(comparison.mistakes.is_empty()),
            mistake_count: self.mistake_count + comparison.mistakes.len() as u32,
            accuracy_sum: self.accuracy_sum + u32::from(comparison.accuracy),
        }
    }

    /// Mean accuracy over the session so far, 0 when nothing was reviewed.
    pub fn average_accuracy(&self) -> f64 {
        if self.verses_reviewed == 0 {
            0.0
        } else {
            f64::from(self.accuracy_sum) / f64::from(self.verses_reviewed)
        }
    }
}
