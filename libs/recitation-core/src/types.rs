//! Core types for the memorization engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Address of a verse: chapter and verse number, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseId {
    pub surah: u16,
    pub ayah: u16,
}

impl VerseId {
    pub fn new(surah: u16, ayah: u16) -> Self {
        Self { surah, ayah }
    }
}

/// Card learning status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    New,
    Learning,
    Review,
    Relearning,
}

impl Default for CardStatus {
    fn default() -> Self {
        Self::New
    }
}

/// Rating for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    /// Convert to 4-point numeric value (1-4).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
        }
    }

    /// Create from 4-point numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Again),
            2 => Some(Self::Hard),
            3 => Some(Self::Good),
            4 => Some(Self::Easy),
            _ => None,
        }
    }

    /// Map a recitation accuracy percentage to a rating.
    ///
    /// This mapping is the bridge between the comparator and the scheduler
    /// and is a stable contract: >= 90 is Easy, 70-89 Good, 50-69 Hard,
    /// below 50 Again. Callers may override it by supplying an explicit
    /// rating instead.
    pub fn from_accuracy(accuracy: u8) -> Self {
        match accuracy {
            90..=u8::MAX => Self::Easy,
            70..=89 => Self::Good,
            50..=69 => Self::Hard,
            _ => Self::Again,
        }
    }
}

/// Curriculum bucket a verse is assigned to. Carried opaquely; the daily
/// planner owns the bucketing logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewCategory {
    /// New lesson.
    Sabaq,
    /// Recent review.
    Sabqi,
    /// Distant review.
    Manzil,
}

/// Per-verse memory record the scheduler transforms on each review.
///
/// The engine never stores these; callers persist the returned record.
/// Every field round-trips through serde losslessly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryCard {
    pub verse: VerseId,
    pub status: CardStatus,
    /// Days until recall probability decays to the target retention.
    /// Zero until the first review.
    pub stability: f64,
    /// How quickly stability grows on success, 1-10. Zero until the first
    /// review.
    pub difficulty: f64,
    /// Whole days between the last two reviews.
    pub elapsed_days: i64,
    /// Whole days until the next review, as last scheduled.
    pub scheduled_days: i64,
    pub reps: u32,
    pub lapses: u32,
    pub due: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review: Option<DateTime<Utc>>,
    pub total_reviews: u32,
    /// Running mean of every accuracy ever recorded against this card.
    pub average_accuracy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ReviewCategory>,
}

impl MemoryCard {
    /// Whether the card has never been reviewed.
    pub fn is_new(&self) -> bool {
        self.reps == 0
    }
}
