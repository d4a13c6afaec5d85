//! Core recitation engine: verse verification and review scheduling.
//!
//! Provides:
//! - Arabic script normalization (diacritic stripping, letter-variant folding)
//! - Word-level recitation comparison via LCS alignment (Levenshtein similarity)
//! - FSRS-based review scheduling over per-verse memory cards
//! - Validated request types for the application boundary
//!
//! Everything is a pure function over value types; callers own persistence
//! and transcription.

pub mod comparison;
pub mod error;
pub mod normalize;
pub mod request;
pub mod scheduler;
pub mod session;
pub mod types;

pub use comparison::{
    compare_recitation, levenshtein_distance, word_similarity, ComparisonResult, MistakeKind,
    MistakeRecord, Sensitivity, Severity, WordResult, WordStatus,
};
pub use error::{Result, ValidationError};
pub use normalize::{has_marks, normalize, strip_marks, tokenize};
pub use request::{ReviewRequest, ValidatedReview};
pub use scheduler::{
    create_card, due_cards, retrievability, review, scheduling_options, study_stats,
    IntervalPreview, SchedulingOptions, StudyStats,
};
pub use session::{review_recitation, RecitationReview, SessionProgress};
pub use types::{CardStatus, MemoryCard, Rating, ReviewCategory, VerseId};
