//! Error types for recitation-core.
//!
//! The engine's operations are total over their documented domain; the only
//! failure mode is caller misuse, caught at the boundary before a value
//! enters the core.

use thiserror::Error;

/// Result type alias using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Precondition violations rejected at the engine boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("accuracy {value} out of range 0-100")]
    AccuracyOutOfRange { value: u8 },

    #[error("invalid rating {value}, expected 1-4")]
    InvalidRating { value: u8 },

    #[error("surah {value} out of range 1-114")]
    SurahOutOfRange { value: u16 },

    #[error("ayah number must be at least 1")]
    AyahOutOfRange,
}
