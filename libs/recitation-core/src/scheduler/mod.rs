//! Review scheduling over [`MemoryCard`] records.
//!
//! Every operation here is a pure function from immutable inputs to a new
//! value; `review` returns a fresh card and never touches its input. Callers
//! own persistence and must serialize concurrent reviews of the same verse.

pub mod fsrs;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CardStatus, MemoryCard, Rating, ReviewCategory, VerseId};

use self::fsrs::{next_status, Fsrs};

/// Preview of the schedule one rating would produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalPreview {
    pub interval_days: f64,
    pub due: DateTime<Utc>,
}

/// What each of the four ratings would do to a card, without committing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingOptions {
    pub again: IntervalPreview,
    pub hard: IntervalPreview,
    pub good: IntervalPreview,
    pub easy: IntervalPreview,
}

/// Aggregate statistics over a set of cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyStats {
    pub total: usize,
    pub due_today: usize,
    pub new_cards: usize,
    pub learning: usize,
    pub review: usize,
    pub relearning: usize,
    /// Mean of the reviewed cards' running accuracy averages; 0 when no
    /// card has been reviewed.
    pub average_accuracy: f64,
    /// Mean difficulty over reviewed cards; 0 when no card has been
    /// reviewed.
    pub average_difficulty: f64,
}

/// Create the zero-state record for a verse the user starts memorizing.
/// The card is due immediately.
pub fn create_card(
    verse: VerseId,
    category: Option<ReviewCategory>,
    now: DateTime<Utc>,
) -> MemoryCard {
    MemoryCard {
        verse,
        status: CardStatus::New,
        stability: 0.0,
        difficulty: 0.0,
        elapsed_days: 0,
        scheduled_days: 0,
        reps: 0,
        lapses: 0,
        due: now,
        last_review: None,
        total_reviews: 0,
        average_accuracy: 0.0,
        category,
    }
}

/// Fractional days since the card's last review.
fn elapsed_days(card: &MemoryCard, now: DateTime<Utc>) -> f64 {
    match card.last_review {
        Some(last) => {
            let elapsed = now.signed_duration_since(last);
            (elapsed.num_seconds() as f64 / 86400.0).max(0.0)
        }
        None => 0.0,
    }
}

/// Stability, difficulty and interval the given rating would produce.
fn project(card: &MemoryCard, rating: Rating, now: DateTime<Utc>) -> (f64, f64, f64) {
    let model = Fsrs::default();
    let (stability, difficulty) = if card.reps == 0 || card.stability <= 0.0 {
        (
            model.initial_stability(rating),
            model.initial_difficulty(rating),
        )
    } else {
        model.next_memory(
            card.stability,
            card.difficulty,
            elapsed_days(card, now),
            rating,
        )
    };
    let interval = model.interval_days(stability, rating);
    (stability, difficulty, interval)
}

fn due_after(now: DateTime<Utc>, interval_days: f64) -> DateTime<Utc> {
    now + Duration::seconds((interval_days * 86400.0) as i64)
}

/// Apply one review to a card, returning the updated record.
///
/// `accuracy` is the comparator's percentage for this recitation and feeds
/// the card's running average; `rating` drives the decay model. The input
/// card is not modified.
pub fn review(card: &MemoryCard, rating: Rating, accuracy: u8, now: DateTime<Utc>) -> MemoryCard {
    let (stability, difficulty, interval) = project(card, rating, now);
    let lapses = if rating == Rating::Again {
        card.lapses + 1
    } else {
        card.lapses
    };
    let total_reviews = card.total_reviews + 1;
    let average_accuracy = (card.average_accuracy * card.total_reviews as f64
        + accuracy as f64)
        / total_reviews as f64;

    MemoryCard {
        verse: card.verse,
        status: next_status(card.status, rating),
        stability,
        difficulty,
        elapsed_days: elapsed_days(card, now) as i64,
        scheduled_days: interval.round() as i64,
        reps: card.reps + 1,
        lapses,
        due: due_after(now, interval),
        last_review: Some(now),
        total_reviews,
        average_accuracy,
        category: card.category,
    }
}

/// Estimated probability, 0-100, that the verse is still recalled.
///
/// A card with no decay state yet (never reviewed, stability zero) reads as
/// 100; otherwise the forgetting curve on elapsed time applies.
pub fn retrievability(card: &MemoryCard, now: DateTime<Utc>) -> u8 {
    if card.stability <= 0.0 || card.last_review.is_none() {
        return 100;
    }
    let model = Fsrs::default();
    let r = model.retrievability(elapsed_days(card, now), card.stability);
    (r * 100.0).round() as u8
}

/// Preview all four ratings without mutating the card. Consistent with
/// [`review`]: for any fixed card, again <= hard <= good <= easy intervals.
pub fn scheduling_options(card: &MemoryCard, now: DateTime<Utc>) -> SchedulingOptions {
    let preview = |rating: Rating| {
        let (_, _, interval) = project(card, rating, now);
        IntervalPreview {
            interval_days: interval,
            due: due_after(now, interval),
        }
    };
    SchedulingOptions {
        again: preview(Rating::Again),
        hard: preview(Rating::Hard),
        good: preview(Rating::Good),
        easy: preview(Rating::Easy),
    }
}

/// Cards due at or before `now`, ordered for presentation: never-reviewed
/// cards first, then by ascending due date, harder cards first within the
/// same due date.
pub fn due_cards(cards: &[MemoryCard], now: DateTime<Utc>) -> Vec<MemoryCard> {
    let mut due: Vec<MemoryCard> = cards.iter().filter(|c| c.due <= now).cloned().collect();
    due.sort_by(|a, b| {
        b.is_new()
            .cmp(&a.is_new())
            .then_with(|| a.due.cmp(&b.due))
            .then_with(|| {
                b.difficulty
                    .partial_cmp(&a.difficulty)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });
    due
}

/// Aggregate statistics over a card collection.
pub fn study_stats(cards: &[MemoryCard], now: DateTime<Utc>) -> StudyStats {
    let mut stats = StudyStats {
        total: cards.len(),
        due_today: 0,
        new_cards: 0,
        learning: 0,
        review: 0,
        relearning: 0,
        average_accuracy: 0.0,
        average_difficulty: 0.0,
    };

    let mut reviewed = 0usize;
    let mut accuracy_sum = 0.0;
    let mut difficulty_sum = 0.0;

    for card in cards {
        if card.due <= now {
            stats.due_today += 1;
        }
        match card.status {
            CardStatus::New => stats.new_cards += 1,
            CardStatus::Learning => stats.learning += 1,
            CardStatus::Review => stats.review += 1,
            CardStatus::Relearning => stats.relearning += 1,
        }
        if card.total_reviews > 0 {
            reviewed += 1;
            accuracy_sum += card.average_accuracy;
            difficulty_sum += card.difficulty;
        }
    }

    if reviewed > 0 {
        stats.average_accuracy = accuracy_sum / reviewed as f64;
        stats.average_difficulty = difficulty_sum / reviewed as f64;
    }

    stats
}
