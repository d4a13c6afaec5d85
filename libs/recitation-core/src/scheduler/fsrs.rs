//! FSRS-style decay model backing the review scheduler.
//!
//! DSR memory model: Difficulty (1-10), Stability (days until recall
//! probability drops to the target retention), Retrievability (current
//! recall probability).

use crate::types::{CardStatus, Rating};

/// Decay model with configurable parameters.
#[derive(Debug, Clone)]
pub struct Fsrs {
    /// Desired recall probability at review time.
    pub request_retention: f64,
    /// Hard ceiling on scheduled intervals, in days.
    pub maximum_interval: f64,
    /// FSRS-4.5 parameters (17 weights).
    pub w: [f64; 17],
}

impl Default for Fsrs {
    fn default() -> Self {
        Self {
            request_retention: 0.9,
            maximum_interval: 36500.0,
            w: [
                0.4, 0.6, 2.4, 5.8, // w[0-3]: initial stability for Again, Hard, Good, Easy
                4.93,  // w[4]: initial difficulty base
                0.94,  // w[5]: initial difficulty modifier
                0.86,  // w[6]: difficulty decay
                0.01,  // w[7]: mean reversion weight
                1.49,  // w[8]: stability exp base
                0.14,  // w[9]: stability decay
                0.94,  // w[10]: retrievability effect
                2.18,  // w[11]: forget stability base
                0.05,  // w[12]: difficulty on forget
                0.34,  // w[13]: stability on forget
                1.26,  // w[14]: retrievability on forget
                0.29,  // w[15]: hard penalty
                2.61,  // w[16]: easy bonus
            ],
        }
    }
}

impl Fsrs {
    /// Initial stability for a card's first review.
    /// S0(G) = w[G-1].
    pub fn initial_stability(&self, rating: Rating) -> f64 {
        self.w[rating.to_value() as usize - 1].max(0.1)
    }

    /// Initial difficulty for a card's first review.
    /// D0(G) = w[4] - w[5] * (G - 3), clamped to [1, 10].
    pub fn initial_difficulty(&self, rating: Rating) -> f64 {
        let d0 = self.w[4] - self.w[5] * (rating.to_value() as f64 - 3.0);
        d0.clamp(1.0, 10.0)
    }

    /// Difficulty after a review: mean reversion toward D0, then decay.
    /// D' = w[7] * D0(G) + (1 - w[7]) * D; D'' = D' - w[6] * (G - 3).
    pub fn next_difficulty(&self, current: f64, rating: Rating) -> f64 {
        let d0 = self.initial_difficulty(rating);
        let reverted = self.w[7] * d0 + (1.0 - self.w[7]) * current;
        let decayed = reverted - self.w[6] * (rating.to_value() as f64 - 3.0);
        decayed.clamp(1.0, 10.0)
    }

    /// Probability of recall after `elapsed_days` at the given stability.
    /// R = (1 + t / (9 * S))^(-1).
    pub fn retrievability(&self, elapsed_days: f64, stability: f64) -> f64 {
        if stability <= 0.0 {
            return 0.0;
        }
        let factor = 1.0 + elapsed_days / (9.0 * stability);
        factor.powf(-1.0)
    }

    /// Stability after a successful recall.
    /// S' = S * (e^w[8] * (11 - D) * S^(-w[9]) * (e^(w[10]*(1-R)) - 1) + 1),
    /// scaled by the hard penalty or easy bonus.
    fn next_stability_recall(
        &self,
        stability: f64,
        difficulty: f64,
        retrievability: f64,
        rating: Rating,
    ) -> f64 {
        let exp_w8 = self.w[8].exp();
        let d_factor = (11.0 - difficulty).max(0.1);
        let s_decay = stability.powf(-self.w[9]);
        let r_factor = (self.w[10] * (1.0 - retrievability)).exp() - 1.0;

        let growth = exp_w8 * d_factor * s_decay * r_factor + 1.0;

        let modifier = match rating {
            Rating::Hard => self.w[15],
            Rating::Easy => self.w[16],
            _ => 1.0,
        };

        (stability * growth * modifier).clamp(0.1, self.maximum_interval)
    }

    /// Stability after a lapse. Never exceeds the previous stability.
    /// S' = w[11] * D^(-w[12]) * ((S+1)^w[13] - 1) * e^(w[14]*(1-R)).
    fn next_stability_forget(&self, stability: f64, difficulty: f64, retrievability: f64) -> f64 {
        let d_factor = difficulty.max(1.0).powf(-self.w[12]);
        let s_factor = (stability + 1.0).powf(self.w[13]) - 1.0;
        let r_factor = (self.w[14] * (1.0 - retrievability)).exp();

        (self.w[11] * d_factor * s_factor * r_factor).clamp(0.1, stability.max(0.1))
    }

    /// Stability and difficulty after a non-first review.
    pub fn next_memory(
        &self,
        stability: f64,
        difficulty: f64,
        elapsed_days: f64,
        rating: Rating,
    ) -> (f64, f64) {
        let retrievability = self.retrievability(elapsed_days, stability);
        let new_difficulty = self.next_difficulty(difficulty, rating);
        let new_stability = if rating == Rating::Again {
            self.next_stability_forget(stability, difficulty, retrievability)
        } else {
            self.next_stability_recall(stability, difficulty, retrievability, rating)
        };
        (new_stability, new_difficulty)
    }

    /// Interval until recall probability decays to the target retention.
    /// I = 9 * S * (1/R - 1), clamped to [1, maximum].
    pub fn interval_from_stability(&self, stability: f64) -> f64 {
        if self.request_retention <= 0.0 || self.request_retention >= 1.0 {
            return stability;
        }
        let interval = 9.0 * stability * (1.0 / self.request_retention - 1.0);
        interval.clamp(1.0, self.maximum_interval)
    }

    /// Sub-day interval for a lapsed card, 10 minutes to 1 day.
    pub fn short_term_interval(&self, stability: f64) -> f64 {
        let minutes = (stability * 60.0).clamp(10.0, 1440.0);
        minutes / 1440.0
    }

    /// Scheduled interval in days for the given rating.
    pub fn interval_days(&self, stability: f64, rating: Rating) -> f64 {
        if rating == Rating::Again {
            self.short_term_interval(stability)
        } else {
            self.interval_from_stability(stability)
        }
    }
}

/// Status transition table. Again drops a Learning or Review card into
/// Relearning and holds a fresh card in Learning; every other rating
/// advances toward Review.
pub fn next_status(current: CardStatus, rating: Rating) -> CardStatus {
    match (current, rating) {
        (CardStatus::New, Rating::Again) => CardStatus::Learning,
        (CardStatus::New, _) => CardStatus::Review,
        (CardStatus::Learning, Rating::Again) => CardStatus::Relearning,
        (CardStatus::Learning, _) => CardStatus::Review,
        (CardStatus::Review, Rating::Again) => CardStatus::Relearning,
        (CardStatus::Review, _) => CardStatus::Review,
        (CardStatus::Relearning, Rating::Again) => CardStatus::Relearning,
        (CardStatus::Relearning, _) => CardStatus::Review,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_stability_increases_with_rating() {
        let fsrs = Fsrs::default();
        let s_again = fsrs.initial_stability(Rating::Again);
        let s_hard = fsrs.initial_stability(Rating::Hard);
        let s_good = fsrs.initial_stability(Rating::Good);
        let s_easy = fsrs.initial_stability(Rating::Easy);
        assert!(s_again < s_hard);
        assert!(s_hard < s_good);
        assert!(s_good < s_easy);
    }

    #[test]
    fn initial_difficulty_decreases_with_rating() {
        let fsrs = Fsrs::default();
        let d_again = fsrs.initial_difficulty(Rating::Again);
        let d_hard = fsrs.initial_difficulty(Rating::Hard);
        let d_good = fsrs.initial_difficulty(Rating::Good);
        let d_easy = fsrs.initial_difficulty(Rating::Easy);
        assert!(d_again > d_hard);
        assert!(d_hard > d_good);
        assert!(d_good > d_easy);
    }

    #[test]
    fn retrievability_formula() {
        let fsrs = Fsrs::default();
        // At t=0, R is 1.0.
        assert!((fsrs.retrievability(0.0, 10.0) - 1.0).abs() < 0.001);
        // At t = 9*S, R is 0.5.
        assert!((fsrs.retrievability(90.0, 10.0) - 0.5).abs() < 0.001);
        // Strictly decreasing in elapsed time.
        assert!(fsrs.retrievability(5.0, 10.0) > fsrs.retrievability(6.0, 10.0));
    }

    #[test]
    fn stability_grows_on_recall_and_shrinks_on_lapse() {
        let fsrs = Fsrs::default();
        let (s_good, _) = fsrs.next_memory(5.0, 5.0, 5.0, Rating::Good);
        assert!(s_good > 5.0);
        let (s_again, _) = fsrs.next_memory(10.0, 5.0, 10.0, Rating::Again);
        assert!(s_again < 10.0);
    }

    #[test]
    fn hard_penalty_and_easy_bonus_order_stability() {
        let fsrs = Fsrs::default();
        let (s_hard, _) = fsrs.next_memory(10.0, 5.0, 10.0, Rating::Hard);
        let (s_good, _) = fsrs.next_memory(10.0, 5.0, 10.0, Rating::Good);
        let (s_easy, _) = fsrs.next_memory(10.0, 5.0, 10.0, Rating::Easy);
        assert!(s_hard < s_good);
        assert!(s_good < s_easy);
    }

    #[test]
    fn difficulty_moves_with_rating_and_stays_clamped() {
        let fsrs = Fsrs::default();
        let (_, d_again) = fsrs.next_memory(5.0, 5.0, 5.0, Rating::Again);
        assert!(d_again > 5.0);
        let (_, d_easy) = fsrs.next_memory(5.0, 5.0, 5.0, Rating::Easy);
        assert!(d_easy < 5.0);

        let (_, d_max) = fsrs.next_memory(5.0, 10.0, 5.0, Rating::Again);
        assert!(d_max <= 10.0);
        let (_, d_min) = fsrs.next_memory(5.0, 1.0, 5.0, Rating::Easy);
        assert!(d_min >= 1.0);
    }

    #[test]
    fn interval_respects_bounds() {
        let fsrs = Fsrs::default();
        assert_eq!(fsrs.interval_from_stability(0.01), 1.0);
        assert_eq!(fsrs.interval_from_stability(50000.0), fsrs.maximum_interval);
        // Short-term interval stays under a day.
        assert!(fsrs.interval_days(100.0, Rating::Again) <= 1.0);
    }

    #[test]
    fn status_transitions() {
        use CardStatus::*;
        assert_eq!(next_status(New, Rating::Again), Learning);
        assert_eq!(next_status(New, Rating::Good), Review);
        assert_eq!(next_status(Learning, Rating::Again), Relearning);
        assert_eq!(next_status(Learning, Rating::Hard), Review);
        assert_eq!(next_status(Review, Rating::Again), Relearning);
        assert_eq!(next_status(Review, Rating::Easy), Review);
        assert_eq!(next_status(Relearning, Rating::Again), Relearning);
        assert_eq!(next_status(Relearning, Rating::Good), Review);
    }
}
