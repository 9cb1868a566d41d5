//! Caller-owned best score.
//!
//! The engine only reports the current score; whoever persists the best
//! score loads it into a [`BestScore`], feeds it each turn's score, and
//! writes it back when [`BestScore::observe`] says it moved.

use serde::{Deserialize, Serialize};

use crate::Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestScore(Score);

impl BestScore {
    #[inline]
    pub fn new(best: Score) -> Self { BestScore(best) }

    #[inline]
    pub fn get(self) -> Score { self.0 }

    /// Record `score`; returns true if it beat the previous best.
    ///
    /// ```
    /// use grid_2048::best::BestScore;
    /// let mut best = BestScore::new(100);
    /// assert!(!best.observe(40));
    /// assert!(best.observe(120));
    /// assert_eq!(best.get(), 120);
    /// ```
    pub fn observe(&mut self, score: Score) -> bool {
        if score > self.0 {
            log::debug!("new best score {} (was {})", score, self.0);
            self.0 = score;
            true
        } else {
            false
        }
    }
}

impl From<Score> for BestScore {
    fn from(v: Score) -> Self { BestScore(v) }
}

impl From<BestScore> for Score {
    fn from(b: BestScore) -> Self { b.0 }
}
