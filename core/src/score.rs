use serde::{Deserialize, Serialize};

use crate::*;

/// Points taken off the base score for every mistake.
pub const MISTAKE_PENALTY: i64 = 20;

/// How a winning score was put together.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: i64,
    pub time_bonus: i64,
    pub penalty: i64,
    pub elapsed_secs: u64,
}

impl ScoreBreakdown {
    /// Breakdown for a won puzzle, `None` for anything else.
    pub fn for_puzzle(puzzle: &PuzzleState) -> Option<Self> {
        if puzzle.outcome() != Outcome::Won {
            return None;
        }

        let elapsed_secs = puzzle.elapsed_secs().max(1);
        Some(Self {
            base: puzzle.difficulty().base_score().into(),
            time_bonus: time_bonus(elapsed_secs),
            penalty: i64::from(puzzle.mistake_count()).saturating_mul(MISTAKE_PENALTY),
            elapsed_secs,
        })
    }

    pub fn total(&self) -> u32 {
        let total = self.base - self.penalty + self.time_bonus;
        total.clamp(0, u32::MAX.into()).try_into().unwrap_or_default()
    }
}

pub const fn time_bonus(elapsed_secs: u64) -> i64 {
    match elapsed_secs {
        0..60 => 50,
        60..180 => 30,
        180..300 => 10,
        300..=600 => 0,
        _ => -20,
    }
}

/// Final score of a puzzle, 0 unless it was won.
pub fn calculate_score(puzzle: &PuzzleState) -> u32 {
    ScoreBreakdown::for_puzzle(puzzle)
        .map(|breakdown| breakdown.total())
        .unwrap_or(0)
}
