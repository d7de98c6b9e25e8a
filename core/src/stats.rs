use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifetime results for one player. Every played game is exactly one of won,
/// lost or practiced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    #[serde(default)]
    pub games_practiced: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_score: u64,
    pub best_score: u32,
    pub last_daily: Option<NaiveDate>,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a finished puzzle, unfinished ones are ignored.
    ///
    /// A practice game counts as played and practiced, but never as a win and
    /// never scores.
    pub fn record(&mut self, puzzle: &PuzzleState) -> MarkOutcome {
        if !puzzle.is_finished() {
            return MarkOutcome::NoChange;
        }

        self.games_played = self.games_played.saturating_add(1);
        match puzzle.outcome() {
            Outcome::Won if !puzzle.is_practice() => {
                let score = puzzle.score();
                self.games_won = self.games_won.saturating_add(1);
                self.total_score = self.total_score.saturating_add(score.into());
                self.best_score = self.best_score.max(score);
            }
            Outcome::Won => self.games_practiced = self.games_practiced.saturating_add(1),
            _ => self.games_lost = self.games_lost.saturating_add(1),
        }
        MarkOutcome::Changed
    }

    /// Counts a finished daily puzzle played on `date` and updates the streak.
    ///
    /// Replaying a day that was already completed changes nothing.
    pub fn record_daily(&mut self, puzzle: &PuzzleState, date: NaiveDate) -> MarkOutcome {
        if !puzzle.is_finished() {
            return MarkOutcome::NoChange;
        }
        if self.last_daily.is_some_and(|last| last >= date) {
            log::debug!("Daily for {} already recorded", date);
            return MarkOutcome::NoChange;
        }

        self.record(puzzle);
        let won = puzzle.outcome() == Outcome::Won && !puzzle.is_practice();
        let continues = self
            .last_daily
            .and_then(|last| last.succ_opt())
            .is_some_and(|next| next == date);

        self.current_streak = match (won, continues) {
            (false, _) => 0,
            (true, true) => self.current_streak.saturating_add(1),
            (true, false) => 1,
        };
        self.best_streak = self.best_streak.max(self.current_streak);
        self.last_daily = Some(date);
        log::debug!("Daily streak is now {}", self.current_streak);
        MarkOutcome::Changed
    }

    pub fn win_ratio(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.games_won) / f64::from(self.games_played)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn shifted() -> Substitution {
        let mut encrypt = ALPHABET;
        encrypt.rotate_left(1);
        Substitution::from_permutation(encrypt).unwrap()
    }

    fn won() -> PuzzleState {
        let mut puzzle =
            PuzzleState::from_generator("A", Difficulty::Easy, shifted(), 0, Timestamp::default())
                .unwrap();
        puzzle.select_letter('B');
        puzzle.guess_at('A', Timestamp::from_secs(10));
        puzzle
    }

    fn lost() -> PuzzleState {
        let mut puzzle =
            PuzzleState::from_generator("A", Difficulty::Hard, shifted(), 0, Timestamp::default())
                .unwrap();
        for _ in 0..3 {
            puzzle.select_letter('B');
            puzzle.guess_at('Q', Timestamp::from_secs(10));
        }
        puzzle
    }

    #[test]
    fn record_counts_finished_games_only() {
        let mut stats = PlayerStats::new();
        let unfinished =
            PuzzleState::from_generator("A", Difficulty::Easy, shifted(), 0, Timestamp::default())
                .unwrap();

        assert_eq!(stats.record(&unfinished), MarkOutcome::NoChange);
        assert_eq!(stats.record(&won()), MarkOutcome::Changed);
        assert_eq!(stats.record(&lost()), MarkOutcome::Changed);

        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.games_won, 1);
        assert_eq!(stats.games_lost, 1);
        assert_eq!(stats.total_score, 150);
        assert_eq!(stats.best_score, 150);
        assert_eq!(stats.win_ratio(), 0.5);
    }

    #[test]
    fn consecutive_daily_wins_extend_streak() {
        let mut stats = PlayerStats::new();

        stats.record_daily(&won(), date(1));
        stats.record_daily(&won(), date(2));
        stats.record_daily(&won(), date(3));

        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.best_streak, 3);
    }

    #[test]
    fn gap_or_loss_resets_streak() {
        let mut stats = PlayerStats::new();
        stats.record_daily(&won(), date(1));
        stats.record_daily(&won(), date(2));

        stats.record_daily(&won(), date(5));
        assert_eq!(stats.current_streak, 1);

        stats.record_daily(&lost(), date(6));
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.best_streak, 2);
    }

    #[test]
    fn same_day_is_recorded_once() {
        let mut stats = PlayerStats::new();
        stats.record_daily(&won(), date(1));

        assert_eq!(stats.record_daily(&won(), date(1)), MarkOutcome::NoChange);
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn practice_win_breaks_streak_without_scoring() {
        let mut stats = PlayerStats::new();
        stats.record_daily(&won(), date(1));

        let mut practice = lost();
        practice.enter_practice_mode();
        practice.select_letter('B');
        practice.guess_at('A', Timestamp::from_secs(20));
        assert_eq!(practice.outcome(), Outcome::Won);

        stats.record_daily(&practice, date(2));

        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.games_won, 1);
        assert_eq!(stats.games_practiced, 1);
        assert_eq!(stats.total_score, 150);
        assert_eq!(
            stats.games_won + stats.games_lost + stats.games_practiced,
            stats.games_played
        );
    }
}
