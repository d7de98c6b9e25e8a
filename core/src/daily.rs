use alloc::string::String;
use alloc::vec::Vec;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::*;

/// Text used when no usable quote is available, so there is always a puzzle.
pub const DEFAULT_TEXT: &str = "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG.";

/// Ordered collection of source texts for puzzles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBook {
    quotes: Vec<String>,
}

impl QuoteBook {
    /// Keeps only quotes a puzzle can be made from.
    pub fn new(quotes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let quotes = quotes
            .into_iter()
            .map(Into::into)
            .filter(|quote: &String| {
                let usable = quote.chars().any(|c| c.is_ascii_alphabetic());
                if !usable {
                    log::warn!("Skipping quote without letters: {:?}", quote);
                }
                usable
            })
            .collect();
        Self { quotes }
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Quote at `index` wrapping around the book, [`DEFAULT_TEXT`] if empty.
    pub fn get(&self, index: u64) -> &str {
        if self.quotes.is_empty() {
            return DEFAULT_TEXT;
        }
        let len = self.quotes.len() as u64;
        &self.quotes[(index % len) as usize]
    }

    /// Uniformly picks a quote for free play.
    pub fn pick(&self, seed: u64) -> &str {
        use rand::prelude::*;

        if self.quotes.is_empty() {
            return DEFAULT_TEXT;
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        &self.quotes[rng.random_range(0..self.quotes.len())]
    }

    pub fn random_puzzle(&self, config: GameConfig, seed: u64, now: Timestamp) -> Result<PuzzleState> {
        PuzzleState::new_at(self.pick(seed), config, seed, now)
    }
}

/// Maps calendar days to quotes so every player gets the same daily puzzle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySchedule {
    pub epoch: NaiveDate,
}

impl DailySchedule {
    pub const fn new(epoch: NaiveDate) -> Self {
        Self { epoch }
    }

    /// Days since the epoch, dates before it all map to day 0.
    pub fn day_index(&self, date: NaiveDate) -> u64 {
        date.signed_duration_since(self.epoch)
            .num_days()
            .try_into()
            .unwrap_or(0)
    }

    pub fn quote_for<'a>(&self, book: &'a QuoteBook, date: NaiveDate) -> &'a str {
        book.get(self.day_index(date))
    }

    /// Seed shared by every copy of the puzzle for `date`.
    pub fn seed_for(&self, date: NaiveDate) -> u64 {
        // splitmix64 finalizer
        let mut z = self.day_index(date).wrapping_add(0x9e37_79b9_7f4a_7c15);
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    pub fn puzzle_for(
        &self,
        book: &QuoteBook,
        date: NaiveDate,
        config: GameConfig,
        now: Timestamp,
    ) -> Result<PuzzleState> {
        log::debug!("Daily puzzle for {} is day {}", date, self.day_index(date));
        PuzzleState::new_at(self.quote_for(book, date), config, self.seed_for(date), now)
    }
}

impl Default for DailySchedule {
    fn default() -> Self {
        Self::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default())
    }
}
