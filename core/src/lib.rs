#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use cipher::*;
pub use daily::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use score::*;
pub use stats::*;
pub use types::*;

mod analysis;
mod cipher;
mod daily;
mod engine;
mod error;
mod generator;
mod score;
mod stats;
mod types;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Mistakes allowed before the puzzle is lost.
    pub const fn mistake_limit(self) -> Count {
        match self {
            Self::Easy => 8,
            Self::Medium => 5,
            Self::Hard => 3,
        }
    }

    pub const fn base_score(self) -> u32 {
        match self {
            Self::Easy => 100,
            Self::Medium => 200,
            Self::Hard => 300,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub key_policy: KeyPolicy,
}

impl GameConfig {
    pub const fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            key_policy: KeyPolicy::Permissive,
        }
    }

    pub const fn with_key_policy(self, key_policy: KeyPolicy) -> Self {
        Self { key_policy, ..self }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    NoChange,
    Selected(Letter),
    Deselected,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GuessOutcome {
    NoChange,
    Correct,
    Incorrect,
    Won,
    Lost,
}

impl GuessOutcome {
    pub const fn has_update(self) -> bool {
        use GuessOutcome::*;
        match self {
            NoChange => false,
            Correct => true,
            Incorrect => true,
            Won => true,
            Lost => true,
        }
    }

    pub const fn was_correct(self) -> bool {
        matches!(self, Self::Correct | Self::Won)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum HintOutcome {
    NoChange,
    Revealed(Letter),
    Won(Letter),
    Lost(Letter),
}

impl HintOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// The ciphertext letter uncovered by the hint, if any.
    pub const fn revealed_letter(self) -> Option<Letter> {
        match self {
            Self::NoChange => None,
            Self::Revealed(letter) | Self::Won(letter) | Self::Lost(letter) => Some(letter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn difficulty_tables() {
        let limits: Vec<_> = Difficulty::ALL.iter().map(|d| d.mistake_limit()).collect();
        let bases: Vec<_> = Difficulty::ALL.iter().map(|d| d.base_score()).collect();
        assert_eq!(limits, [8, 5, 3]);
        assert_eq!(bases, [100, 200, 300]);
    }

    #[test]
    fn config_serializes_with_names() {
        let config = GameConfig::new(Difficulty::Hard).with_key_policy(KeyPolicy::Derangement);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"difficulty":"Hard","key_policy":"Derangement"}"#);
    }
}
