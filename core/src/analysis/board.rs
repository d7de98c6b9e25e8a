use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer needs to draw a single ciphertext letter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterTile {
    pub cipher: Letter,
    pub frequency: usize,
    pub revealed: Option<Letter>,
    pub wrong_attempts: BTreeSet<Letter>,
    pub selected: bool,
}

/// Read-only projection of a puzzle for building the letter grids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LetterBoard {
    pub tiles: Vec<LetterTile>,
    /// Plaintext letters already placed by reveals, these can be greyed out
    /// on the keyboard.
    pub used_plain: BTreeSet<Letter>,
    pub display: String,
    pub completion: f64,
    pub mistakes_left: Count,
    pub outcome: Outcome,
}

impl LetterBoard {
    pub fn from_puzzle(puzzle: &PuzzleState) -> Self {
        Self::from_puzzle_with_placeholder(puzzle, DEFAULT_PLACEHOLDER)
    }

    pub fn from_puzzle_with_placeholder(puzzle: &PuzzleState, placeholder: char) -> Self {
        let tiles = puzzle
            .unique_cipher_letters()
            .into_iter()
            .map(|cipher| LetterTile {
                cipher,
                frequency: puzzle.letter_frequency(cipher),
                revealed: puzzle.revealed().get(&cipher).copied(),
                wrong_attempts: puzzle
                    .wrong_attempts()
                    .get(&cipher)
                    .cloned()
                    .unwrap_or_default(),
                selected: puzzle.selected() == Some(cipher),
            })
            .collect();

        Self {
            tiles,
            used_plain: puzzle.revealed().values().copied().collect(),
            display: puzzle.display_with(placeholder),
            completion: puzzle.completion_ratio(),
            mistakes_left: puzzle.mistakes_left(),
            outcome: puzzle.outcome(),
        }
    }

    pub fn tile(&self, cipher: Letter) -> Option<&LetterTile> {
        self.tiles.iter().find(|tile| tile.cipher == cipher)
    }

    /// Whether guessing `plain` for `cipher` is worth offering to the player.
    pub fn can_guess(&self, cipher: Letter, plain: Letter) -> bool {
        if self.outcome.is_finished() || self.used_plain.contains(&plain) {
            return false;
        }
        self.tile(cipher)
            .is_some_and(|tile| tile.revealed.is_none() && !tile.wrong_attempts.contains(&plain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle() -> PuzzleState {
        let mut encrypt = ALPHABET;
        encrypt.rotate_left(1);
        let sub = Substitution::from_permutation(encrypt).unwrap();
        PuzzleState::from_generator("BOOK", Difficulty::Easy, sub, 0, Timestamp::default())
            .unwrap()
    }

    #[test]
    fn from_puzzle_maps_reveals_and_attempts() {
        let mut puzzle = puzzle();
        puzzle.select_letter('P');
        puzzle.guess_at('O', Timestamp::default());
        puzzle.select_letter('C');
        puzzle.guess_at('X', Timestamp::default());
        puzzle.select_letter('L');

        let board = LetterBoard::from_puzzle_with_placeholder(&puzzle, '?');

        assert_eq!(board.display, "?OO?");
        assert_eq!(board.tiles.len(), 3);
        assert_eq!(board.tile('P').unwrap().frequency, 2);
        assert_eq!(board.tile('P').unwrap().revealed, Some('O'));
        assert!(board.tile('C').unwrap().wrong_attempts.contains(&'X'));
        assert!(board.tile('L').unwrap().selected);
        assert_eq!(board.mistakes_left, 7);
    }

    #[test]
    fn can_guess_skips_known_and_tried_letters() {
        let mut puzzle = puzzle();
        puzzle.select_letter('P');
        puzzle.guess_at('O', Timestamp::default());
        puzzle.select_letter('C');
        puzzle.guess_at('X', Timestamp::default());

        let board = LetterBoard::from_puzzle(&puzzle);

        assert!(board.can_guess('C', 'B'));
        assert!(!board.can_guess('C', 'X'));
        assert!(!board.can_guess('C', 'O'));
        assert!(!board.can_guess('P', 'B'));
        assert!(!board.can_guess('Q', 'B'));
    }
}
