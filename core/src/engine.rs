use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Up to one entry per alphabet letter, kept inline.
pub type LetterList = SmallVec<[Letter; ALPHABET_LEN]>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One cryptogram from creation until it is won, lost or thrown away.
///
/// The ciphertext, plaintext and key are fixed when the puzzle is created and
/// never derived from each other again, restoring a saved puzzle only needs
/// [`PuzzleState::validate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleState {
    ciphertext: String,
    plaintext: String,
    cipher_key: CipherKey,
    revealed: BTreeMap<Letter, Letter>,
    wrong_attempts: BTreeMap<Letter, BTreeSet<Letter>>,
    mistake_count: Count,
    mistake_limit: Count,
    selected: Option<Letter>,
    started_at: Timestamp,
    last_touched_at: Timestamp,
    outcome: Outcome,
    difficulty: Difficulty,
    seed: u64,
    hints_used: Count,
    practice: bool,
}

impl PuzzleState {
    #[cfg(feature = "std")]
    pub fn new(plaintext: &str, config: GameConfig, seed: u64) -> Result<Self> {
        Self::new_at(plaintext, config, seed, Timestamp::now())
    }

    pub fn new_at(plaintext: &str, config: GameConfig, seed: u64, now: Timestamp) -> Result<Self> {
        let generator = RandomKeyGenerator::new(seed, config.key_policy);
        Self::from_generator(plaintext, config.difficulty, generator, seed, now)
    }

    /// Creates a puzzle whose key comes from `generator`, `seed` only drives
    /// hint selection.
    pub fn from_generator(
        plaintext: &str,
        difficulty: Difficulty,
        generator: impl KeyGenerator,
        seed: u64,
        now: Timestamp,
    ) -> Result<Self> {
        let plaintext = plaintext.to_uppercase();
        if !plaintext.chars().any(is_letter) {
            return Err(GameError::InvalidInput);
        }

        let substitution = generator.generate(&plaintext);
        let ciphertext = substitution.encrypt(&plaintext);
        if ciphertext == plaintext {
            log::warn!("Key leaves the puzzle text unchanged");
            return Err(GameError::InvalidInput);
        }
        let cipher_key = substitution.key_for(&plaintext);
        log::debug!(
            "Created {:?} puzzle with {} distinct letters",
            difficulty,
            cipher_key.len()
        );

        Ok(Self {
            ciphertext,
            plaintext,
            cipher_key,
            revealed: BTreeMap::new(),
            wrong_attempts: BTreeMap::new(),
            mistake_count: 0,
            mistake_limit: difficulty.mistake_limit(),
            selected: None,
            started_at: now,
            last_touched_at: now,
            outcome: Outcome::InProgress,
            difficulty,
            seed,
            hints_used: 0,
            practice: false,
        })
    }

    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    pub fn cipher_key(&self) -> &CipherKey {
        &self.cipher_key
    }

    pub fn revealed(&self) -> &BTreeMap<Letter, Letter> {
        &self.revealed
    }

    pub fn is_revealed(&self, cipher: Letter) -> bool {
        self.revealed.contains_key(&cipher)
    }

    pub fn wrong_attempts(&self) -> &BTreeMap<Letter, BTreeSet<Letter>> {
        &self.wrong_attempts
    }

    /// Whether `plain` was already guessed wrong for `cipher`.
    pub fn was_tried(&self, cipher: Letter, plain: Letter) -> bool {
        self.wrong_attempts
            .get(&cipher)
            .is_some_and(|tried| tried.contains(&plain))
    }

    pub fn mistake_count(&self) -> Count {
        self.mistake_count
    }

    pub fn mistake_limit(&self) -> Count {
        self.mistake_limit
    }

    pub fn mistakes_left(&self) -> Count {
        self.mistake_limit.saturating_sub(self.mistake_count)
    }

    pub fn selected(&self) -> Option<Letter> {
        self.selected
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn last_touched_at(&self) -> Timestamp {
        self.last_touched_at
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.last_touched_at.secs_since(self.started_at)
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn hints_used(&self) -> Count {
        self.hints_used
    }

    pub fn is_practice(&self) -> bool {
        self.practice
    }

    pub fn score(&self) -> u32 {
        calculate_score(self)
    }

    /// Selects a ciphertext letter for the next guess. Revealed letters can't
    /// be selected, picking one clears the current selection instead.
    pub fn select_letter(&mut self, cipher: char) -> SelectOutcome {
        use SelectOutcome::*;

        if self.outcome.is_finished() {
            return NoChange;
        }
        let Some(cipher) = normalize_letter(cipher) else {
            return NoChange;
        };
        if !self.cipher_key.contains(cipher) {
            return NoChange;
        }

        if self.is_revealed(cipher) {
            return match self.selected.take() {
                Some(_) => Deselected,
                None => NoChange,
            };
        }

        match self.selected.replace(cipher) {
            Some(previous) if previous == cipher => NoChange,
            _ => Selected(cipher),
        }
    }

    #[cfg(feature = "std")]
    pub fn guess(&mut self, plain: char) -> GuessOutcome {
        self.guess_at(plain, Timestamp::now())
    }

    /// Guesses `plain` for the selected letter. The selection is consumed
    /// whether or not the guess is right.
    pub fn guess_at(&mut self, plain: char, now: Timestamp) -> GuessOutcome {
        if self.outcome.is_finished() {
            return GuessOutcome::NoChange;
        }
        let (Some(cipher), Some(plain)) = (self.selected, normalize_letter(plain)) else {
            return GuessOutcome::NoChange;
        };

        self.selected = None;
        self.touch(now);

        if self.cipher_key.plain_for(cipher) == Some(plain) {
            log::trace!("Correct guess {} -> {}", cipher, plain);
            self.revealed.insert(cipher, plain);
            match self.settle() {
                Outcome::Won => GuessOutcome::Won,
                _ => GuessOutcome::Correct,
            }
        } else {
            log::trace!("Wrong guess {} -> {}", cipher, plain);
            self.wrong_attempts.entry(cipher).or_default().insert(plain);
            self.mistake_count = self.mistake_count.saturating_add(1);
            match self.settle() {
                Outcome::Lost => GuessOutcome::Lost,
                _ => GuessOutcome::Incorrect,
            }
        }
    }

    #[cfg(feature = "std")]
    pub fn hint(&mut self) -> HintOutcome {
        self.hint_at(Timestamp::now())
    }

    /// Reveals a random hidden letter at the cost of one mistake.
    pub fn hint_at(&mut self, now: Timestamp) -> HintOutcome {
        use rand::prelude::*;

        if self.outcome.is_finished() || self.mistake_count >= self.mistake_limit {
            return HintOutcome::NoChange;
        }

        let hidden: LetterList = self
            .unique_cipher_letters()
            .into_iter()
            .filter(|&cipher| !self.is_revealed(cipher))
            .collect();
        if hidden.is_empty() {
            log::warn!("Hint requested with every letter revealed");
            return HintOutcome::NoChange;
        }

        let mut rng = SmallRng::seed_from_u64(self.hint_seed());
        let cipher = hidden[rng.random_range(0..hidden.len())];
        let Some(plain) = self.cipher_key.plain_for(cipher) else {
            return HintOutcome::NoChange;
        };

        log::debug!("Hint {} reveals {} -> {}", self.hints_used + 1, cipher, plain);
        self.revealed.insert(cipher, plain);
        self.hints_used = self.hints_used.saturating_add(1);
        self.mistake_count = self.mistake_count.saturating_add(1);
        if self.selected == Some(cipher) {
            self.selected = None;
        }
        self.touch(now);

        match self.settle() {
            Outcome::InProgress => HintOutcome::Revealed(cipher),
            Outcome::Won => HintOutcome::Won(cipher),
            Outcome::Lost => HintOutcome::Lost(cipher),
        }
    }

    /// Lets the player keep solving after a loss by lifting the mistake limit.
    ///
    /// This deliberately reopens a finished puzzle. The mistake count is kept,
    /// so the final score still reflects every mistake made.
    pub fn enter_practice_mode(&mut self) -> MarkOutcome {
        match self.outcome {
            Outcome::Lost => {
                log::debug!(
                    "Entering practice mode after {} mistakes",
                    self.mistake_count
                );
                self.outcome = Outcome::InProgress;
                self.mistake_limit = Count::MAX;
                self.practice = true;
                MarkOutcome::Changed
            }
            Outcome::InProgress | Outcome::Won => MarkOutcome::NoChange,
        }
    }

    /// Distinct ciphertext letters in order of first appearance.
    pub fn unique_cipher_letters(&self) -> LetterList {
        let mut letters = LetterList::new();
        for c in self.ciphertext.chars().filter(|&c| is_letter(c)) {
            if !letters.contains(&c) {
                letters.push(c);
            }
        }
        letters
    }

    /// Distinct plaintext letters in alphabetical order.
    pub fn unique_plaintext_letters(&self) -> LetterList {
        let mut letters: LetterList = self.plaintext.chars().filter(|&c| is_letter(c)).collect();
        letters.sort_unstable();
        letters.dedup();
        letters
    }

    pub fn letter_frequency(&self, cipher: char) -> usize {
        let Some(cipher) = normalize_letter(cipher) else {
            return 0;
        };
        self.ciphertext.chars().filter(|&c| c == cipher).count()
    }

    pub fn completion_ratio(&self) -> f64 {
        let total = self.unique_cipher_letters().len();
        if total == 0 {
            0.0
        } else {
            self.revealed.len() as f64 / total as f64
        }
    }

    pub fn current_display(&self) -> String {
        self.display_with(DEFAULT_PLACEHOLDER)
    }

    /// Ciphertext with revealed letters decrypted and the rest replaced by
    /// `placeholder`.
    pub fn display_with(&self, placeholder: char) -> String {
        self.ciphertext
            .chars()
            .map(|c| match self.revealed.get(&c) {
                Some(&plain) => plain,
                None if is_letter(c) => placeholder,
                None => c,
            })
            .collect()
    }

    /// Checks every invariant a freshly loaded puzzle must satisfy.
    pub fn validate(&self) -> Result<()> {
        use GameError::CorruptState;

        if self.ciphertext.chars().count() != self.plaintext.chars().count() {
            return Err(CorruptState("ciphertext and plaintext lengths differ"));
        }
        if self.ciphertext == self.plaintext {
            return Err(CorruptState("ciphertext equals plaintext"));
        }
        if !self.plaintext.chars().any(is_letter) {
            return Err(CorruptState("plaintext has no letters"));
        }
        if self.mistake_limit == 0 {
            return Err(CorruptState("mistake limit is zero"));
        }
        if self.last_touched_at < self.started_at {
            return Err(CorruptState("last touched before start"));
        }

        self.cipher_key.validate()?;
        for (cipher, plain) in self.ciphertext.chars().zip(self.plaintext.chars()) {
            match (is_letter(cipher), is_letter(plain)) {
                (true, true) if self.cipher_key.plain_for(cipher) == Some(plain) => {}
                (true, true) => return Err(CorruptState("cipher key disagrees with text")),
                (false, false) if cipher == plain => {}
                _ => return Err(CorruptState("non-letter changed by encryption")),
            }
        }
        if self.cipher_key.len() != self.unique_cipher_letters().len() {
            return Err(CorruptState("cipher key holds letters not in the text"));
        }

        for (&cipher, &plain) in &self.revealed {
            if self.cipher_key.plain_for(cipher) != Some(plain) {
                return Err(CorruptState("revealed letter disagrees with cipher key"));
            }
        }
        if self
            .wrong_attempts
            .keys()
            .any(|&cipher| !self.cipher_key.contains(cipher))
        {
            return Err(CorruptState("wrong attempt for a letter not in the text"));
        }
        if let Some(selected) = self.selected {
            if !self.cipher_key.contains(selected) || self.is_revealed(selected) {
                return Err(CorruptState("selected letter is not selectable"));
            }
        }

        let complete = self.is_complete();
        let over_limit = self.mistake_count >= self.mistake_limit;
        let consistent = match self.outcome {
            Outcome::Won => complete,
            Outcome::Lost => !complete && over_limit,
            Outcome::InProgress => !complete && !over_limit,
        };
        if !consistent {
            return Err(CorruptState("outcome does not match progress"));
        }

        Ok(())
    }

    fn is_complete(&self) -> bool {
        self.revealed.len() == self.cipher_key.len()
    }

    /// Re-evaluates the outcome after a move, a completed reveal set wins even
    /// when the same move used up the last mistake.
    fn settle(&mut self) -> Outcome {
        if self.is_complete() {
            self.end_game(true);
        } else if self.mistake_count >= self.mistake_limit {
            self.end_game(false);
        }
        self.outcome
    }

    fn end_game(&mut self, won: bool) {
        if self.outcome.is_finished() {
            return;
        }

        self.outcome = if won { Outcome::Won } else { Outcome::Lost };
        self.selected = None;
        log::debug!(
            "Puzzle ended {:?} after {} mistakes in {}s",
            self.outcome,
            self.mistake_count,
            self.elapsed_secs()
        );
    }

    fn touch(&mut self, now: Timestamp) {
        self.last_touched_at = now.max(self.started_at);
    }

    fn hint_seed(&self) -> u64 {
        const MIX: u64 = 0x9e37_79b9_7f4a_7c15;
        self.seed ^ u64::from(self.hints_used).wrapping_add(1).wrapping_mul(MIX)
    }
}
