use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use web_time::{SystemTime, UNIX_EPOCH};

/// A single puzzle letter, always an ASCII uppercase character.
pub type Letter = char;

/// Count type used for mistakes, limits and hint counters.
pub type Count = u32;

/// Number of letters in the substitution alphabet.
pub const ALPHABET_LEN: usize = 26;

pub const ALPHABET: [Letter; ALPHABET_LEN] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Glyph shown in place of letters that have not been revealed yet.
pub const DEFAULT_PLACEHOLDER: char = '\u{2588}';

pub const fn is_letter(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// Uppercases `c` and returns it only if it is part of the alphabet.
pub fn normalize_letter(c: char) -> Option<Letter> {
    let c = c.to_ascii_uppercase();
    is_letter(c).then_some(c)
}

/// Position of `letter` in [`ALPHABET`].
pub(crate) fn alphabet_index(letter: Letter) -> Option<usize> {
    is_letter(letter).then(|| (letter as u8 - b'A') as usize)
}

/// Wall clock instant stored as milliseconds since the Unix epoch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    #[cfg(feature = "std")]
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis().try_into().unwrap_or(u64::MAX))
            .unwrap_or_default();
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Whole seconds from `earlier` to `self`, 0 if `earlier` is later.
    pub const fn secs_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0) / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_letter_uppercases_and_filters() {
        assert_eq!(normalize_letter('q'), Some('Q'));
        assert_eq!(normalize_letter('Z'), Some('Z'));
        assert_eq!(normalize_letter(' '), None);
        assert_eq!(normalize_letter('é'), None);
    }

    #[test]
    fn alphabet_index_matches_table() {
        for (i, &letter) in ALPHABET.iter().enumerate() {
            assert_eq!(alphabet_index(letter), Some(i));
        }
        assert_eq!(alphabet_index('a'), None);
    }

    #[test]
    fn secs_since_saturates() {
        let start = Timestamp::from_secs(10);
        let end = Timestamp::from_millis(12_999);
        assert_eq!(end.secs_since(start), 2);
        assert_eq!(start.secs_since(end), 0);
    }
}
