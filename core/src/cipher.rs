use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::types::alphabet_index;
use crate::*;

/// Full substitution over the alphabet, stored in the encryption direction:
/// `encrypt[i]` is the ciphertext letter for `ALPHABET[i]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Substitution {
    encrypt: [Letter; ALPHABET_LEN],
}

impl Substitution {
    pub const fn identity() -> Self {
        Self { encrypt: ALPHABET }
    }

    /// Builds a substitution from a permutation of [`ALPHABET`], returning
    /// `None` if `encrypt` repeats or omits a letter.
    pub fn from_permutation(encrypt: [Letter; ALPHABET_LEN]) -> Option<Self> {
        let mut seen = [false; ALPHABET_LEN];
        for letter in encrypt {
            let index = alphabet_index(letter)?;
            if core::mem::replace(&mut seen[index], true) {
                return None;
            }
        }
        Some(Self { encrypt })
    }

    pub(crate) const fn from_permutation_unchecked(encrypt: [Letter; ALPHABET_LEN]) -> Self {
        Self { encrypt }
    }

    pub fn encrypt_letter(&self, plain: Letter) -> Option<Letter> {
        alphabet_index(plain).map(|index| self.encrypt[index])
    }

    /// Substitutes every letter of `plaintext`, passing everything else through.
    pub fn encrypt(&self, plaintext: &str) -> String {
        plaintext
            .chars()
            .map(|c| self.encrypt_letter(c).unwrap_or(c))
            .collect()
    }

    /// Whether every letter in `letters` maps to itself.
    pub fn is_identity_on(&self, letters: impl IntoIterator<Item = Letter>) -> bool {
        letters
            .into_iter()
            .all(|letter| self.encrypt_letter(letter) == Some(letter))
    }

    pub fn has_fixed_point(&self) -> bool {
        ALPHABET
            .iter()
            .zip(self.encrypt.iter())
            .any(|(plain, cipher)| plain == cipher)
    }

    pub(crate) fn swap(&mut self, a: Letter, b: Letter) {
        if let (Some(a), Some(b)) = (alphabet_index(a), alphabet_index(b)) {
            self.encrypt.swap(a, b);
        }
    }

    /// Decryption map restricted to the letters that occur in `plaintext`.
    pub fn key_for(&self, plaintext: &str) -> CipherKey {
        let decrypt = plaintext
            .chars()
            .filter_map(|plain| self.encrypt_letter(plain).map(|cipher| (cipher, plain)))
            .collect();
        CipherKey { decrypt }
    }
}

impl Default for Substitution {
    fn default() -> Self {
        Self::identity()
    }
}

/// Decryption map from ciphertext letter to plaintext letter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CipherKey {
    decrypt: BTreeMap<Letter, Letter>,
}

impl CipherKey {
    pub fn plain_for(&self, cipher: Letter) -> Option<Letter> {
        self.decrypt.get(&cipher).copied()
    }

    pub fn cipher_for(&self, plain: Letter) -> Option<Letter> {
        self.decrypt
            .iter()
            .find_map(|(&cipher, &p)| (p == plain).then_some(cipher))
    }

    pub fn contains(&self, cipher: Letter) -> bool {
        self.decrypt.contains_key(&cipher)
    }

    pub fn len(&self) -> usize {
        self.decrypt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decrypt.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Letter, Letter)> + '_ {
        self.decrypt.iter().map(|(&cipher, &plain)| (cipher, plain))
    }

    /// Decrypts every letter known to the key, passing everything else through.
    pub fn decrypt(&self, ciphertext: &str) -> String {
        ciphertext
            .chars()
            .map(|c| self.plain_for(c).unwrap_or(c))
            .collect()
    }

    /// Checks that the key only holds letters and that no two ciphertext
    /// letters decrypt to the same plaintext letter.
    pub fn validate(&self) -> Result<()> {
        let mut targets = BTreeSet::new();
        for (cipher, plain) in self.iter() {
            if !is_letter(cipher) || !is_letter(plain) {
                return Err(GameError::CorruptState("cipher key contains a non-letter"));
            }
            if !targets.insert(plain) {
                return Err(GameError::CorruptState("cipher key is not one-to-one"));
            }
        }
        Ok(())
    }
}
