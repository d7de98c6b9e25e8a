use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait KeyGenerator {
    /// Produces the substitution used to encrypt `plaintext`, which is already
    /// normalized to uppercase.
    fn generate(self, plaintext: &str) -> Substitution;
}

/// Whether a letter may be substituted by itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyPolicy {
    #[default]
    Permissive,
    Derangement,
}

/// A fixed substitution generates itself, used for puzzles with a known key.
impl KeyGenerator for Substitution {
    fn generate(self, _plaintext: &str) -> Substitution {
        self
    }
}
