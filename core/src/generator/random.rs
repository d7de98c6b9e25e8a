use super::*;

/// Give up on rejection sampling a derangement after this many shuffles.
const MAX_DERANGEMENT_ATTEMPTS: u32 = 64;

/// Shuffles the alphabet with a seeded RNG and pairs it position-wise with the
/// unshuffled alphabet.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomKeyGenerator {
    seed: u64,
    policy: KeyPolicy,
}

impl RandomKeyGenerator {
    pub fn new(seed: u64, policy: KeyPolicy) -> Self {
        Self { seed, policy }
    }
}

impl KeyGenerator for RandomKeyGenerator {
    fn generate(self, plaintext: &str) -> Substitution {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut encrypt = ALPHABET;
        encrypt.shuffle(&mut rng);
        let mut substitution = Substitution::from_permutation_unchecked(encrypt);

        if self.policy == KeyPolicy::Derangement {
            let mut attempts = 1;
            while substitution.has_fixed_point() && attempts < MAX_DERANGEMENT_ATTEMPTS {
                encrypt.shuffle(&mut rng);
                substitution = Substitution::from_permutation_unchecked(encrypt);
                attempts += 1;
            }
            if substitution.has_fixed_point() {
                log::warn!(
                    "No derangement after {} shuffles, fallback to a rotation",
                    attempts
                );
                encrypt = ALPHABET;
                encrypt.rotate_left(rng.random_range(1..ALPHABET_LEN));
                substitution = Substitution::from_permutation_unchecked(encrypt);
            }
            log::trace!("Derangement found after {} shuffles", attempts);
        }

        // a key that leaves the text readable would make the puzzle pointless
        let first_letter = plaintext.chars().find(|&c| is_letter(c));
        if let Some(first) = first_letter {
            if substitution.is_identity_on(plaintext.chars().filter(|&c| is_letter(c))) {
                let other = ALPHABET[(first as u8 - b'A' + 1) as usize % ALPHABET_LEN];
                log::debug!(
                    "Key leaves plaintext unchanged, swapping {} and {}",
                    first,
                    other
                );
                substitution.swap(first, other);
            }
        }

        substitution
    }
}
