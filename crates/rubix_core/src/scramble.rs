//! Random scrambles.

use std::fmt;

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{MoveSequence, Token};

/// Default number of tokens in a scramble.
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 24;

/// Tokens that scrambles are drawn from: every face quarter turn and every
/// face double turn.
pub const SCRAMBLE_TOKENS: [&str; 18] = [
    "F", "B", "L", "R", "D", "U", "F'", "R'", "U'", "L'", "B'", "D'", "L2", "D2", "B2", "R2", "U2",
    "F2",
];

/// Scramble formula and the seed that generated it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scramble {
    /// Seed for the random number generator.
    pub seed: u64,
    /// Scramble formula.
    pub sequence: MoveSequence,
}
impl fmt::Display for Scramble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sequence)
    }
}
impl Scramble {
    /// Generates a scramble from a fresh random seed.
    pub fn new(length: usize) -> Self {
        Self::from_seed(rand::rng().random(), length)
    }

    /// Generates the scramble for `seed`. The same seed and length always
    /// produce the same scramble.
    #[allow(clippy::unwrap_used)] // the token table is nonempty and valid
    pub fn from_seed(seed: u64, length: usize) -> Self {
        let mut rng = rand_chacha::ChaCha12Rng::seed_from_u64(seed);
        let sequence = std::iter::repeat_with(|| {
            SCRAMBLE_TOKENS
                .choose(&mut rng)
                .unwrap()
                .parse::<Token>()
                .unwrap()
        })
        .take(length)
        .collect();
        log::info!("generated scramble of length {length} from seed {seed}");
        Self { seed, sequence }
    }
}
