//! Random scramble generation.

use cubemath::Face;
use cubeturn_notation::{Modifier, NotatedMove};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::ScrambleError;

/// Number of moves in a scramble for each puzzle size and difficulty.
pub const SCRAMBLE_COUNT: [(u8, [usize; 3]); 4] = [
    (2, [7, 13, 17]),
    (3, [20, 25, 30]),
    (4, [30, 40, 50]),
    (5, [40, 60, 80]),
];

/// Face letters drawn for puzzles with fewer than 4 layers.
const SMALL_FACES: &str = "UDLRFB";
/// Face letters drawn for puzzles with 4 or more layers.
const LARGE_FACES: &str = "UuDdLlRrFfBb";

/// Returns the number of moves in a scramble.
pub fn scramble_count(size: u8, difficulty: u8) -> Result<usize, ScrambleError> {
    crate::check_size(size)?;
    let counts = SCRAMBLE_COUNT
        .iter()
        .find(|(s, _)| *s == size)
        .map(|(_, counts)| counts)
        .ok_or(crate::UnsupportedSize(size))?;
    counts
        .get(difficulty as usize)
        .copied()
        .ok_or(ScrambleError::InvalidDifficulty(difficulty))
}

/// Parameters to deterministically generate a scramble.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScrambleParams {
    /// Number of layers along each axis.
    pub size: u8,
    /// Difficulty, from 0 to 2, which determines the number of moves.
    pub difficulty: u8,
    /// Random seed.
    pub seed: String,
}
impl ScrambleParams {
    /// Returns parameters for a new scramble with a random seed.
    pub fn new(size: u8, difficulty: u8) -> Self {
        let seed = format!("{:016x}", rand::rng().random::<u64>());
        Self::with_seed(size, difficulty, seed)
    }
    /// Returns parameters for a scramble with a specific seed.
    pub fn with_seed(size: u8, difficulty: u8, seed: impl Into<String>) -> Self {
        Self {
            size,
            difficulty,
            seed: seed.into(),
        }
    }

    fn rng(&self) -> rand_chacha::ChaCha12Rng {
        let mut sha256 = sha2::Sha256::new();
        sha256.update([self.size, self.difficulty]);
        sha256.update(self.seed.len().to_le_bytes());
        sha256.update(self.seed.as_bytes());
        let digest = sha256.finalize();

        let mut seed = [0_u8; 32];
        seed.copy_from_slice(&digest[..32]);
        rand_chacha::ChaCha12Rng::from_seed(seed)
    }
}

/// Generates a scramble.
///
/// No move shares a face letter with either of the two moves before it.
pub fn generate_scramble(params: &ScrambleParams) -> Result<Vec<NotatedMove>, ScrambleError> {
    let count = scramble_count(params.size, params.difficulty)?;
    let faces = if params.size < 4 { SMALL_FACES } else { LARGE_FACES };
    let letters: Vec<char> = faces.chars().collect();

    let mut rng = params.rng();
    let mut ret: Vec<NotatedMove> = Vec::with_capacity(count);
    while ret.len() < count {
        let Some(&letter) = letters.choose(&mut rng) else {
            break;
        };
        let Some(&modifier) = Modifier::ALL.choose(&mut rng) else {
            break;
        };
        if ret.iter().rev().take(2).any(|prev| prev.letter() == letter) {
            continue;
        }
        let Some(face) = Face::from_symbol(letter) else {
            continue;
        };
        ret.push(NotatedMove {
            face,
            wide: letter.is_ascii_lowercase(),
            modifier,
        });
    }

    log::debug!("generated {} move scramble from seed {:?}", ret.len(), params.seed);
    Ok(ret)
}
