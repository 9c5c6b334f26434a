use std::fmt;

use cubetimer_notation::{Modifier, Move, format_moves};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::{CubeState, CubeType, Timestamp, ValidatedCubeConfig, apply_move};

/// Parameters to deterministically generate a scramble.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScrambleParams {
    /// Timestamp when the scramble was requested.
    pub time: Timestamp,
    /// Random seed. The same seed always produces the same scramble for the
    /// same cube configuration.
    pub seed: String,
}

impl Default for ScrambleParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrambleParams {
    /// Generates new parameters based on the current time and a random
    /// number.
    pub fn new() -> Self {
        let time = Timestamp::now();
        let random_u64: u64 = rand::rng().random();
        let seed = format!("{time}_{random_u64}");
        Self { time, seed }
    }

    /// Constructs parameters from an explicit seed, stamped with the current
    /// time.
    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            time: Timestamp::now(),
            seed: seed.into(),
        }
    }

    /// Returns the random number generator for the scramble.
    pub fn rng(&self) -> rand_chacha::ChaCha12Rng {
        let digest = sha2::Sha256::digest(self.seed.as_bytes());
        let mut seed = [0_u8; 32];
        seed.copy_from_slice(&digest);
        rand_chacha::ChaCha12Rng::from_seed(seed)
    }
}

/// Generates a random scramble for a cube.
///
/// Each move is drawn uniformly from the configured moves, rejecting any move
/// on the same axis as the previous one, and given a uniformly random
/// modifier.
pub fn generate_scramble(config: &ValidatedCubeConfig, rng: &mut impl Rng) -> Vec<Move> {
    let len = config.scramble_length();
    let mut moves: Vec<Move> = Vec::with_capacity(len);
    while moves.len() < len {
        let Some(&candidate) = config.moves().choose(rng) else {
            break;
        };
        if moves.last().is_some_and(|prev| prev.axis() == candidate.axis()) {
            continue;
        }
        let modifier = Modifier::ALL[rng.random_range(0..Modifier::ALL.len())];
        moves.push(candidate.with_modifier(modifier));
    }
    log::debug!(
        "generated {} move scramble for {}",
        moves.len(),
        config.cube_type(),
    );
    moves
}

/// Resets `state` to solved and then applies `moves` in order.
pub fn apply_scramble<C: Clone>(state: &mut CubeState<C>, moves: &[Move]) {
    state.reset();
    for &mv in moves {
        apply_move(state, mv);
    }
}

/// Generated scramble along with the parameters that produced it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Scramble {
    /// Parameters used to generate the scramble.
    pub params: ScrambleParams,
    /// Cube the scramble is for.
    pub cube_type: CubeType,
    /// Moves, in the order they are displayed and applied.
    pub moves: Vec<Move>,
}

impl fmt::Display for Scramble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_moves(self.moves.iter().copied()))
    }
}

impl Scramble {
    /// Generates a scramble from `params`.
    pub fn new(config: &ValidatedCubeConfig, params: ScrambleParams) -> Self {
        let moves = generate_scramble(config, &mut params.rng());
        Self {
            params,
            cube_type: config.cube_type(),
            moves,
        }
    }

    /// Returns a solved cube with the scramble applied.
    pub fn scrambled_state(&self) -> CubeState {
        let mut state = CubeState::new_solved(self.cube_type.size());
        apply_scramble(&mut state, &self.moves);
        state
    }
}
