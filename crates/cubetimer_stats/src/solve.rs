use std::time::Duration;

use cubetimer_core::{CubeType, Timestamp};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::PLUS2_MS;

/// Penalty applied to a solve.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Penalty {
    /// No penalty.
    #[default]
    Ok,
    /// Two seconds added.
    Plus2,
    /// Did not finish.
    Dnf,
}

/// Returns the penalty for an inspection that lasted `elapsed`, given the
/// inspection time limit.
///
/// Going over the limit costs two seconds; going more than two seconds over
/// is a DNF.
pub fn inspection_penalty(elapsed: Duration, limit: Duration) -> Penalty {
    if elapsed > limit + Duration::from_millis(PLUS2_MS) {
        Penalty::Dnf
    } else if elapsed > limit {
        Penalty::Plus2
    } else {
        Penalty::Ok
    }
}

/// Returns a new unique solve ID: the creation time in base 36, a dash, and
/// six random base-36 digits.
pub fn new_solve_id(created_at: Timestamp) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut rng = rand::rng();
    let suffix: String = (0..6)
        .map(|_| DIGITS[rng.random_range(0..DIGITS.len())] as char)
        .collect();
    format!("{}-{suffix}", to_base36(created_at.millis().max(0) as u64))
}

fn to_base36(mut n: u64) -> String {
    let mut digits = vec![];
    loop {
        let d = (n % 36) as u32;
        digits.push(char::from_digit(d, 36).unwrap_or('0'));
        n /= 36;
        if n == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}

/// Single timed solve.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SolveRecord {
    /// Unique ID.
    pub id: String,
    /// Raw solve time, without penalty.
    pub time_ms: u64,
    /// Penalty.
    #[serde(default)]
    pub penalty: Penalty,
    /// Scramble that was applied before the solve, as space-separated moves.
    #[serde(default)]
    pub scramble: String,
    /// Cube that was solved.
    #[serde(default)]
    pub cube_type: CubeType,
    /// Session that the solve belongs to.
    #[serde(default)]
    pub session_id: Option<String>,
    /// When the solve was finished.
    pub created_at: Timestamp,
}

impl SolveRecord {
    /// Constructs a solve record finished now, with a fresh ID.
    pub fn new(
        time_ms: u64,
        penalty: Penalty,
        scramble: impl Into<String>,
        cube_type: CubeType,
        session_id: Option<String>,
    ) -> Self {
        let created_at = Timestamp::now();
        Self {
            id: new_solve_id(created_at),
            time_ms,
            penalty,
            scramble: scramble.into(),
            cube_type,
            session_id,
            created_at,
        }
    }

    /// Returns the time with penalty applied, or `None` for a DNF.
    pub fn effective_ms(&self) -> Option<u64> {
        match self.penalty {
            Penalty::Ok => Some(self.time_ms),
            Penalty::Plus2 => Some(self.time_ms.saturating_add(PLUS2_MS)),
            Penalty::Dnf => None,
        }
    }
}
