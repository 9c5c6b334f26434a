//! Cube state, turn engine, and scramble generator for N×N×N cubes from 2×2
//! to 7×7.
//!
//! The engine keeps one logical [`CubeState`] per active cube size. Every turn
//! updates the state immediately; rendering surfaces read
//! [`FaceletSnapshot`]s and replay moves from the [`TwistAnimationState`]
//! queue at their own pace.

pub mod animation;
mod colors;
mod cube_type;
mod engine;
pub mod render;
mod scramble;
mod state;
mod timestamp;
mod turn;

/// Re-export of `chrono`.
pub use chrono;
/// Re-export of `cubetimer_notation`.
pub use cubetimer_notation as notation;
pub use cubetimer_notation::{Axis, Face, Modifier, Move, ParseError};

pub use crate::animation::{AnimationPreferences, TwistAnimation, TwistAnimationState};
pub use crate::colors::{FacePalette, Rgb};
pub use crate::cube_type::{ConfigError, CubeConfig, CubeType, ValidatedCubeConfig};
pub use crate::engine::{CubeEngine, TokenError};
pub use crate::scramble::{Scramble, ScrambleParams, apply_scramble, generate_scramble};
pub use crate::state::{CubeState, FaceletSnapshot};
pub use crate::timestamp::Timestamp;
pub use crate::turn::{TurnError, apply_move, apply_turn};

/// Smallest supported cube size.
pub const MIN_CUBE_SIZE: usize = 2;
/// Largest supported cube size.
pub const MAX_CUBE_SIZE: usize = 7;

/// Default inspection time, in seconds.
pub const DEFAULT_INSPECTION_SECONDS: u32 = 15;

#[cfg(test)]
mod tests;
