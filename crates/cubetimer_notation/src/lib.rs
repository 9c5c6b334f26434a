//! Cube move notation parser and serializer.
//!
//! A move token looks like `3Rw'`: an optional width digit, a face letter, an
//! optional wide marker `w`, and an optional modifier (`'` or `2`).

#[macro_use]
extern crate lazy_static;

mod errors;
mod face;
mod moves;

pub use errors::ParseError;
pub use face::{Axis, Face};
pub use moves::{Modifier, Move, format_moves, parse_move, parse_moves};

/// Width of a wide move written without a width digit, such as `Rw`.
pub const DEFAULT_WIDE_WIDTH: u8 = 2;

#[cfg(test)]
mod tests;
