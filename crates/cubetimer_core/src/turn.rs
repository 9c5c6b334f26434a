//! Clockwise quarter turns of a single layer.
//!
//! Turning the layer at depth `d` of a face moves one strip of `N` facelets on
//! each of the four neighboring faces. Depth 0 additionally rotates the face's
//! own grid. The strips are listed in the order that facelets travel: strip
//! `i` receives the facelets of strip `i - 1` (mod 4).

use cubetimer_notation::{Face, Move};
use smallvec::SmallVec;

use crate::{CubeState, MAX_CUBE_SIZE};

/// Line of facelets within a face grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Line {
    Row,
    Col,
}

/// One strip of facelets on a neighboring face.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct StripSpec {
    face: Face,
    line: Line,
    /// Whether the line index is counted from the far edge (`N - 1 - depth`)
    /// instead of the near edge (`depth`).
    far: bool,
    /// Whether the strip is traversed back to front.
    reversed: bool,
}

const fn strip(face: Face, line: Line, far: bool, reversed: bool) -> StripSpec {
    StripSpec {
        face,
        line,
        far,
        reversed,
    }
}

/// Returns the four strips moved by a turn of `face`.
fn side_strips(face: Face) -> [StripSpec; 4] {
    use Face::*;
    use Line::*;

    match face {
        R => [
            strip(U, Col, true, false),
            strip(B, Col, false, true),
            strip(D, Col, true, false),
            strip(F, Col, true, false),
        ],
        L => [
            strip(U, Col, false, false),
            strip(F, Col, false, false),
            strip(D, Col, false, false),
            strip(B, Col, true, true),
        ],
        U => [
            strip(F, Row, false, false),
            strip(L, Row, false, false),
            strip(B, Row, false, false),
            strip(R, Row, false, false),
        ],
        D => [
            strip(F, Row, true, false),
            strip(R, Row, true, false),
            strip(B, Row, true, false),
            strip(L, Row, true, false),
        ],
        F => [
            strip(U, Row, true, false),
            strip(R, Col, false, false),
            strip(D, Row, false, true),
            strip(L, Col, true, true),
        ],
        B => [
            strip(U, Row, false, false),
            strip(L, Col, false, true),
            strip(D, Row, true, true),
            strip(R, Col, true, false),
        ],
    }
}

impl StripSpec {
    /// Returns the grid indices of the strip in traversal order.
    fn indices(self, n: usize, depth: usize) -> impl Iterator<Item = usize> {
        let line_index = if self.far { n - 1 - depth } else { depth };
        (0..n).map(move |k| {
            let k = if self.reversed { n - 1 - k } else { k };
            match self.line {
                Line::Row => line_index * n + k,
                Line::Col => k * n + line_index,
            }
        })
    }
}

/// Applies one clockwise quarter turn (as seen from outside `face`) of the
/// layer at `depth`, where depth 0 is the outer layer.
///
/// Returns an error and leaves the state unchanged if `depth` is not less
/// than `N - 1`.
pub fn apply_turn<C: Clone>(
    state: &mut CubeState<C>,
    face: Face,
    depth: usize,
) -> Result<(), TurnError> {
    let size = state.size();
    if depth + 1 >= size {
        log::error!("refusing to turn {face} at depth {depth} on a cube of size {size}");
        return Err(TurnError::DepthOutOfRange { depth, size });
    }
    turn_layer(state, face, depth);
    Ok(())
}

/// Applies a move, turning every layer in its depth range.
///
/// Wide moves that are wider than the cube turn every layer that can be
/// turned.
pub fn apply_move<C: Clone>(state: &mut CubeState<C>, mv: Move) {
    for depth in mv.depth_range(state.size()) {
        for _ in 0..mv.quarter_turns() {
            turn_layer(state, mv.face, depth);
        }
    }
}

fn turn_layer<C: Clone>(state: &mut CubeState<C>, face: Face, depth: usize) {
    let n = state.size();

    if depth == 0 {
        rotate_grid_cw(state.face_mut(face), n);
    }

    let strips = side_strips(face);
    let values = strips.map(|s| {
        s.indices(n, depth)
            .map(|i| state[(s.face, i)].clone())
            .collect::<SmallVec<[C; MAX_CUBE_SIZE]>>()
    });
    for (i, s) in strips.into_iter().enumerate() {
        let facelets = state.face_mut(s.face);
        for (dst, value) in s.indices(n, depth).zip(&values[(i + 3) % 4]) {
            facelets[dst] = value.clone();
        }
    }
}

/// Rotates an `n`×`n` row-major grid 90 degrees clockwise.
fn rotate_grid_cw<C: Clone>(grid: &mut [C], n: usize) {
    let old = grid.to_vec();
    for row in 0..n {
        for col in 0..n {
            grid[col * n + (n - 1 - row)] = old[row * n + col].clone();
        }
    }
}

/// Error returned when a turn cannot be applied.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// The layer depth is not less than `size - 1`.
    #[error("layer depth {depth} is out of range for a cube of size {size}")]
    DepthOutOfRange {
        /// Requested depth.
        depth: usize,
        /// Cube size.
        size: usize,
    },
}
