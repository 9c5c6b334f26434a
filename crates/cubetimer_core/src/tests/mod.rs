use cubetimer_notation::Face;

use crate::CubeState;

mod scramble;

/// Facelet label: the face and index where the facelet starts on a solved
/// cube.
type Label = (Face, usize);

/// Returns a cube where every facelet has a distinct label.
fn labelled(n: usize) -> CubeState<Label> {
    CubeState::from_faces(
        n,
        Face::ALL.map(|face| (face, 0)),
        Face::ALL.map(|face| (0..n * n).map(|i| (face, i)).collect()),
    )
}

/// Returns a cube of size `n` after applying a sequence of moves.
fn after_moves(n: usize, moves: &str) -> CubeState {
    let mut state = CubeState::new_solved(n);
    for mv in crate::notation::parse_moves(moves) {
        crate::apply_move(&mut state, mv.expect("bad move in test"));
    }
    state
}
