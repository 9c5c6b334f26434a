use cubetimer_notation::Face;
use itertools::Itertools;

use crate::FaceletSnapshot;

/// Returns the position of a face block in the cross-shaped net, in units of
/// faces.
fn face_block(face: Face) -> (usize, usize) {
    match face {
        Face::U => (1, 0),
        Face::L => (0, 1),
        Face::F => (1, 1),
        Face::R => (2, 1),
        Face::B => (3, 1),
        Face::D => (1, 2),
    }
}

/// Returns the width and height of the net in cells, including the one-cell
/// gap between faces.
pub fn net_dimensions(n: usize) -> (usize, usize) {
    (4 * (n + 1) - 1, 3 * (n + 1) - 1)
}

/// Returns the `(x, y)` cell of a facelet in the cross-shaped net, with a
/// one-cell gap between faces.
///
/// # Panics
///
/// Panics if `index` is out of range.
pub fn net_position(face: Face, index: usize, n: usize) -> (usize, usize) {
    assert!(index < n * n, "facelet index {index} out of range for size {n}");
    let (fx, fy) = face_block(face);
    let (row, col) = (index / n, index % n);
    (fx * (n + 1) + col, fy * (n + 1) + row)
}

/// Renders a snapshot as a monospace net, using `to_char` to draw each
/// facelet. Trailing spaces are trimmed from every line.
pub fn render_net_text<C>(snapshot: &FaceletSnapshot<C>, mut to_char: impl FnMut(&C) -> char) -> String {
    let n = snapshot.size;
    let (w, h) = net_dimensions(n);
    let mut grid = vec![vec![' '; w]; h];
    for (&face, facelets) in &snapshot.faces {
        for (i, c) in facelets.iter().enumerate().take(n * n) {
            let (x, y) = net_position(face, i, n);
            grid[y][x] = to_char(c);
        }
    }
    grid.iter()
        .map(|line| line.iter().collect::<String>().trim_end().to_owned())
        .join("\n")
}
