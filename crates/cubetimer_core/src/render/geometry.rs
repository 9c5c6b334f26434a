use std::f32::consts::FRAC_PI_2;

use cubetimer_notation::Face;

/// Position and orientation of a sticker in 3D.
///
/// Coordinates are for a cube with side length 1 centered at the origin, with
/// +X toward R, +Y toward U, and +Z toward F.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StickerPlacement {
    /// Center of the sticker, on the surface of the cube.
    pub center: [f32; 3],
    /// Outward unit normal of the face the sticker is on.
    pub normal: [f32; 3],
}

/// Returns the outward unit normal of a face, as integers.
fn face_normal(face: Face) -> [i32; 3] {
    match face {
        Face::R => [1, 0, 0],
        Face::L => [-1, 0, 0],
        Face::U => [0, 1, 0],
        Face::D => [0, -1, 0],
        Face::F => [0, 0, 1],
        Face::B => [0, 0, -1],
    }
}

/// Returns the integer coordinates (each from `0` to `n - 1`) of the piece
/// that a facelet is on, along with the outward normal of the facelet.
///
/// # Panics
///
/// Panics if `index` is out of range.
pub fn sticker_lattice_position(face: Face, index: usize, n: usize) -> ([usize; 3], [i32; 3]) {
    assert!(index < n * n, "facelet index {index} out of range for size {n}");
    let (row, col) = (index / n, index % n);
    let m = n - 1;
    let pos = match face {
        Face::U => [col, m, row],
        Face::D => [col, 0, m - row],
        Face::F => [col, m - row, m],
        Face::B => [m - col, m - row, 0],
        Face::R => [m, m - row, m - col],
        Face::L => [0, m - row, col],
    };
    (pos, face_normal(face))
}

/// Returns where a facelet sits on a cube with side length 1.
///
/// # Panics
///
/// Panics if `index` is out of range.
pub fn sticker_placement(face: Face, index: usize, n: usize) -> StickerPlacement {
    let (pos, normal) = sticker_lattice_position(face, index, n);
    let n = n as f32;
    let center = std::array::from_fn(|i| {
        let piece_center = (pos[i] as f32 + 0.5) / n - 0.5;
        piece_center + normal[i] as f32 * 0.5 / n
    });
    StickerPlacement {
        center,
        normal: normal.map(|x| x as f32),
    }
}

/// Returns the axis and angle (right-handed, in radians) of a clockwise
/// quarter turn of `face` as seen from outside the cube.
pub fn twist_rotation(face: Face) -> ([f32; 3], f32) {
    (face_normal(face).map(|x| x as f32), -FRAC_PI_2)
}
