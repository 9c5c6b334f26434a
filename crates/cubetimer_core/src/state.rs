use std::collections::BTreeMap;
use std::ops::Index;

use cubetimer_notation::Face;
use serde::{Deserialize, Serialize};

use crate::{MAX_CUBE_SIZE, MIN_CUBE_SIZE};

/// Facelet colors of an N×N×N cube.
///
/// Each face stores `N²` values in row-major order (`index = row * N + col`),
/// read as seen from outside the cube in the standard net:
///
/// ```text
///       U
///    L  F  R  B
///       D
/// ```
///
/// On U, row 0 borders B; on D, row 0 borders F; on the side faces row 0
/// borders U. Column 0 is always the left edge in the net.
///
/// The color type defaults to [`Face`], where the solved color of each face
/// is the face itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubeState<C = Face> {
    size: usize,
    /// Colors for a solved cube, indexed by [`Face::index()`].
    solved_colors: [C; 6],
    /// Facelets for each face, indexed by [`Face::index()`].
    faces: [Vec<C>; 6],
}

impl CubeState<Face> {
    /// Constructs a solved cube with `size` layers, colored by face.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not a supported cube size.
    pub fn new_solved(size: usize) -> Self {
        Self::initialize(size, Face::ALL)
    }
}

impl<C: Clone> CubeState<C> {
    /// Constructs a solved cube with `size` layers, filling each face with
    /// its color from `solved_colors` (in [`Face::ALL`] order).
    ///
    /// # Panics
    ///
    /// Panics if `size` is not a supported cube size.
    pub fn initialize(size: usize, solved_colors: [C; 6]) -> Self {
        assert!(
            (MIN_CUBE_SIZE..=MAX_CUBE_SIZE).contains(&size),
            "unsupported cube size {size}",
        );
        let faces = solved_colors.clone().map(|c| vec![c; size * size]);
        Self {
            size,
            solved_colors,
            faces,
        }
    }

    /// Constructs a cube from explicit facelets.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not a supported cube size or if any face does not
    /// have exactly `size * size` facelets.
    pub fn from_faces(size: usize, solved_colors: [C; 6], faces: [Vec<C>; 6]) -> Self {
        let mut ret = Self::initialize(size, solved_colors);
        for (face, facelets) in Face::ALL.into_iter().zip(faces) {
            assert_eq!(facelets.len(), size * size, "wrong facelet count on {face}");
            ret.faces[face.index()] = facelets;
        }
        ret
    }

    /// Resets every facelet to its solved color.
    pub fn reset(&mut self) {
        let n = self.size;
        self.faces = self.solved_colors.clone().map(|c| vec![c; n * n]);
    }

    /// Reinitializes the cube as solved with a new size.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not a supported cube size.
    pub fn reinitialize(&mut self, size: usize) {
        *self = Self::initialize(size, self.solved_colors.clone());
    }

    /// Sets a single facelet.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set(&mut self, face: Face, index: usize, color: C) {
        let n = self.size;
        let Some(slot) = self.faces[face.index()].get_mut(index) else {
            panic!("facelet index {index} out of range for {face} on a cube of size {n}");
        };
        *slot = color;
    }

    /// Returns a read-only copy of every facelet.
    pub fn snapshot(&self) -> FaceletSnapshot<C> {
        FaceletSnapshot {
            size: self.size,
            faces: Face::ALL
                .into_iter()
                .map(|face| (face, self.face(face).to_vec()))
                .collect(),
        }
    }
}

impl<C> CubeState<C> {
    /// Returns the number of layers along each axis.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the solved color of each face, in [`Face::ALL`] order.
    pub fn solved_colors(&self) -> &[C; 6] {
        &self.solved_colors
    }

    /// Returns the facelets of one face, in row-major order.
    pub fn face(&self, face: Face) -> &[C] {
        &self.faces[face.index()]
    }
    pub(crate) fn face_mut(&mut self, face: Face) -> &mut [C] {
        &mut self.faces[face.index()]
    }

    /// Returns a single facelet, or `None` if `index` is out of range.
    pub fn get(&self, face: Face, index: usize) -> Option<&C> {
        self.face(face).get(index)
    }

    /// Returns whether every face is a single color.
    pub fn is_solved(&self) -> bool
    where
        C: PartialEq,
    {
        self.faces
            .iter()
            .all(|facelets| facelets.iter().all(|c| *c == facelets[0]))
    }

    /// Returns the number of facelets of each color.
    pub fn color_counts(&self) -> BTreeMap<C, usize>
    where
        C: Clone + Ord,
    {
        let mut counts = BTreeMap::new();
        for c in self.faces.iter().flatten() {
            *counts.entry(c.clone()).or_insert(0) += 1;
        }
        counts
    }
}

impl<C> Index<(Face, usize)> for CubeState<C> {
    type Output = C;

    fn index(&self, (face, index): (Face, usize)) -> &Self::Output {
        &self.faces[face.index()][index]
    }
}

/// Read-only copy of a cube's facelets, handed to rendering surfaces.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FaceletSnapshot<C = Face> {
    /// Number of layers along each axis.
    pub size: usize,
    /// Row-major facelets for each face.
    pub faces: BTreeMap<Face, Vec<C>>,
}

impl<C> FaceletSnapshot<C> {
    /// Returns a single facelet, or `None` if it is missing.
    pub fn get(&self, face: Face, index: usize) -> Option<&C> {
        self.faces.get(&face)?.get(index)
    }

    /// Returns a snapshot with every color transformed by `f`.
    pub fn map_colors<D>(&self, mut f: impl FnMut(&C) -> D) -> FaceletSnapshot<D> {
        FaceletSnapshot {
            size: self.size,
            faces: self
                .faces
                .iter()
                .map(|(&face, facelets)| (face, facelets.iter().map(&mut f).collect()))
                .collect(),
        }
    }
}
