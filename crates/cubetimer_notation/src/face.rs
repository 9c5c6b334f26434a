use std::fmt;

use serde::{Deserialize, Serialize};

/// Face of a cube.
///
/// Faces serialize as their lowercase letter (`r`, `l`, `u`, `d`, `f`, `b`).
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    /// Right face
    R,
    /// Left face
    L,
    /// Up face
    U,
    /// Down face
    D,
    /// Front face
    F,
    /// Back face
    B,
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter().to_ascii_uppercase())
    }
}

impl Face {
    /// All faces, in canonical order. `Face::ALL[i].index() == i`.
    pub const ALL: [Face; 6] = [Face::R, Face::L, Face::U, Face::D, Face::F, Face::B];

    /// Returns the index of the face in [`Face::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the canonical lowercase letter for the face.
    pub fn letter(self) -> char {
        match self {
            Face::R => 'r',
            Face::L => 'l',
            Face::U => 'u',
            Face::D => 'd',
            Face::F => 'f',
            Face::B => 'b',
        }
    }

    /// Returns the face for a letter, ignoring case.
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'r' => Some(Face::R),
            'l' => Some(Face::L),
            'u' => Some(Face::U),
            'd' => Some(Face::D),
            'f' => Some(Face::F),
            'b' => Some(Face::B),
            _ => None,
        }
    }

    /// Returns the full lowercase name of the face, such as `"right"`.
    pub fn name(self) -> &'static str {
        match self {
            Face::R => "right",
            Face::L => "left",
            Face::U => "up",
            Face::D => "down",
            Face::F => "front",
            Face::B => "back",
        }
    }

    /// Returns the rotation axis of turns of this face.
    pub fn axis(self) -> Axis {
        match self {
            Face::R | Face::L => Axis::X,
            Face::U | Face::D => Axis::Y,
            Face::F | Face::B => Axis::Z,
        }
    }

    /// Returns the face on the other side of the cube.
    pub fn opposite(self) -> Self {
        match self {
            Face::R => Face::L,
            Face::L => Face::R,
            Face::U => Face::D,
            Face::D => Face::U,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }
}

/// Rotation axis shared by a pair of opposite faces.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Axis through `R` and `L`
    X,
    /// Axis through `U` and `D`
    Y,
    /// Axis through `F` and `B`
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}
