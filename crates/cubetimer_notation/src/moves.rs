use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use itertools::Itertools;
use regex::Regex;
use serde::de::Error;
use serde::{Deserialize, Serialize};

use crate::{Axis, DEFAULT_WIDE_WIDTH, Face, ParseError};

/// Turn amount suffix.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// One clockwise quarter turn. Written with no suffix.
    #[default]
    None,
    /// Half turn, written `2`.
    Double,
    /// One counterclockwise quarter turn, written `'`.
    Prime,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

impl Modifier {
    /// All modifiers, in the order used when drawing random scramble moves.
    pub const ALL: [Modifier; 3] = [Modifier::None, Modifier::Double, Modifier::Prime];

    /// Returns the suffix written after the move.
    pub fn suffix(self) -> &'static str {
        match self {
            Modifier::None => "",
            Modifier::Double => "2",
            Modifier::Prime => "'",
        }
    }

    /// Returns the number of clockwise quarter turns that realize the
    /// modifier.
    pub fn quarter_turns(self) -> u8 {
        match self {
            Modifier::None => 1,
            Modifier::Double => 2,
            Modifier::Prime => 3,
        }
    }

    /// Returns the modifier that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Modifier::None => Modifier::Prime,
            Modifier::Double => Modifier::Double,
            Modifier::Prime => Modifier::None,
        }
    }
}

/// Face turn, such as `R`, `U'`, `Fw2`, or `3Rw'`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Face being turned.
    pub face: Face,
    /// Number of layers turned together, or `None` for an outer-layer turn.
    ///
    /// This is always `Some` for a move written with `w`, and is never
    /// `Some(0)`.
    pub width: Option<u8>,
    /// Turn amount.
    pub modifier: Modifier,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            face,
            width,
            modifier,
        } = self;
        match width {
            None => write!(f, "{face}{modifier}"),
            Some(DEFAULT_WIDE_WIDTH) => write!(f, "{face}w{modifier}"),
            Some(w) => write!(f, "{w}{face}w{modifier}"),
        }
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s)
    }
}

impl Serialize for Move {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for Move {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Self>().map_err(D::Error::custom)
    }
}

impl From<Face> for Move {
    fn from(face: Face) -> Self {
        Self::new(face)
    }
}

impl Move {
    /// Constructs a clockwise quarter turn of the outer layer of `face`.
    pub fn new(face: Face) -> Self {
        Self {
            face,
            width: None,
            modifier: Modifier::None,
        }
    }

    /// Constructs a clockwise quarter turn of the outer `width` layers of
    /// `face`.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero.
    pub fn wide(face: Face, width: u8) -> Self {
        assert_ne!(width, 0, "wide move must turn at least one layer");
        Self {
            face,
            width: Some(width),
            modifier: Modifier::None,
        }
    }

    /// Returns the same move with a different modifier.
    #[must_use]
    pub fn with_modifier(self, modifier: Modifier) -> Self {
        Self { modifier, ..self }
    }

    /// Returns the move without its modifier.
    #[must_use]
    pub fn base(self) -> Self {
        self.with_modifier(Modifier::None)
    }

    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        self.with_modifier(self.modifier.inverse())
    }

    /// Returns the rotation axis of the move.
    pub fn axis(self) -> Axis {
        self.face.axis()
    }

    /// Returns whether the move was written with the wide marker `w`.
    pub fn is_wide(self) -> bool {
        self.width.is_some()
    }

    /// Returns the number of clockwise quarter turns that realize the move.
    pub fn quarter_turns(self) -> u8 {
        self.modifier.quarter_turns()
    }

    /// Returns the deepest layer affected by the move, ignoring cube size.
    /// Layer 0 is the outer layer.
    pub fn max_depth(self) -> usize {
        match self.width {
            Some(w) => w.saturating_sub(1) as usize,
            None => 0,
        }
    }

    /// Returns the range of layer depths affected by the move on a cube with
    /// `size` layers, clamped to the layers that can be turned (`0..=size-2`).
    pub fn depth_range(self, size: usize) -> RangeInclusive<usize> {
        0..=self.max_depth().min(size.saturating_sub(2))
    }
}

/// Parses a single move token.
pub fn parse_move(token: &str) -> Result<Move, ParseError> {
    const MOVE_PATTERN: &str = r"^([0-9])?([RLUDFBrludfb])(w)?('|2)?$";
    // match the whole token   ^                                   $
    // optional width digit     ([0-9])?
    // face letter, any case            ([RLUDFBrludfb])
    // optional wide marker                              (w)?
    // optional modifier                                     ('|2)?

    lazy_static! {
        static ref MOVE_REGEX: Regex = Regex::new(MOVE_PATTERN).expect("bad regex");
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(ParseError::Empty);
    }
    let bad_move = || ParseError::BadMove(token.to_owned());

    let captures = MOVE_REGEX.captures(token).ok_or_else(bad_move)?;
    let face = captures
        .get(2)
        .and_then(|m| m.as_str().chars().next())
        .and_then(Face::from_letter)
        .ok_or_else(bad_move)?;
    let digit = captures.get(1).and_then(|m| m.as_str().parse::<u8>().ok());
    // A width digit without `w` does not make the move wide, and a width of
    // zero means the default width.
    let width = captures
        .get(3)
        .map(|_| digit.filter(|&w| w != 0).unwrap_or(DEFAULT_WIDE_WIDTH));
    let modifier = match captures.get(4).map(|m| m.as_str()) {
        Some("2") => Modifier::Double,
        Some("'") => Modifier::Prime,
        _ => Modifier::None,
    };

    Ok(Move {
        face,
        width,
        modifier,
    })
}

/// Parses a whitespace-separated sequence of moves.
pub fn parse_moves(s: &str) -> impl '_ + Iterator<Item = Result<Move, ParseError>> {
    s.split_whitespace().map(parse_move)
}

/// Formats a sequence of moves as a space-separated string.
pub fn format_moves(moves: impl IntoIterator<Item = Move>) -> String {
    moves.into_iter().join(" ")
}
