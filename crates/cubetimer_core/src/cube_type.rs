use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use cubetimer_notation::{Axis, Move, ParseError, parse_move};
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_INSPECTION_SECONDS, MAX_CUBE_SIZE, MIN_CUBE_SIZE};

/// Minimum cube size on which wide moves are legal.
const MIN_WIDE_SIZE: usize = 4;

/// Cube size selection.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CubeType {
    /// 2x2x2
    #[serde(rename = "2x2")]
    Cube2,
    /// 3x3x3
    #[default]
    #[serde(rename = "3x3")]
    Cube3,
    /// 4x4x4
    #[serde(rename = "4x4")]
    Cube4,
    /// 5x5x5
    #[serde(rename = "5x5")]
    Cube5,
    /// 6x6x6
    #[serde(rename = "6x6")]
    Cube6,
    /// 7x7x7
    #[serde(rename = "7x7")]
    Cube7,
}

impl fmt::Display for CubeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        write!(f, "{n}x{n}")
    }
}

impl FromStr for CubeType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ConfigError::UnknownCubeType(s.to_owned());
        let lower = s.trim().to_ascii_lowercase();
        let (a, b) = lower.split_once('x').ok_or_else(unknown)?;
        if a != b {
            return Err(unknown());
        }
        let n = a.parse().map_err(|_| unknown())?;
        Self::from_size(n).ok_or_else(unknown)
    }
}

impl CubeType {
    /// All cube types, from smallest to largest.
    pub const ALL: [CubeType; 6] = [
        CubeType::Cube2,
        CubeType::Cube3,
        CubeType::Cube4,
        CubeType::Cube5,
        CubeType::Cube6,
        CubeType::Cube7,
    ];

    /// Returns the number of layers along each axis.
    pub fn size(self) -> usize {
        self as usize + MIN_CUBE_SIZE
    }

    /// Returns the cube type with `size` layers, if it is supported.
    pub fn from_size(size: usize) -> Option<Self> {
        if (MIN_CUBE_SIZE..=MAX_CUBE_SIZE).contains(&size) {
            Some(Self::ALL[size - MIN_CUBE_SIZE])
        } else {
            None
        }
    }

    /// Returns the string ID, such as `"3x3"`.
    pub fn id(self) -> String {
        self.to_string()
    }

    /// Returns whether wide moves are legal on this cube.
    pub fn allows_wide_moves(self) -> bool {
        self.size() >= MIN_WIDE_SIZE
    }

    /// Returns whether `mv` can be turned on this cube. Wide moves need a
    /// cube with at least four layers and must leave at least one layer
    /// unturned.
    pub fn is_legal_move(self, mv: Move) -> bool {
        match mv.width {
            None => true,
            Some(w) => self.allows_wide_moves() && (w as usize) < self.size(),
        }
    }
}

/// Per-size timer and scramble configuration, as stored in preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CubeConfig {
    /// Human-friendly label.
    pub label: String,
    /// Number of moves in a generated scramble.
    #[serde(alias = "scrambleLength")]
    pub scramble_length: usize,
    /// Inspection time limit in seconds.
    #[serde(alias = "inspectionSeconds", default = "default_inspection_seconds")]
    pub inspection_seconds: u32,
    /// Move tokens that may appear in a scramble.
    pub moves: Vec<String>,
}

fn default_inspection_seconds() -> u32 {
    DEFAULT_INSPECTION_SECONDS
}

impl CubeConfig {
    /// Returns the built-in configuration for a cube type.
    pub fn builtin(cube_type: CubeType) -> Self {
        const FACE_MOVES: &[&str] = &["R", "L", "U", "D", "F", "B"];
        const WIDE_MOVES: &[&str] = &["Rw", "Lw", "Uw", "Dw", "Fw", "Bw"];
        const THREE_WIDE_MOVES: &[&str] = &["3Rw", "3Lw", "3Uw", "3Dw", "3Fw", "3Bw"];

        let (scramble_length, move_sets): (usize, &[&[&str]]) = match cube_type {
            CubeType::Cube2 => (11, &[&["R", "U", "F"]]),
            CubeType::Cube3 => (20, &[FACE_MOVES]),
            CubeType::Cube4 => (40, &[FACE_MOVES, WIDE_MOVES]),
            CubeType::Cube5 => (60, &[FACE_MOVES, WIDE_MOVES]),
            CubeType::Cube6 => (80, &[FACE_MOVES, WIDE_MOVES, THREE_WIDE_MOVES]),
            CubeType::Cube7 => (100, &[FACE_MOVES, WIDE_MOVES, THREE_WIDE_MOVES]),
        };

        Self {
            label: cube_type.id(),
            scramble_length,
            inspection_seconds: DEFAULT_INSPECTION_SECONDS,
            moves: move_sets
                .iter()
                .flat_map(|set| set.iter())
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Checks that the configuration can be used to scramble `cube_type`.
    ///
    /// Every move must parse and be legal on the cube, the scramble must be
    /// nonempty, and the moves must span at least two axes so that scramble
    /// generation always terminates.
    pub fn validate(&self, cube_type: CubeType) -> Result<ValidatedCubeConfig, ConfigError> {
        if self.scramble_length == 0 {
            return Err(ConfigError::ZeroLength(cube_type));
        }

        let mut moves = vec![];
        for token in &self.moves {
            let mv = parse_move(token).map_err(|error| ConfigError::BadMove {
                cube_type,
                token: token.clone(),
                error,
            })?;
            if !cube_type.is_legal_move(mv) {
                return Err(ConfigError::IllegalMove {
                    cube_type,
                    token: token.clone(),
                });
            }
            moves.push(mv);
        }

        let axes: BTreeSet<Axis> = moves.iter().map(|m| m.axis()).collect();
        if axes.len() < 2 {
            return Err(ConfigError::TooFewAxes(cube_type));
        }

        Ok(ValidatedCubeConfig {
            cube_type,
            label: self.label.clone(),
            scramble_length: self.scramble_length,
            inspection_seconds: self.inspection_seconds,
            moves,
        })
    }
}

/// Cube configuration whose moves have been parsed and checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCubeConfig {
    cube_type: CubeType,
    label: String,
    scramble_length: usize,
    inspection_seconds: u32,
    moves: Vec<Move>,
}

impl ValidatedCubeConfig {
    /// Returns the built-in configuration for `cube_type`.
    #[allow(clippy::unwrap_used)] // built-in configs are checked in tests
    pub fn builtin(cube_type: CubeType) -> Self {
        CubeConfig::builtin(cube_type).validate(cube_type).unwrap()
    }

    /// Returns the cube type.
    pub fn cube_type(&self) -> CubeType {
        self.cube_type
    }
    /// Returns the number of layers along each axis.
    pub fn size(&self) -> usize {
        self.cube_type.size()
    }
    /// Returns the human-friendly label.
    pub fn label(&self) -> &str {
        &self.label
    }
    /// Returns the number of moves in a generated scramble.
    pub fn scramble_length(&self) -> usize {
        self.scramble_length
    }
    /// Returns the inspection time limit in seconds.
    pub fn inspection_seconds(&self) -> u32 {
        self.inspection_seconds
    }
    /// Returns the moves that may appear in a scramble.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns whether `mv` is one of the configured scramble moves, ignoring
    /// its modifier.
    pub fn is_legal_move(&self, mv: Move) -> bool {
        let base = mv.base();
        self.moves.iter().any(|m| m.base() == base)
    }

    /// Checks that `scramble` could have been generated from this
    /// configuration: it must have at least `scramble_length` moves, all of
    /// them configured scramble moves.
    pub fn validate_scramble(&self, scramble: &[Move]) -> Result<(), ConfigError> {
        if scramble.len() < self.scramble_length {
            return Err(ConfigError::ShortScramble {
                cube_type: self.cube_type,
                len: scramble.len(),
                expected: self.scramble_length,
            });
        }
        match scramble.iter().find(|&&mv| !self.is_legal_move(mv)) {
            Some(mv) => Err(ConfigError::IllegalMove {
                cube_type: self.cube_type,
                token: mv.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Converts back to the serializable form.
    pub fn to_config(&self) -> CubeConfig {
        CubeConfig {
            label: self.label.clone(),
            scramble_length: self.scramble_length,
            inspection_seconds: self.inspection_seconds,
            moves: self.moves.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Error in a cube configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("unknown cube type {0:?}")]
    UnknownCubeType(String),
    #[error("bad move {token:?} in {cube_type} config: {error}")]
    BadMove {
        cube_type: CubeType,
        token: String,
        error: ParseError,
    },
    #[error("move {token:?} is not legal on {cube_type}")]
    IllegalMove { cube_type: CubeType, token: String },
    #[error("{cube_type} scramble has {len} moves; expected at least {expected}")]
    ShortScramble {
        cube_type: CubeType,
        len: usize,
        expected: usize,
    },
    #[error("{0} scramble length must be positive")]
    ZeroLength(CubeType),
    #[error("{0} scramble moves must span at least two axes")]
    TooFewAxes(CubeType),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cube_type_ids() {
        for ty in CubeType::ALL {
            assert_eq!(ty.id().parse(), Ok(ty));
            assert_eq!(CubeType::from_size(ty.size()), Some(ty));
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{ty}\""));
        }
        assert_eq!("5X5".parse(), Ok(CubeType::Cube5));
        assert_eq!(CubeType::default(), CubeType::Cube3);
        assert_eq!(CubeType::from_size(1), None);
        assert_eq!(CubeType::from_size(8), None);
        "3x4".parse::<CubeType>().expect_err("not a cube");
        "8x8".parse::<CubeType>().expect_err("too big");
        "cube".parse::<CubeType>().expect_err("garbage");
    }

    #[test]
    fn test_builtin_configs_are_valid() {
        let lengths = [11, 20, 40, 60, 80, 100];
        let move_counts = [3, 6, 12, 12, 18, 18];
        for (i, ty) in CubeType::ALL.into_iter().enumerate() {
            let config = ValidatedCubeConfig::builtin(ty);
            assert_eq!(config.scramble_length(), lengths[i]);
            assert_eq!(config.moves().len(), move_counts[i]);
            assert_eq!(config.inspection_seconds(), 15);
            assert_eq!(config.label(), ty.id());
            assert_eq!(config.to_config(), CubeConfig::builtin(ty));
        }
    }

    #[test]
    fn test_validation_errors() {
        let mut config = CubeConfig::builtin(CubeType::Cube3);

        config.moves.push("Rw".to_owned());
        assert_eq!(
            config.validate(CubeType::Cube3),
            Err(ConfigError::IllegalMove {
                cube_type: CubeType::Cube3,
                token: "Rw".to_owned(),
            }),
        );
        config.validate(CubeType::Cube4).expect("wide moves are fine on 4x4");

        config.moves.push("4Lw".to_owned());
        config.validate(CubeType::Cube4).expect_err("too wide for 4x4");
        config.validate(CubeType::Cube5).expect("4Lw is fine on 5x5");

        config.moves = vec!["R".to_owned(), "L2".to_owned(), "R'".to_owned()];
        assert_eq!(
            config.validate(CubeType::Cube3),
            Err(ConfigError::TooFewAxes(CubeType::Cube3)),
        );
        config.moves.clear();
        config.validate(CubeType::Cube3).expect_err("no moves");

        config.moves = vec!["R".to_owned(), "Q".to_owned()];
        assert!(matches!(
            config.validate(CubeType::Cube3),
            Err(ConfigError::BadMove { .. }),
        ));

        config.moves = vec!["R".to_owned(), "U".to_owned()];
        config.scramble_length = 0;
        assert_eq!(
            config.validate(CubeType::Cube3),
            Err(ConfigError::ZeroLength(CubeType::Cube3)),
        );
    }

    #[test]
    fn test_config_serde() {
        let json = r#"{"label":"Big","scrambleLength":7,"moves":["R","U"]}"#;
        let config: CubeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.scramble_length, 7);
        assert_eq!(config.inspection_seconds, 15);
        let validated = config.validate(CubeType::Cube2).unwrap();
        assert_eq!(validated.moves().len(), 2);
    }
}
