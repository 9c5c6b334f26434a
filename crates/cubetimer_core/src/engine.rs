use cubetimer_notation::{Face, Move, ParseError, parse_move};

use crate::{
    CubeState, CubeType, FaceletSnapshot, Scramble, ScrambleParams, TurnError, TwistAnimation,
    TwistAnimationState, ValidatedCubeConfig, apply_scramble,
};

/// Cube state for the active cube size, along with its configuration and
/// animation queue.
///
/// Every turn updates the logical state immediately and is then queued for
/// animation.
#[derive(Debug, Clone)]
pub struct CubeEngine {
    config: ValidatedCubeConfig,
    state: CubeState,
    animations: TwistAnimationState,
}

impl Default for CubeEngine {
    fn default() -> Self {
        Self::new(ValidatedCubeConfig::builtin(CubeType::default()))
    }
}

impl CubeEngine {
    /// Constructs an engine with a solved cube.
    pub fn new(config: ValidatedCubeConfig) -> Self {
        let state = CubeState::new_solved(config.size());
        Self {
            config,
            state,
            animations: TwistAnimationState::default(),
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ValidatedCubeConfig {
        &self.config
    }
    /// Returns the active cube type.
    pub fn cube_type(&self) -> CubeType {
        self.config.cube_type()
    }
    /// Returns the logical cube state.
    pub fn state(&self) -> &CubeState {
        &self.state
    }
    /// Returns a read-only copy of the facelets for rendering.
    pub fn snapshot(&self) -> FaceletSnapshot {
        self.state.snapshot()
    }
    /// Returns the animation queue.
    pub fn animations(&self) -> &TwistAnimationState {
        &self.animations
    }
    /// Returns the animation queue mutably, so that a renderer can advance it.
    pub fn animations_mut(&mut self) -> &mut TwistAnimationState {
        &mut self.animations
    }

    /// Applies one clockwise quarter turn of a single layer.
    pub fn apply_turn(&mut self, face: Face, depth: usize) -> Result<(), TurnError> {
        crate::apply_turn(&mut self.state, face, depth)?;
        log::trace!("turned {face} at depth {depth}");
        self.animations
            .push(TwistAnimation::single_layer(face, depth));
        Ok(())
    }

    /// Applies a move.
    pub fn apply_move(&mut self, mv: Move) {
        crate::apply_move(&mut self.state, mv);
        log::trace!("applied {mv}");
        self.animations
            .push(TwistAnimation::from_move(mv, self.state.size()));
    }

    /// Parses and applies a single move token. Wide moves must fit the active
    /// cube. On failure, the state is left unchanged.
    pub fn apply_token(&mut self, token: &str) -> Result<Move, TokenError> {
        let cube_type = self.cube_type();
        let result = parse_move(token)
            .map_err(TokenError::from)
            .and_then(|mv| {
                if cube_type.is_legal_move(mv) {
                    Ok(mv)
                } else {
                    Err(TokenError::IllegalMove { mv, cube_type })
                }
            });
        match &result {
            Ok(mv) => self.apply_move(*mv),
            Err(e) => log::warn!("ignoring move: {e}"),
        }
        result
    }

    /// Generates a scramble and applies it to a freshly solved cube, without
    /// animation.
    pub fn generate_and_apply(&mut self, params: ScrambleParams) -> Scramble {
        let scramble = Scramble::new(&self.config, params);
        self.animations.cancel();
        apply_scramble(&mut self.state, &scramble.moves);
        log::debug!("applied scramble {scramble}");
        scramble
    }

    /// Resets the cube to solved and cancels queued animations.
    pub fn reset(&mut self) {
        log::debug!("resetting {}", self.cube_type());
        self.animations.cancel();
        self.state.reset();
    }

    /// Switches to a different cube configuration, which may change the cube
    /// size. The cube is reset to solved.
    pub fn set_cube(&mut self, config: ValidatedCubeConfig) {
        log::debug!("switching from {} to {}", self.cube_type(), config.cube_type());
        self.animations.cancel();
        self.state.reinitialize(config.size());
        self.config = config;
    }
}

/// Error returned when a move token cannot be applied to the engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token is not a move.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The move is too wide for the active cube.
    #[error("{mv} is not a legal move on {cube_type}")]
    IllegalMove {
        /// Parsed move.
        mv: Move,
        /// Active cube type.
        cube_type: CubeType,
    },
}
