//! 3x3x3 twisty puzzle engine: cubie state, animated moves, and conversion to
//! and from the facelet strings used by external solvers.
//!
//! [`Simulation`] bundles everything and is advanced by calling
//! [`Simulation::tick()`] once per frame.

#[macro_use]
extern crate strum;

mod animation;
mod camera;
pub mod codec;
mod color;
mod cubie;
mod engine;
mod errors;
mod face;
mod moves;
pub mod render;
mod scramble;
mod sign;
mod simulation;
pub mod solver;

#[cfg(test)]
mod tests;

pub use animation::{AnimationController, DEFAULT_SPEED, MIN_SPEED, MoveQueue, QUARTER_TURN};
pub use camera::{
    CameraInput, CameraMode, CameraPoseController, CameraPreset, DEFAULT_CAMERA_SPEED,
};
pub use codec::{FaceGrid, FaceMatrix};
pub use color::{Color, Rgb};
pub use cubie::{CUBIE_COUNT, Cubie, GridPos, Orientation, all_positions, rotate_position};
pub use engine::MoveEngine;
pub use errors::{CodecError, InvalidConfiguration, MoveError, SolveError};
pub use face::Face;
pub use moves::{Layer, Move, MoveSequence, PendingMove, Token, expand_double_turns};
pub use scramble::{DEFAULT_SCRAMBLE_LENGTH, SCRAMBLE_TOKENS, Scramble};
pub use sign::Sign;
pub use simulation::{FaceCapture, Simulation, SimulationSettings};
pub use solver::{ExternalSolver, Solver};
