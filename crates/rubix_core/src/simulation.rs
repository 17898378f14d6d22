//! Application context driven once per frame.

use serde::{Deserialize, Serialize};

use crate::codec::{FaceGrid, faces_from_scan, faces_to_solver_string};
use crate::render::{CubieRenderData, render_data};
use crate::solver::{Solver, solve_faces, validate_facelets};
use crate::{
    AnimationController, CameraMode, CameraPoseController, CameraPreset, DEFAULT_CAMERA_SPEED,
    DEFAULT_SCRAMBLE_LENGTH, DEFAULT_SPEED, FaceMatrix, MoveEngine, MoveError, MoveSequence,
    PendingMove, Scramble, SolveError,
};

/// Tunables for a [`Simulation`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    /// Turn speed for single moves, in degrees per tick.
    pub turn_speed: f32,
    /// Turn speed for scripted sequences, in degrees per tick.
    pub sequence_speed: f32,
    /// Initial camera mode.
    pub camera_mode: CameraMode,
    /// Preset orbit for the scripted camera.
    pub camera_preset: CameraPreset,
    /// Camera speed, in degrees per tick.
    pub camera_speed: f32,
    /// Size of each cubie.
    pub scale: f32,
    /// Number of tokens in a scramble.
    pub scramble_length: usize,
    /// Whether to log every committed move.
    pub debug: bool,
}
impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            turn_speed: DEFAULT_SPEED,
            sequence_speed: 3.0,
            camera_mode: CameraMode::Manual,
            camera_preset: CameraPreset::Diagonal,
            camera_speed: DEFAULT_CAMERA_SPEED,
            scale: 1.0,
            scramble_length: DEFAULT_SCRAMBLE_LENGTH,
            debug: false,
        }
    }
}

/// Source of six scanned faces, in capture order (see
/// [`crate::codec::faces_from_scan()`]).
pub trait FaceCapture {
    /// Captures six faces. Failures are reported as
    /// [`SolveError::CaptureFailure`].
    fn capture(&mut self) -> Result<[FaceGrid; 6], SolveError>;
}
impl FaceCapture for [FaceGrid; 6] {
    fn capture(&mut self) -> Result<[FaceGrid; 6], SolveError> {
        Ok(*self)
    }
}

/// Puzzle, animation, and camera state, advanced by [`Simulation::tick()`].
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Puzzle state.
    pub engine: MoveEngine,
    /// Move animation and queue.
    pub animation: AnimationController,
    /// Viewpoint.
    pub camera: CameraPoseController,
    settings: SimulationSettings,
    running: bool,
}
impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationSettings::default())
    }
}
impl Simulation {
    /// Constructs a simulation of a solved puzzle.
    pub fn new(settings: SimulationSettings) -> Self {
        Self {
            engine: MoveEngine::new(),
            animation: AnimationController::new(settings.turn_speed),
            camera: CameraPoseController::new(
                settings.camera_mode,
                settings.camera_preset,
                settings.camera_speed,
            ),
            settings,
            running: true,
        }
    }

    /// Returns the settings.
    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }
    /// Returns whether the simulation has not been shut down.
    pub fn is_running(&self) -> bool {
        self.running
    }
    /// Sets whether to log every committed move.
    pub fn set_debug(&mut self, debug: bool) {
        self.settings.debug = debug;
    }
    /// Stops the simulation and abandons any queued moves. Later ticks do
    /// nothing.
    pub fn shutdown(&mut self) {
        self.animation.clear_queue();
        self.running = false;
    }

    /// Advances everything by one frame. Returns the move committed during
    /// this tick, if any.
    pub fn tick(&mut self) -> Option<PendingMove> {
        if !self.running {
            return None;
        }
        self.animation.drain_queue(&mut self.engine);
        self.camera.tick();
        let committed = self.animation.advance(&mut self.engine);
        if let Some(mv) = committed {
            if self.settings.debug {
                log::info!("{mv}");
            }
        }
        committed
    }
    /// Returns whether no move is in flight and none are queued.
    pub fn is_idle(&self) -> bool {
        self.animation.is_idle(&self.engine)
    }
    /// Ticks until idle or until `max_ticks` have passed. Returns the number
    /// of ticks taken.
    pub fn tick_until_idle(&mut self, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while !self.is_idle() && ticks < max_ticks && self.running {
            self.tick();
            ticks += 1;
        }
        ticks
    }
    /// Instantly finishes the move in flight and every queued move.
    pub fn catch_up(&mut self) {
        self.animation.catch_up(&mut self.engine);
    }

    /// Begins a single move at the turn speed. Fails if a move is already in
    /// flight or a scripted sequence is still queued.
    pub fn do_move(&mut self, name: &str) -> Result<PendingMove, MoveError> {
        if let Some(busy) = self.engine.pending() {
            return Err(MoveError::MoveBusy(busy));
        }
        let queued = self.animation.queue().remaining().len();
        if queued > 0 {
            return Err(MoveError::SequenceBusy(queued));
        }
        let pending = self.engine.begin_move(name)?;
        self.animation.set_speed(self.settings.turn_speed);
        Ok(pending)
    }
    /// Queues a scripted sequence, at the sequence speed unless `speed` is
    /// given.
    pub fn play_sequence<S: AsRef<str>>(
        &mut self,
        tokens: impl IntoIterator<Item = S>,
        speed: Option<f32>,
    ) {
        let speed = speed.unwrap_or(self.settings.sequence_speed);
        self.animation.play_sequence(tokens, Some(speed));
    }
    /// Generates a scramble and queues it. If `animate` is false, the scramble
    /// is applied immediately.
    pub fn scramble(&mut self, animate: bool) -> Scramble {
        let scramble = Scramble::new(self.settings.scramble_length);
        log::info!("scrambling with {scramble}");
        self.play_sequence(scramble.sequence.to_strings(), None);
        if !animate {
            self.catch_up();
        }
        scramble
    }

    /// Returns the colors visible on each face.
    pub fn faces(&self) -> FaceMatrix {
        self.engine.faces()
    }
    /// Returns the facelet string of the current state.
    pub fn solver_string(&self) -> String {
        faces_to_solver_string(&self.faces())
    }
    /// Asks `solver` to solve the current state. The puzzle is not changed.
    pub fn solve_request(&self, solver: &dyn Solver) -> Result<MoveSequence, SolveError> {
        solve_faces(solver, &self.faces())
    }
    /// Captures six faces and loads them onto a freshly reset puzzle. If the
    /// capture fails or the scanned configuration is not solvable, the puzzle
    /// is not changed.
    pub fn load_scan(&mut self, capture: &mut dyn FaceCapture) -> Result<FaceMatrix, SolveError> {
        let faces = faces_from_scan(capture.capture()?);
        validate_facelets(&faces_to_solver_string(&faces))?;
        self.animation.clear_queue();
        self.animation.catch_up(&mut self.engine);
        self.engine.reset();
        self.engine.load_faces(&faces);
        Ok(faces)
    }

    /// Returns render data for every cubie.
    pub fn render_data(&self) -> Vec<CubieRenderData> {
        render_data(&self.engine, &self.animation, self.settings.scale)
    }
}
