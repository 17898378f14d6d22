//! Viewpoint rotation.

use cgmath::{Deg, Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// Distance from the viewer to the center of the puzzle.
pub const VIEW_DISTANCE: f32 = 40.0;
/// Default camera speed, in degrees per tick along each active axis.
pub const DEFAULT_CAMERA_SPEED: f32 = 2.0;

/// How the camera angles evolve each tick.
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, EnumIter, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CameraMode {
    /// Directional input sets the angular velocity.
    #[default]
    Manual,
    /// Angles are frozen.
    Static,
    /// A preset angular velocity is applied.
    Scripted,
}

/// Directional input for [`CameraMode::Manual`].
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[allow(missing_docs)]
pub enum CameraInput {
    Up,
    Down,
    Left,
    Right,
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
    Stop,
}
impl CameraInput {
    /// Returns the angular velocity direction as `[x, y, z]`.
    pub const fn direction(self) -> [f32; 3] {
        match self {
            CameraInput::Up => [-1.0, 0.0, 0.0],
            CameraInput::Down => [1.0, 0.0, 0.0],
            CameraInput::Left => [0.0, -1.0, 0.0],
            CameraInput::Right => [0.0, 1.0, 0.0],
            CameraInput::UpRight => [-1.0, 1.0, 0.0],
            CameraInput::UpLeft => [-1.0, -1.0, 0.0],
            CameraInput::DownRight => [1.0, 1.0, 0.0],
            CameraInput::DownLeft => [1.0, -1.0, 0.0],
            CameraInput::Stop => [0.0, 0.0, 0.0],
        }
    }
}

/// Preset orbit for [`CameraMode::Scripted`].
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, EnumIter, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CameraPreset {
    /// No rotation.
    Still,
    /// Spin about the vertical axis.
    Horizontal,
    /// Tilt about the horizontal axis.
    Vertical,
    /// Spin and tilt together.
    #[default]
    Diagonal,
    /// Spin, tilt, and roll together.
    Tumble,
    /// Roll about the viewing axis.
    Pivot,
}
impl CameraPreset {
    /// Returns the angular velocity direction as `[x, y, z]`.
    pub const fn direction(self) -> [f32; 3] {
        match self {
            CameraPreset::Still => [0.0, 0.0, 0.0],
            CameraPreset::Horizontal => CameraInput::Right.direction(),
            CameraPreset::Vertical => CameraInput::Up.direction(),
            CameraPreset::Diagonal => CameraInput::UpRight.direction(),
            CameraPreset::Tumble => [-1.0, 1.0, 1.0],
            CameraPreset::Pivot => [0.0, 0.0, 1.0],
        }
    }
}

/// Camera pose state machine. Independent of the puzzle state.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPoseController {
    mode: CameraMode,
    preset: CameraPreset,
    /// Degrees per tick along each active axis.
    speed: f32,
    /// Rotation about X, Y, and Z, in degrees.
    angles: [f32; 3],
    /// Direction of manual rotation.
    manual_direction: [f32; 3],
}
impl Default for CameraPoseController {
    fn default() -> Self {
        Self::new(CameraMode::default(), CameraPreset::default(), DEFAULT_CAMERA_SPEED)
    }
}
impl CameraPoseController {
    /// Constructs a camera with all angles at zero.
    pub fn new(mode: CameraMode, preset: CameraPreset, speed: f32) -> Self {
        Self {
            mode,
            preset,
            speed,
            angles: [0.0; 3],
            manual_direction: [0.0; 3],
        }
    }

    /// Returns the camera mode.
    pub fn mode(&self) -> CameraMode {
        self.mode
    }
    /// Sets the camera mode. Manual rotation stops when leaving manual mode.
    pub fn set_mode(&mut self, mode: CameraMode) {
        if mode != CameraMode::Manual {
            self.manual_direction = [0.0; 3];
        }
        self.mode = mode;
    }
    /// Returns the scripted preset.
    pub fn preset(&self) -> CameraPreset {
        self.preset
    }
    /// Sets the scripted preset and speed.
    pub fn set_preset(&mut self, preset: CameraPreset, speed: f32) {
        self.preset = preset;
        self.speed = speed;
    }
    /// Returns the camera speed.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Handles directional input. Returns `false` if the camera is not in
    /// manual mode.
    pub fn input(&mut self, input: CameraInput) -> bool {
        if self.mode != CameraMode::Manual {
            return false;
        }
        self.manual_direction = input.direction();
        true
    }

    /// Returns the current angular velocity, in degrees per tick.
    pub fn velocity(&self) -> [f32; 3] {
        let direction = match self.mode {
            CameraMode::Manual => self.manual_direction,
            CameraMode::Static => [0.0; 3],
            CameraMode::Scripted => self.preset.direction(),
        };
        direction.map(|d| d * self.speed)
    }

    /// Advances the camera by one tick.
    pub fn tick(&mut self) {
        let velocity = self.velocity();
        for (angle, v) in self.angles.iter_mut().zip(velocity) {
            *angle = (*angle + v).rem_euclid(360.0);
        }
    }

    /// Returns the rotation about X, Y, and Z, in degrees.
    pub fn angles(&self) -> [f32; 3] {
        self.angles
    }
    /// Sets the rotation about X, Y, and Z, in degrees.
    pub fn set_rotation(&mut self, angles: [f32; 3]) {
        self.angles = angles.map(|a| a.rem_euclid(360.0));
    }

    /// Returns the view matrix: the puzzle rotated about X, then Y, then Z,
    /// and pushed away from the viewer.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let [x, y, z] = self.angles;
        Matrix4::from_translation(Vector3::new(0.0, 0.0, -VIEW_DISTANCE))
            * Matrix4::from_angle_z(Deg(z))
            * Matrix4::from_angle_y(Deg(y))
            * Matrix4::from_angle_x(Deg(x))
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{SquareMatrix, Vector4};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_static_camera_is_frozen() {
        let mut camera = CameraPoseController::new(CameraMode::Static, CameraPreset::Tumble, 2.0);
        camera.set_rotation([10.0, 20.0, 30.0]);
        assert!(!camera.input(CameraInput::Left));
        for _ in 0..10 {
            camera.tick();
        }
        assert_eq!([10.0, 20.0, 30.0], camera.angles());
    }

    #[test]
    fn test_scripted_orbit() {
        let mut camera = CameraPoseController::new(CameraMode::Scripted, CameraPreset::Diagonal, 2.0);
        for _ in 0..10 {
            camera.tick();
        }
        assert_eq!([340.0, 20.0, 0.0], camera.angles());
        assert!(!camera.input(CameraInput::Stop));
    }

    #[test]
    fn test_manual_input() {
        let mut camera = CameraPoseController::default();
        camera.tick();
        assert_eq!([0.0; 3], camera.angles());
        assert!(camera.input(CameraInput::Right));
        camera.tick();
        camera.tick();
        assert_eq!([0.0, 4.0, 0.0], camera.angles());
        camera.input(CameraInput::Stop);
        camera.tick();
        assert_eq!([0.0, 4.0, 0.0], camera.angles());

        camera.input(CameraInput::Down);
        camera.set_mode(CameraMode::Static);
        camera.set_mode(CameraMode::Manual);
        camera.tick();
        assert_eq!([0.0, 4.0, 0.0], camera.angles());
    }

    #[test]
    fn test_view_matrix() {
        let camera = CameraPoseController::default();
        let expected = Matrix4::from_translation(Vector3::new(0.0, 0.0, -40.0));
        assert_eq!(expected, camera.view_matrix());
        assert_ne!(Matrix4::identity(), camera.view_matrix());

        let mut camera = CameraPoseController::default();
        camera.set_rotation([0.0, 90.0, 0.0]);
        let p = camera.view_matrix() * Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert!((p.x - 1.0).abs() < 1e-5, "{p:?}");
        assert!((p.z + 40.0).abs() < 1e-5, "{p:?}");
    }

    #[test]
    fn test_names() {
        assert_eq!("up_right", CameraInput::UpRight.to_string());
        assert_eq!(Ok(CameraPreset::Tumble), "tumble".parse());
        assert_eq!(Ok(CameraMode::Scripted), "scripted".parse());
    }
}
