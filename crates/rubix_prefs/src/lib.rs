//! User preferences.
//!
//! Preferences are layered: the built-in `default.yaml` is loaded first, and
//! the user's preferences file overrides any keys it sets.

#[macro_use]
extern crate lazy_static;

use std::path::{Path, PathBuf};

use rubix_core::{CameraMode, CameraPreset, ExternalSolver, SimulationSettings};
use serde::{Deserialize, Serialize};

mod persist;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    /// Built-in default preferences.
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

/// All user preferences.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// Move animation.
    pub animation: AnimationPreferences,
    /// Viewpoint.
    pub camera: CameraPreferences,
    /// Render output.
    pub render: RenderPreferences,
    /// Scramble generation.
    pub scramble: ScramblePreferences,
    /// External solver.
    pub solver: SolverPreferences,
    /// Whether to log every committed move.
    pub debug: bool,
}

/// Move animation preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Turn speed for single moves, in degrees per tick.
    pub turn_speed: f32,
    /// Turn speed for scripted sequences, in degrees per tick.
    pub sequence_speed: f32,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        let defaults = SimulationSettings::default();
        Self {
            turn_speed: defaults.turn_speed,
            sequence_speed: defaults.sequence_speed,
        }
    }
}

/// Viewpoint preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CameraPreferences {
    /// Initial camera mode.
    pub mode: CameraMode,
    /// Orbit used in scripted mode.
    pub preset: CameraPreset,
    /// Camera speed, in degrees per tick.
    pub speed: f32,
}
impl Default for CameraPreferences {
    fn default() -> Self {
        let defaults = SimulationSettings::default();
        Self {
            mode: defaults.camera_mode,
            preset: defaults.camera_preset,
            speed: defaults.camera_speed,
        }
    }
}

/// Render output preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderPreferences {
    /// Size of each cubie.
    pub scale: f32,
    /// Ticks per second when running in real time.
    pub fps: u32,
}
impl Default for RenderPreferences {
    fn default() -> Self {
        Self {
            scale: 1.0,
            fps: 60,
        }
    }
}

/// Scramble preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScramblePreferences {
    /// Number of tokens in a scramble.
    pub length: usize,
}
impl Default for ScramblePreferences {
    fn default() -> Self {
        Self {
            length: rubix_core::DEFAULT_SCRAMBLE_LENGTH,
        }
    }
}

/// External solver preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SolverPreferences {
    /// Program to run.
    pub command: String,
    /// Arguments passed before the facelet string.
    pub args: Vec<String>,
}
impl Default for SolverPreferences {
    fn default() -> Self {
        Self {
            command: "kociemba".to_owned(),
            args: vec![],
        }
    }
}
impl SolverPreferences {
    /// Returns a solver that runs the configured command.
    pub fn solver(&self) -> ExternalSolver {
        ExternalSolver {
            command: self.command.clone(),
            args: self.args.clone(),
        }
    }
}

impl Preferences {
    /// Loads preferences from the user preferences file, or from `path` if
    /// given. If loading fails, then the file is backed up (if possible) and
    /// the default preferences are returned.
    pub fn load(path: Option<&Path>) -> Self {
        match path.map(Path::to_owned).or_else(default_prefs_path) {
            Some(path) => Self::load_from(&path),
            None => DEFAULT_PREFS.clone(),
        }
    }

    /// Loads preferences from `path`, layered over the defaults. A missing
    /// file is not an error.
    pub fn load_from(path: &Path) -> Self {
        lazy_static::initialize(&DEFAULT_PREFS);

        let default_config_source = config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT);

        config::Config::builder()
            .add_source(default_config_source)
            .add_source(persist::user_config_source(path))
            .build()
            .and_then(|c| c.try_deserialize::<Preferences>())
            .unwrap_or_else(|e| {
                log::warn!("Error loading preferences from {}: {e}", path.display());
                persist::backup_prefs_file(path);
                DEFAULT_PREFS.clone()
            })
    }

    /// Saves preferences to the user preferences file, or to `path` if given.
    pub fn save(&self, path: Option<&Path>) -> eyre::Result<PathBuf> {
        let path = match path {
            Some(p) => p.to_owned(),
            None => rubix_paths::prefs_file()?.to_owned(),
        };
        persist::save(&path, self)?;
        log::info!("saved preferences to {}", path.display());
        Ok(path)
    }

    /// Returns the preferences as YAML.
    pub fn to_yaml(&self) -> eyre::Result<String> {
        Ok(serde_norway::to_string(self)?)
    }

    /// Returns settings for a new simulation.
    pub fn simulation_settings(&self) -> SimulationSettings {
        SimulationSettings {
            turn_speed: self.animation.turn_speed,
            sequence_speed: self.animation.sequence_speed,
            camera_mode: self.camera.mode,
            camera_preset: self.camera.preset,
            camera_speed: self.camera.speed,
            scale: self.render.scale,
            scramble_length: self.scramble.length,
            debug: self.debug,
        }
    }
}

fn default_prefs_path() -> Option<PathBuf> {
    match rubix_paths::prefs_file() {
        Ok(path) => Some(path.to_owned()),
        Err(e) => {
            log::warn!("Error locating user preferences: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_yaml_matches_defaults() {
        assert_eq!(Preferences::default(), *DEFAULT_PREFS);
        assert_eq!(SimulationSettings::default(), DEFAULT_PREFS.simulation_settings());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rubix-prefs.yaml");
        assert_eq!(*DEFAULT_PREFS, Preferences::load(Some(&path)));
        assert!(!path.exists());
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rubix-prefs.yaml");
        std::fs::write(&path, "camera:\n  mode: scripted\nscramble:\n  length: 7\n").unwrap();

        let prefs = Preferences::load_from(&path);
        assert_eq!(CameraMode::Scripted, prefs.camera.mode);
        assert_eq!(CameraPreset::Diagonal, prefs.camera.preset);
        assert_eq!(7, prefs.scramble.length);
        assert_eq!(DEFAULT_PREFS.animation, prefs.animation);
    }

    #[test]
    fn test_bad_file_is_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rubix-prefs.yaml");
        std::fs::write(&path, "camera:\n  mode: sideways\n").unwrap();

        assert_eq!(*DEFAULT_PREFS, Preferences::load_from(&path));
        assert!(!path.exists());
        assert_eq!(1, std::fs::read_dir(dir.path()).unwrap().count());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rubix-prefs.yaml");
        let mut prefs = Preferences::default();
        prefs.solver.command = "python3".to_owned();
        prefs.solver.args = vec!["-m".to_owned(), "kociemba".to_owned()];
        prefs.render.fps = 30;

        assert_eq!(path, prefs.save(Some(&path)).unwrap());
        assert_eq!(prefs, Preferences::load_from(&path));
        assert_eq!(
            ExternalSolver {
                command: "python3".to_owned(),
                args: vec!["-m".to_owned(), "kociemba".to_owned()],
            },
            prefs.solver.solver(),
        );
    }
}
