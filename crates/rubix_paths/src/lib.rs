//! Locations of files read and written by Rubix.
//!
//! The preferences file lives in the user configuration directory unless
//! [`PREFS_FILE_ENV_VAR`] names another file.

#[macro_use]
extern crate lazy_static;

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use eyre::{OptionExt, Result};
use time::OffsetDateTime;

/// Environment variable that overrides the location of the preferences file.
pub const PREFS_FILE_ENV_VAR: &str = "RUBIX_PREFS";

const PREFS_FILE_NAME: &str = "rubix-prefs.yaml";

lazy_static! {
    static ref PREFS_FILE: Option<PathBuf> = locate_prefs_file(
        std::env::var_os(PREFS_FILE_ENV_VAR),
        ProjectDirs::from("", "", "Rubix"),
    );
}

/// Returns the user preferences file.
pub fn prefs_file() -> Result<&'static Path> {
    PREFS_FILE
        .as_deref()
        .ok_or_eyre("no configuration directory for preferences")
}

fn locate_prefs_file(env_override: Option<OsString>, dirs: Option<ProjectDirs>) -> Option<PathBuf> {
    if let Some(path) = env_override.filter(|p| !p.is_empty()) {
        log::info!("using preferences file from ${PREFS_FILE_ENV_VAR}");
        return Some(PathBuf::from(path));
    }
    match dirs {
        Some(dirs) => Some(dirs.config_dir().join(PREFS_FILE_NAME)),
        None => {
            log::error!("error locating configuration directory");
            None
        }
    }
}

/// Moves `original` aside to a timestamped backup next to it, so that a
/// fresh file can be written in its place. Returns the backup path, or `None`
/// if there was no file to back up or it could not be moved.
pub fn move_to_backup_file(original: &Path) -> Option<PathBuf> {
    if !original.is_file() {
        return None;
    }
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let backup = backup_path(original, now);
    match std::fs::rename(original, &backup) {
        Ok(()) => {
            log::info!("backed up {} to {}", original.display(), backup.display());
            Some(backup)
        }
        Err(e) => {
            log::error!("error backing up {}: {e}", original.display());
            None
        }
    }
}

/// Returns a backup name like `rubix-prefs.20240305-070809.bak.yaml`. The
/// extension is kept last so that the backup opens like the original.
fn backup_path(original: &Path, now: OffsetDateTime) -> PathBuf {
    let stem = original
        .file_stem()
        .unwrap_or(OsStr::new("backup"))
        .to_string_lossy();
    let timestamp = format!(
        "{:04}{:02}{:02}-{:02}{:02}{:02}",
        now.year(),
        now.month() as u8,
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
    );
    let name = match original.extension() {
        Some(ext) => format!("{stem}.{timestamp}.bak.{}", ext.to_string_lossy()),
        None => format!("{stem}.{timestamp}.bak"),
    };
    original.with_file_name(name)
}
