use std::path::Path;

use eyre::Result;
use serde::Serialize;

pub fn user_config_source(path: &Path) -> impl config::Source + Send + Sync + 'static {
    config::File::from(path).required(false)
}

pub fn save(path: &Path, prefs_data: &impl Serialize) -> Result<()> {
    if let Some(p) = path.parent() {
        std::fs::create_dir_all(p)?;
    }
    serde_norway::to_writer(std::fs::File::create(path)?, prefs_data)?;
    Ok(())
}

pub fn backup_prefs_file(path: &Path) {
    rubix_paths::move_to_backup_file(path);
}
