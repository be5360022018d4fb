//! Reading and writing the preferences file.

use std::path::Path;

use eyre::Result;
use serde::Serialize;

use crate::PREFS_FILE_FORMAT;

/// Returns a config source for the user preferences file at its default
/// location. A missing file is not an error.
pub fn user_config_source() -> Result<impl config::Source + Send + Sync> {
    Ok(config::File::from(crate::paths::prefs_file()?)
        .format(PREFS_FILE_FORMAT)
        .required(false))
}

/// Returns a config source for a preferences file that must exist.
pub fn explicit_config_source(path: &Path) -> impl config::Source + Send + Sync + use<> {
    config::File::from(path).format(PREFS_FILE_FORMAT)
}

/// Writes preferences as YAML to `path`, creating parent directories as
/// needed.
pub fn save(path: &Path, prefs_data: &impl Serialize) -> Result<()> {
    if let Some(p) = path.parent() {
        std::fs::create_dir_all(p)?;
    }
    serde_norway::to_writer(std::fs::File::create(path)?, prefs_data)?;
    log::info!("Saved preferences to {}", path.display());
    Ok(())
}

/// Moves an unreadable preferences file out of the way so that it is not
/// overwritten by the next save.
pub fn backup_prefs_file(path: &Path) {
    if !path.exists() {
        return;
    }
    let backup_path = crate::paths::backup_file_path(path);
    match std::fs::rename(path, &backup_path) {
        Ok(()) => log::info!("Moved preferences file to {}", backup_path.display()),
        Err(e) => log::error!("Error backing up preferences file: {e}"),
    }
}
