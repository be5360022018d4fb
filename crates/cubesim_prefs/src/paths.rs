use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use eyre::{OptionExt, Result};

const PREFS_FILE_NAME: &str = "cubesim-prefs";
const PREFS_FILE_EXTENSION: &str = "yaml";

lazy_static! {
    static ref PREFS_FILE: Option<PathBuf> = prefs_file_path();
}

/// Returns the path to the user preferences file.
pub fn prefs_file() -> Result<&'static Path> {
    PREFS_FILE
        .as_deref()
        .ok_or_eyre("no configuration directory")
}

/// Returns the path that a preferences file is moved to when it cannot be
/// loaded.
pub fn backup_file_path(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().unwrap_or_default().to_owned();
    file_name.push(".bak");
    path.with_file_name(file_name)
}

fn prefs_file_path() -> Option<PathBuf> {
    match ProjectDirs::from("", "", "cubesim") {
        Some(dirs) => Some(
            dirs.config_dir()
                .join(format!("{PREFS_FILE_NAME}.{PREFS_FILE_EXTENSION}")),
        ),
        None => {
            log::error!("Error getting configuration directory");
            None
        }
    }
}
