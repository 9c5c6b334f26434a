use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use eyre::{OptionExt, Result};

const PREFS_FILE_NAME: &str = "prefs";
const PREFS_FILE_EXTENSION: &str = "yaml";

const HISTORY_FILE_NAME: &str = "history.json";

lazy_static! {
    static ref PATHS: Option<AppPaths> = app_paths();
}

/// Returns the app paths.
pub fn get() -> Result<&'static AppPaths> {
    PATHS.as_ref().ok_or_eyre("no paths")
}
/// Returns the path to the preferences file.
pub fn prefs_file() -> Result<&'static Path> {
    Ok(&get()?.prefs_file)
}
/// Returns the path to the solve history file.
pub fn history_file() -> Result<&'static Path> {
    Ok(&get()?.history_file)
}

/// Paths to files read and written by the cube timer.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Path to the preferences file.
    pub prefs_file: PathBuf,
    /// Path to the solve history file.
    pub history_file: PathBuf,
}

fn app_paths() -> Option<AppPaths> {
    match ProjectDirs::from("", "", "cubetimer") {
        Some(dirs) => Some(AppPaths {
            prefs_file: dirs
                .config_dir()
                .join(format!("{PREFS_FILE_NAME}.{PREFS_FILE_EXTENSION}")),
            history_file: dirs.data_dir().join(HISTORY_FILE_NAME),
        }),
        None => {
            log::error!("Error getting user directories");
            None
        }
    }
}
