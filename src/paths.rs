//! Path helpers for XDG cache and config files.

use crate::error::CtrlError;
use std::fs;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "mpris-ctrl";

const INDEX_FILE: &str = "lock";
const CONFIG_FILE: &str = "config.json";

/// Get the per-user cache directory, creating it if needed.
/// Usually ~/.cache/mpris-ctrl
pub fn cache_dir() -> Result<PathBuf, CtrlError> {
    let dir = dirs::cache_dir().ok_or(CtrlError::NoCacheDir)?.join(APP_NAME);
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Default location of the persisted player index.
pub fn index_path() -> Result<PathBuf, CtrlError> {
    Ok(cache_dir()?.join(INDEX_FILE))
}

/// Default config file location, if the system has a config dir.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}

/// Create `dir` and its parents, private to the user.
pub fn ensure_dir(dir: &Path) -> Result<(), CtrlError> {
    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
        .map_err(|source| CtrlError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
}
