pub mod walker;

pub use walker::{find_java_files, SourceWalker};

use crate::errors::{Error, Result};
use crate::significance::SignificanceState;
use std::fs;
use std::path::Path;
use tracing::debug;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::io(path, e))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
    }
    Ok(())
}

/// Load persisted significance state; a missing file is an empty state.
pub fn load_state(path: &Path) -> Result<SignificanceState> {
    if !path.exists() {
        debug!("No state at {}, starting empty", path.display());
        return Ok(SignificanceState::default());
    }
    let contents = read_file(path)?;
    if contents.trim().is_empty() {
        return Ok(SignificanceState::default());
    }
    Ok(serde_json::from_str(&contents)?)
}

pub fn save_state(path: &Path, state: &SignificanceState) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    write_file(path, &json)
}
