use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::core::CostlensConfig;
use super::validation::{normalize_whitelist, validate_analysis_settings};
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".costlens.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    fs::read_to_string(path)
}

/// Parse a TOML document and validate it.
///
/// Invalid whitelist entries are dropped with a warning; invalid analysis
/// settings are an error.
pub fn parse_and_validate_config(contents: &str) -> Result<CostlensConfig> {
    let mut config = toml::from_str::<CostlensConfig>(contents)?;

    for rejected in normalize_whitelist(&mut config) {
        warn!("Ignoring invalid whitelist entry {:?}", rejected);
    }
    validate_analysis_settings(&config.analysis)?;

    Ok(config)
}

/// Load the config at `path`, failing if it is missing or invalid.
pub fn load_config_from(path: &Path) -> Result<CostlensConfig> {
    let contents = read_config_file(path).map_err(|e| Error::io(path, e))?;
    parse_and_validate_config(&contents)
}

pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<CostlensConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            warn!("{}: {}. Using defaults.", config_path.display(), e);
            None
        }
    }
}

fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // "not found" is the normal case while walking up
    if error.kind() != std::io::ErrorKind::NotFound {
        warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its parents, nearest first, at most `max_depth` of them.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Per-user config file, e.g. `~/.config/costlens/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("costlens").join("config.toml"))
}

/// Find the config that applies to `start`.
///
/// The nearest `.costlens.toml` in `start` or its parents wins, then the
/// per-user config, then defaults.
pub fn discover_config_path(start: &Path) -> Option<PathBuf> {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
        .or_else(|| user_config_path().filter(|path| path.is_file()))
}

pub fn load_config_for(start: &Path) -> CostlensConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .chain(user_config_path())
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!("No config found. Using default config.");
            CostlensConfig::default()
        })
}

pub fn load_config() -> CostlensConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_for(&dir),
        Err(e) => {
            warn!("Failed to get current directory: {}. Using default config.", e);
            CostlensConfig::default()
        }
    }
}

pub fn save_config(path: &Path, config: &CostlensConfig) -> Result<()> {
    let contents = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| Error::io(path, e))
}
