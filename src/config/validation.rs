//! Validation of configuration values.

use once_cell::sync::Lazy;
use regex::Regex;

use super::core::{AnalysisSettings, CostlensConfig};
use crate::errors::{Error, Result};
use crate::registry::is_valid_method_name;

const SUPPORTED_BUILD_TOOLS: &[&str] = &["javac", "mvn", "gradle", "./gradlew"];

static CLASSES_FOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([-\w]+|\.{1,2})(/\w+)*/?$").unwrap());

/// Whether the build command starts with a supported build tool.
pub fn validate_build_command(build_command: &str) -> bool {
    build_command
        .split(' ')
        .next()
        .is_some_and(|tool| SUPPORTED_BUILD_TOOLS.contains(&tool))
}

/// Whether `classes_folder` is a plain relative path.
pub fn validate_classes_folder(classes_folder: &str) -> bool {
    CLASSES_FOLDER.is_match(classes_folder)
}

pub fn validate_analysis_settings(settings: &AnalysisSettings) -> Result<()> {
    if !validate_build_command(&settings.build_command) {
        return Err(Error::config(format!(
            "unsupported build command {:?}; expected one of: {}",
            settings.build_command,
            SUPPORTED_BUILD_TOOLS.join(", ")
        )));
    }
    if let Some(folder) = &settings.classes_folder {
        if !validate_classes_folder(folder) {
            return Err(Error::config(format!("invalid classes folder {folder:?}")));
        }
    }
    Ok(())
}

/// Drop whitelist entries that are not identifiers or are repeated.
///
/// Returns the rejected entries.
pub fn normalize_whitelist(config: &mut CostlensConfig) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    let mut rejected = Vec::new();
    for name in config.method_whitelist.drain(..) {
        if !is_valid_method_name(&name) {
            rejected.push(name);
        } else if !kept.contains(&name) {
            kept.push(name);
        }
    }
    config.method_whitelist = kept;
    rejected
}
