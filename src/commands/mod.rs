//! CLI command implementations.
//!
//! Available commands:
//! - **index**: List method declarations of Java sources
//! - **check**: Decide whether an edit could change measured method costs
//! - **whitelist**: Manage the method whitelist in the config file
//! - **init**: Initialize a new costlens configuration file

pub mod check;
pub mod index;
pub mod init;
pub mod whitelist;

pub use check::{run_check, CheckConfig};
pub use index::{run_index, IndexConfig};
pub use init::init_config;
pub use whitelist::update_whitelist;

use crate::config::{self, CostlensConfig};
use anyhow::{Context, Result};
use std::path::Path;

/// Explicit config files must load; otherwise the nearest one is used if valid.
pub fn resolve_config(explicit: Option<&Path>) -> Result<CostlensConfig> {
    match explicit {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(config::load_config()),
    }
}
