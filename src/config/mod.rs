//! Project configuration, read from `.costlens.toml`.

pub mod core;
pub mod loader;
pub mod validation;

pub use self::core::{AnalysisSettings, CostlensConfig};
pub use loader::{
    directory_ancestors, discover_config_path, load_config, load_config_for, load_config_from,
    parse_and_validate_config, save_config, user_config_path, CONFIG_FILE_NAME,
};
pub use validation::{validate_build_command, validate_classes_folder};
