use crate::cli::WhitelistAction;
use crate::config::{self, CostlensConfig, CONFIG_FILE_NAME};
use crate::output::terminal::format_whitelist;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Config file the whitelist is read from and written to.
pub fn whitelist_config_path(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| config::discover_config_path(cwd))
        .unwrap_or_else(|| cwd.join(CONFIG_FILE_NAME))
}

/// Apply `action` to the whitelist stored at `path`.
///
/// Returns the text to print. Invalid names abort before anything is written.
pub fn apply_whitelist_action(path: &Path, action: &WhitelistAction) -> Result<String> {
    let mut settings = if path.exists() {
        config::load_config_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
    } else {
        CostlensConfig::default()
    };
    let mut whitelist = settings.whitelist();

    let message = match action {
        WhitelistAction::List => return Ok(format_whitelist(whitelist.iter())),
        WhitelistAction::Add { names } => {
            let mut added = 0;
            for name in names {
                if whitelist.add(name)? {
                    added += 1;
                }
            }
            format!("Added {added} method(s) to the whitelist")
        }
        WhitelistAction::Remove { names } => {
            let removed = names.iter().filter(|name| whitelist.remove(name)).count();
            format!("Removed {removed} method(s) from the whitelist")
        }
        WhitelistAction::Reset => {
            whitelist.reset();
            "Whitelist cleared".to_string()
        }
    };

    settings.set_whitelist(whitelist);
    config::save_config(path, &settings)?;
    info!("Saved whitelist to {}", path.display());
    Ok(message)
}

pub fn update_whitelist(explicit: Option<&Path>, action: WhitelistAction) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let path = whitelist_config_path(explicit, &cwd);
    let message = apply_whitelist_action(&path, &action)?;
    print!("{message}");
    if !message.is_empty() && !message.ends_with('\n') {
        println!();
    }
    Ok(())
}
