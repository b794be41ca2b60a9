use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# costlens configuration

# Methods whose calls never make an edit significant
method_whitelist = []

# "non-constant" or "any-reported"
cost_relevance = "non-constant"

[analysis]
# First word must be one of: javac, mvn, gradle, ./gradlew
build_command = "javac"
# classes_folder = "target/classes"
"#;

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}
