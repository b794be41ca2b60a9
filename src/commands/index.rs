use crate::declarations::{index_declarations, MethodDeclaration};
use crate::io::{self, SourceWalker};
use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct IndexConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub exclude: Vec<String>,
}

/// Index every Java file under the configured path.
///
/// Unreadable files are skipped with a warning.
pub fn index_files(config: &IndexConfig) -> Result<Vec<(PathBuf, Vec<MethodDeclaration>)>> {
    let files = SourceWalker::new(config.path.clone())
        .with_ignore_patterns(config.exclude.clone())
        .walk()
        .with_context(|| format!("Failed to list sources under {}", config.path.display()))?;
    info!("Indexing {} Java files", files.len());

    let indexed = files
        .into_par_iter()
        .filter_map(|path| match io::read_file(&path) {
            Ok(source) => {
                let declarations = index_declarations(&source);
                Some((path, declarations))
            }
            Err(e) => {
                warn!("{}", e);
                None
            }
        })
        .collect();
    Ok(indexed)
}

pub fn run_index(config: IndexConfig) -> Result<()> {
    let indexed = index_files(&config)?;
    let rendered = output::render_declarations(&indexed, config.format)?;
    output::emit(&rendered, config.output.as_deref())?;
    Ok(())
}
