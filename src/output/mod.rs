pub mod json;
pub mod terminal;

use crate::declarations::MethodDeclaration;
use crate::errors::Result;
use crate::significance::{SignificanceReport, StateDelta};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

pub fn render_declarations(
    files: &[(PathBuf, Vec<MethodDeclaration>)],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Terminal => Ok(terminal::format_declarations(files)),
        OutputFormat::Json => json::format_declarations(files),
    }
}

pub fn render_report(
    report: &SignificanceReport,
    delta: &StateDelta,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Terminal => Ok(terminal::format_report(report, delta)),
        OutputFormat::Json => json::format_report(report, delta),
    }
}

/// Print to stdout, or write to `output_file` creating parent directories.
pub fn emit(content: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                crate::io::ensure_dir(parent)?;
            }
            crate::io::write_file(path, content)
        }
        None => {
            print!("{content}");
            if !content.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_emit_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("out.json");
        emit("[]", Some(&nested)).unwrap();
        assert_eq!(std::fs::read_to_string(nested).unwrap(), "[]");
    }
}
