use crate::declarations::{MethodDeclaration, OccurrenceKey};
use crate::errors::Result;
use crate::significance::{SignificanceReport, StateDelta};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct FileDeclarations<'a> {
    file: &'a Path,
    declarations: &'a [MethodDeclaration],
}

#[derive(Serialize)]
struct DeltaView {
    added: Vec<String>,
    removed: Vec<String>,
    updated: Vec<String>,
}

impl From<&StateDelta> for DeltaView {
    fn from(delta: &StateDelta) -> Self {
        let keys = |keys: &[OccurrenceKey]| -> Vec<String> {
            keys.iter().map(ToString::to_string).collect()
        };
        Self {
            added: keys(&delta.added),
            removed: keys(&delta.removed),
            updated: keys(&delta.updated),
        }
    }
}

#[derive(Serialize)]
struct CheckView<'a> {
    #[serde(flatten)]
    report: &'a SignificanceReport,
    state_changes: DeltaView,
}

pub fn format_declarations(files: &[(PathBuf, Vec<MethodDeclaration>)]) -> Result<String> {
    let views: Vec<FileDeclarations<'_>> = files
        .iter()
        .map(|(file, declarations)| FileDeclarations { file, declarations })
        .collect();
    Ok(serde_json::to_string_pretty(&views)?)
}

pub fn format_report(report: &SignificanceReport, delta: &StateDelta) -> Result<String> {
    let view = CheckView {
        report,
        state_changes: delta.into(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}
