use crate::declarations::MethodDeclaration;
use crate::significance::{CauseKind, SignificanceReport, StateDelta};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use std::fmt::Write;
use std::path::PathBuf;

/// One table per file listing its declarations.
pub fn format_declarations(files: &[(PathBuf, Vec<MethodDeclaration>)]) -> String {
    let mut out = String::new();
    for (path, declarations) in files {
        let _ = writeln!(out, "{}", path.display().to_string().bold());
        if declarations.is_empty() {
            let _ = writeln!(out, "  {}", "no method declarations".dimmed());
            continue;
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Line", "Method", "Key", "Signature"]);
        for decl in declarations {
            table.add_row(vec![
                Cell::new(decl.name_range.start.line + 1),
                Cell::new(&decl.name),
                Cell::new(decl.occurrence_key()),
                Cell::new(decl.signature()),
            ]);
        }
        let _ = writeln!(out, "{table}");
    }
    out
}

pub fn format_report(report: &SignificanceReport, delta: &StateDelta) -> String {
    let mut out = String::new();
    let headline = if report.significant {
        format!("{}: cost may have changed", report.file).yellow().bold()
    } else {
        format!("{}: no significant change", report.file).green()
    };
    let _ = writeln!(out, "{headline}");

    for flagged in &report.flagged {
        let location = flagged
            .declaration
            .as_ref()
            .map(|d| format!(" (line {})", d.name_range.start.line + 1))
            .unwrap_or_default();
        let _ = writeln!(out, "  {}{}", flagged.key.to_string().bold(), location);
        for cause in &flagged.causes {
            let label = match cause.kind {
                CauseKind::Loop => "loop".cyan(),
                CauseKind::Call => "call".magenta(),
            };
            let _ = writeln!(out, "    {label} {}", cause.snippet);
        }
    }

    if !delta.is_empty() {
        for key in &delta.added {
            let _ = writeln!(out, "  {} {key}", "+".green());
        }
        for key in &delta.updated {
            let _ = writeln!(out, "  {} {key}", "~".yellow());
        }
        for key in &delta.removed {
            let _ = writeln!(out, "  {} {key}", "-".red());
        }
    }
    out
}

pub fn format_whitelist<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for name in names {
        let _ = writeln!(out, "{name}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::{index_declarations, OccurrenceKey};
    use crate::significance::{Cause, FileId, FlaggedMethod};

    #[test]
    fn test_declaration_table_lists_methods() {
        colored::control::set_override(false);
        let decls = index_declarations("class A {\n  void run(int n) {}\n}\n");
        let out = format_declarations(&[(PathBuf::from("A.java"), decls)]);
        assert!(out.contains("A.java"));
        assert!(out.contains("run:0"));
        assert!(out.contains("run(int)"));
    }

    #[test]
    fn test_empty_file_is_reported() {
        colored::control::set_override(false);
        let out = format_declarations(&[(PathBuf::from("B.java"), vec![])]);
        assert!(out.contains("no method declarations"));
    }

    #[test]
    fn test_report_lists_causes_and_delta() {
        colored::control::set_override(false);
        let key = OccurrenceKey::new("m", 0);
        let report = SignificanceReport {
            file: FileId::new("A.java"),
            significant: true,
            flagged: vec![FlaggedMethod {
                key: key.clone(),
                declaration: None,
                causes: vec![Cause {
                    snippet: "work()".into(),
                    method: "work".into(),
                    kind: CauseKind::Call,
                }],
            }],
            declarations: vec![],
        };
        let delta = StateDelta {
            added: vec![key],
            ..StateDelta::default()
        };
        let out = format_report(&report, &delta);
        assert!(out.contains("cost may have changed"));
        assert!(out.contains("call work()"));
        assert!(out.contains("+ m:0"));
    }
}
