//! Decides whether an edit could change previously measured method costs.
//!
//! A change is significant when an added or removed line inside a method
//! introduces or drops a loop (`while`, `for`) or a call to a cost-relevant
//! method that is not whitelisted. The analyzer is a pure function of its
//! inputs: it returns the reconciled [`SignificanceState`] rather than
//! mutating shared registries, and reports through [`CheckOutcome::state_changed`]
//! when the set of suspect methods moved.

mod context;
pub mod state;
mod triggers;

pub use state::{cause_method, CauseSnippets, FileFlags, FileId, SignificanceState, StateDelta};
pub use triggers::CauseKind;
pub(crate) use triggers::mask_comments;

use crate::declarations::{
    scan_headers, DeclarationIndexer, GenericBounds, HeuristicIndexer, MethodDeclaration,
    OccurrenceKey,
};
use crate::diff::{BlockKind, ChangedLineBlock};
use crate::registry::{CostRegistry, Whitelist};
use context::{sides, DiffCursor, HeaderTails};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, debug_span};
use triggers::{find_triggers, mask_spans, Trigger};

/// A qualifying loop or call found in a changed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cause {
    pub snippet: String,
    /// Bare name of the called method, or `while` / `for`.
    pub method: String,
    pub kind: CauseKind,
}

impl Cause {
    fn from_trigger(trigger: &Trigger<'_>) -> Self {
        Self {
            snippet: trigger.snippet.to_string(),
            method: trigger.name.to_string(),
            kind: trigger.kind,
        }
    }
}

/// A method with at least one qualifying cause in the current diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedMethod {
    pub key: OccurrenceKey,
    /// The matching declaration in the new text; `None` when the method only
    /// exists in the old text.
    pub declaration: Option<MethodDeclaration>,
    /// Distinct causes in the order they were found.
    pub causes: Vec<Cause>,
}

impl FlaggedMethod {
    /// Distinct cause method names, in the order they were found.
    pub fn change_cause_methods(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for cause in &self.causes {
            if !names.contains(&cause.method) {
                names.push(cause.method.clone());
            }
        }
        names
    }
}

/// Result of one significance check of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignificanceReport {
    pub file: FileId,
    pub significant: bool,
    pub flagged: Vec<FlaggedMethod>,
    /// Declarations of the new text, for placing per-method annotations.
    pub declarations: Vec<MethodDeclaration>,
}

impl SignificanceReport {
    fn insignificant(file: &FileId) -> Self {
        Self {
            file: file.clone(),
            significant: false,
            flagged: Vec::new(),
            declarations: Vec::new(),
        }
    }

    pub fn flagged_method(&self, key: &OccurrenceKey) -> Option<&FlaggedMethod> {
        self.flagged.iter().find(|f| &f.key == key)
    }

    /// `changeCauseMethods` of a method, or `None` if it is not flagged.
    pub fn change_cause_methods(&self, key: &OccurrenceKey) -> Option<Vec<String>> {
        self.flagged_method(key)
            .map(FlaggedMethod::change_cause_methods)
    }
}

/// Report plus the reconciled state that replaces the caller's prior state.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub report: SignificanceReport,
    pub state: SignificanceState,
    pub delta: StateDelta,
    /// True when flags were added, removed or their snippets changed.
    pub state_changed: bool,
}

impl CheckOutcome {
    pub fn is_significant(&self) -> bool {
        self.report.significant
    }
}

/// Significance check against a registry of cost-relevant names and a whitelist.
#[derive(Debug, Clone, Copy)]
pub struct ChangeSignificanceAnalyzer<'a> {
    registry: &'a CostRegistry,
    whitelist: &'a Whitelist,
}

impl<'a> ChangeSignificanceAnalyzer<'a> {
    pub fn new(registry: &'a CostRegistry, whitelist: &'a Whitelist) -> Self {
        Self {
            registry,
            whitelist,
        }
    }

    /// Check one file's edit.
    ///
    /// `old_text` is the last analyzed snapshot. Without it there is nothing
    /// to compare against and the change is reported insignificant with the
    /// prior state returned unchanged.
    pub fn check(
        &self,
        file: &FileId,
        old_text: Option<&str>,
        new_text: &str,
        diff: &[ChangedLineBlock],
        prior: &SignificanceState,
    ) -> CheckOutcome {
        let span = debug_span!("significance_check", file = %file);
        let _enter = span.enter();

        let Some(old_text) = old_text else {
            debug!("No snapshot for file, change treated as insignificant");
            return CheckOutcome {
                report: SignificanceReport::insignificant(file),
                state: prior.clone(),
                delta: StateDelta::default(),
                state_changed: false,
            };
        };

        // The old snapshot is the last analyzed one, so its bindings win.
        let bounds = GenericBounds::scan(old_text).merge_missing(&GenericBounds::scan(new_text));
        let declarations = HeuristicIndexer::with_bounds(bounds).index(new_text);

        let causes = self.collect_causes(diff);
        let current: FileFlags = causes
            .iter()
            .map(|(key, causes)| {
                let snippets: CauseSnippets = causes.iter().map(|c| c.snippet.clone()).collect();
                (key.clone(), snippets)
            })
            .collect();
        let (state, delta) = prior.reconcile(file, current);
        let state_changed = !delta.is_empty();

        let flagged: Vec<FlaggedMethod> = causes
            .into_iter()
            .map(|(key, causes)| FlaggedMethod {
                declaration: declarations
                    .iter()
                    .find(|d| d.occurrence_key() == key)
                    .cloned(),
                key,
                causes,
            })
            .collect();

        debug!(
            flagged = flagged.len(),
            added = delta.added.len(),
            removed = delta.removed.len(),
            "Significance check finished"
        );

        CheckOutcome {
            report: SignificanceReport {
                file: file.clone(),
                significant: !flagged.is_empty(),
                flagged,
                declarations,
            },
            state,
            delta,
            state_changed,
        }
    }

    /// Qualifying causes per enclosing method, in diff stream order.
    fn collect_causes(&self, diff: &[ChangedLineBlock]) -> BTreeMap<OccurrenceKey, Vec<Cause>> {
        let mut cursor = DiffCursor::default();
        let mut tails = HeaderTails::default();
        let mut causes: BTreeMap<OccurrenceKey, Vec<Cause>> = BTreeMap::new();

        for block in diff {
            let code = mask_comments(&block.text);
            let completed = complete_open_headers(&mut cursor, &tails, block.kind, &code);
            for side in sides(block.kind) {
                tails.extend(*side, &code);
            }

            let headers: Vec<_> = scan_headers(&code)
                .into_iter()
                .filter(|h| h.start >= completed)
                .collect();

            if !block.is_change() {
                for header in &headers {
                    cursor.enter(header.name, block.kind);
                }
                continue;
            }

            // A changed signature line must not read as a call site.
            let scannable = mask_spans(
                &code,
                std::iter::once((0, completed)).chain(headers.iter().map(|h| (h.start, h.end))),
            );
            let mut pending = headers.iter().peekable();

            for trigger in find_triggers(&scannable) {
                while let Some(header) = pending.next_if(|h| h.start < trigger.offset) {
                    cursor.enter(header.name, block.kind);
                }
                if !self.qualifies(trigger.name) {
                    continue;
                }
                let Some(key) = cursor.current() else {
                    debug!(snippet = trigger.snippet, "Trigger outside any method ignored");
                    continue;
                };
                let entry = causes.entry(key.clone()).or_default();
                if !entry.iter().any(|c| c.snippet == trigger.snippet) {
                    entry.push(Cause::from_trigger(&trigger));
                }
            }

            for header in pending {
                cursor.enter(header.name, block.kind);
            }
        }

        causes
    }

    /// Whitelisted names never qualify; loops always do otherwise.
    fn qualifies(&self, name: &str) -> bool {
        !self.whitelist.contains(name)
            && (self.registry.contains(name) || name == "while" || name == "for")
    }
}

/// Enter headers that began in an earlier block and end in this one.
///
/// Returns how many leading bytes of `code` belong to such headers.
fn complete_open_headers(
    cursor: &mut DiffCursor,
    tails: &HeaderTails,
    kind: BlockKind,
    code: &str,
) -> usize {
    let mut completed = 0;
    for side in sides(kind) {
        let tail = tails.get(*side);
        if tail.is_empty() {
            continue;
        }
        let joined = format!("{tail}{code}");
        if let Some(header) = scan_headers(&joined).into_iter().find(|h| h.start < tail.len()) {
            cursor.enter(header.name, *side);
            completed = completed.max(header.end.saturating_sub(tail.len()));
        }
    }
    completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::line_diff;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn run(
        registry: &CostRegistry,
        whitelist: &Whitelist,
        old: &str,
        new: &str,
    ) -> CheckOutcome {
        let analyzer = ChangeSignificanceAnalyzer::new(registry, whitelist);
        analyzer.check(
            &FileId::new("Sample.java"),
            Some(old),
            new,
            &line_diff(old, new),
            &SignificanceState::new(),
        )
    }

    #[test]
    fn test_missing_snapshot_is_insignificant() {
        let registry = CostRegistry::new();
        let whitelist = Whitelist::new();
        let analyzer = ChangeSignificanceAnalyzer::new(&registry, &whitelist);
        let new = "void m() { for (;;) {} }\n";
        let outcome = analyzer.check(
            &FileId::new("A.java"),
            None,
            new,
            &[ChangedLineBlock::added(new)],
            &SignificanceState::new(),
        );
        assert!(!outcome.is_significant());
        assert!(outcome.report.declarations.is_empty());
        assert!(!outcome.state_changed);
    }

    #[test]
    fn test_call_to_unregistered_method_is_not_significant() {
        let old = "void m() {\n  int x = 1;\n}\n";
        let new = "void m() {\n  int x = 1;\n  cheap(x);\n}\n";
        let outcome = run(&CostRegistry::new(), &Whitelist::new(), old, new);
        assert!(!outcome.is_significant());
    }

    #[test]
    fn test_removed_registered_call_is_significant() {
        let mut registry = CostRegistry::new();
        registry.insert("scan");
        let old = "void m() {\n  scan(items);\n}\n";
        let new = "void m() {\n}\n";
        let outcome = run(&registry, &Whitelist::new(), old, new);
        assert!(outcome.is_significant());
        assert_eq!(
            outcome.report.change_cause_methods(&OccurrenceKey::new("m", 0)),
            Some(vec!["scan".to_string()])
        );
    }

    #[test]
    fn test_trigger_attributed_to_enclosing_method() {
        let old = indoc! {"
            class A {
                void first() {
                    int a = 1;
                }

                void second() {
                    int b = 2;
                }
            }
        "};
        let new = indoc! {"
            class A {
                void first() {
                    int a = 1;
                }

                void second() {
                    int b = 2;
                    while (b > 0) { b--; }
                }
            }
        "};
        let outcome = run(&CostRegistry::new(), &Whitelist::new(), old, new);
        let keys: Vec<String> = outcome
            .report
            .flagged
            .iter()
            .map(|f| f.key.to_string())
            .collect();
        assert_eq!(keys, vec!["second:0"]);
        assert_eq!(outcome.report.flagged[0].causes[0].snippet, "while (b > 0)");
        assert_eq!(outcome.report.flagged[0].causes[0].kind, CauseKind::Loop);
    }

    #[test]
    fn test_changed_signature_is_not_a_call() {
        let mut registry = CostRegistry::new();
        registry.insert("process");
        let old = "class A {\n  void process(int a) {\n    a++;\n  }\n}\n";
        let new = "class A {\n  void process(long a) {\n    a++;\n  }\n}\n";
        let outcome = run(&registry, &Whitelist::new(), old, new);
        assert!(!outcome.is_significant());
    }

    #[test]
    fn test_duplicate_snippets_recorded_once() {
        let old = "void m() {\n}\n";
        let new = "void m() {\n  for (;;) {}\n  for (;;) {}\n}\n";
        let outcome = run(&CostRegistry::new(), &Whitelist::new(), old, new);
        assert_eq!(outcome.report.flagged[0].causes.len(), 1);
    }

    #[test]
    fn test_trigger_before_any_method_is_ignored() {
        let mut registry = CostRegistry::new();
        registry.insert("load");
        let old = "class A {\n}\n";
        let new = "class A {\n  static int x = load();\n}\n";
        let outcome = run(&registry, &Whitelist::new(), old, new);
        assert!(!outcome.is_significant());
    }

    #[test]
    fn test_flagged_method_links_new_declaration() {
        let old = "class A {\n  void m(int a) {\n  }\n}\n";
        let new = "class A {\n  void m(int a) {\n    for (;;) {}\n  }\n}\n";
        let outcome = run(&CostRegistry::new(), &Whitelist::new(), old, new);
        let flagged = &outcome.report.flagged[0];
        let declaration = flagged.declaration.as_ref().unwrap();
        assert_eq!(declaration.parameter_types, vec!["int"]);
        assert_eq!(declaration.declaration_range.start.line, 1);
    }
}
