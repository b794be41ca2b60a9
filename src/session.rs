//! Stateful front end for an editor integration.
//!
//! A [`CostSession`] keeps, per file, the text that was last sent to the cost
//! analyzer. Saves are checked against that snapshot, not against the previous
//! save, so an edit that is later reverted stops flagging its method.

use crate::declarations::{index_declarations, MethodDeclaration};
use crate::diff::line_diff;
use crate::history::CostHistory;
use crate::registry::{CostRecord, CostRegistry, CostRelevance, Whitelist};
use crate::significance::{
    ChangeSignificanceAnalyzer, CheckOutcome, FileId, SignificanceState, StateDelta,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct CostSession {
    enabled: bool,
    snapshots: HashMap<FileId, String>,
    registry: CostRegistry,
    whitelist: Whitelist,
    relevance: CostRelevance,
    state: SignificanceState,
    history: CostHistory,
}

impl CostSession {
    pub fn new(whitelist: Whitelist, relevance: CostRelevance) -> Self {
        Self {
            whitelist,
            relevance,
            ..Self::default()
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stop tracking; snapshots and flags are discarded, history is kept.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.snapshots.clear();
        self.state.clear();
        info!("Cost tracking disabled");
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Forget every flag without touching snapshots.
    pub fn reset_state(&mut self) {
        self.state.clear();
    }

    pub fn registry(&self) -> &CostRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CostRegistry {
        &mut self.registry
    }

    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    pub fn whitelist_mut(&mut self) -> &mut Whitelist {
        &mut self.whitelist
    }

    pub fn state(&self) -> &SignificanceState {
        &self.state
    }

    pub fn history(&self) -> &CostHistory {
        &self.history
    }

    pub fn snapshot(&self, file: &FileId) -> Option<&str> {
        self.snapshots.get(file).map(String::as_str)
    }

    /// Take in a fresh cost report for `file`, analyzed from `text`.
    ///
    /// The text becomes the new snapshot. History entries carry the causes
    /// flagged since the previous analysis, after which the file's flags are
    /// cleared: the new measurement already reflects those edits.
    pub fn record_analysis(
        &mut self,
        file: &FileId,
        text: &str,
        records: &[CostRecord],
        timestamp: DateTime<Utc>,
    ) -> StateDelta {
        self.registry.absorb(records, self.relevance);

        let causes: HashMap<String, Vec<String>> = records
            .iter()
            .filter_map(|record| record.bare_name())
            .map(|name| {
                let methods = self.state.cause_methods_for_name(file, name);
                (name.to_string(), methods)
            })
            .collect();
        let recorded = self.history.record(file, records, timestamp, &causes);

        self.snapshots.insert(file.clone(), text.to_string());
        let (state, delta) = self.state.reconcile(file, Default::default());
        self.state = state;

        debug!(file = %file, records = records.len(), recorded, "Analysis recorded");
        delta
    }

    /// Check a saved text against the file's snapshot and keep the new flags.
    pub fn check_save(&mut self, file: &FileId, saved_text: &str) -> CheckOutcome {
        if !self.enabled {
            return ChangeSignificanceAnalyzer::new(&self.registry, &self.whitelist).check(
                file,
                None,
                saved_text,
                &[],
                &self.state,
            );
        }

        let snapshot = self.snapshots.get(file).map(String::as_str);
        let diff = snapshot
            .map(|old| line_diff(old, saved_text))
            .unwrap_or_default();
        let outcome = ChangeSignificanceAnalyzer::new(&self.registry, &self.whitelist).check(
            file,
            snapshot,
            saved_text,
            &diff,
            &self.state,
        );
        self.state = outcome.state.clone();

        if outcome.state_changed {
            info!(
                file = %file,
                significant = outcome.report.significant,
                "Suspect methods changed"
            );
        }
        outcome
    }

    /// Declarations of `text` for annotation placement.
    pub fn declarations(&self, text: &str) -> Vec<MethodDeclaration> {
        index_declarations(text)
    }
}
