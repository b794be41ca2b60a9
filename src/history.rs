//! Cost history per method, newest measurement first.
//!
//! A measurement is only recorded when its polynomial differs from the
//! newest stored one, so repeated analyses of unchanged code add nothing.
//! Each entry remembers which calls or loops were suspected of causing the
//! change when it was recorded.

use crate::registry::{CostRecord, ExecCost};
use crate::significance::FileId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub method_name: String,
    pub parameters: Vec<String>,
    pub exec_cost: ExecCost,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_cause_methods: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostHistory {
    entries: HashMap<String, Vec<HistoryEntry>>,
}

/// History key of a record: `file:name(T1,T2)`.
pub fn history_id(file: &FileId, record: &CostRecord) -> String {
    format!("{}:{}", file, record.signature())
}

impl CostHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a report for `file`; returns how many entries were added.
    ///
    /// `causes` maps a bare method name to the cause methods flagged for it.
    pub fn record(
        &mut self,
        file: &FileId,
        records: &[CostRecord],
        timestamp: DateTime<Utc>,
        causes: &HashMap<String, Vec<String>>,
    ) -> usize {
        let mut recorded = 0;
        for record in records {
            let Some(name) = record.bare_name() else {
                continue;
            };
            let history = self.entries.entry(history_id(file, record)).or_default();
            let unchanged = history
                .first()
                .is_some_and(|newest| newest.exec_cost.polynomial == record.exec_cost.polynomial);
            if unchanged {
                continue;
            }

            let change_cause_methods = causes.get(name).filter(|c| !c.is_empty()).cloned();
            history.insert(
                0,
                HistoryEntry {
                    method_name: name.to_string(),
                    parameters: record.parameters.clone(),
                    exec_cost: record.exec_cost.clone(),
                    timestamp,
                    change_cause_methods,
                },
            );
            recorded += 1;
        }
        recorded
    }

    /// Entries of one method, newest first.
    pub fn entries(&self, id: &str) -> &[HistoryEntry] {
        self.entries.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn latest(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries(id).first()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
