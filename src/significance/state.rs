//! Per-file record of which methods are currently suspect.
//!
//! The state is a persistent map, so a check can return an updated copy
//! without disturbing the caller's previous value.

use crate::declarations::OccurrenceKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Cause snippets recorded for one method.
pub type CauseSnippets = im::OrdSet<String>;

/// Flagged methods of one file.
pub type FileFlags = im::OrdMap<OccurrenceKey, CauseSnippets>;

/// Identifies the file a snapshot and its flags belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for FileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&Path> for FileId {
    fn from(path: &Path) -> Self {
        Self(path.display().to_string())
    }
}

/// What a reconciliation changed for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateDelta {
    pub added: Vec<OccurrenceKey>,
    pub removed: Vec<OccurrenceKey>,
    /// Keys flagged before and after whose snippets differ.
    pub updated: Vec<OccurrenceKey>,
}

impl StateDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

/// `file -> method occurrence -> cause snippets`, holding only flagged methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignificanceState {
    files: im::HashMap<FileId, FileFlags>,
}

impl SignificanceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags_for(&self, file: &FileId) -> Option<&FileFlags> {
        self.files.get(file)
    }

    pub fn is_flagged(&self, file: &FileId, key: &OccurrenceKey) -> bool {
        self.flags_for(file).is_some_and(|flags| flags.contains_key(key))
    }

    pub fn causes_for(&self, file: &FileId, key: &OccurrenceKey) -> Option<&CauseSnippets> {
        self.flags_for(file).and_then(|flags| flags.get(key))
    }

    /// Distinct cause method names recorded for any occurrence of `method`.
    pub fn cause_methods_for_name(&self, file: &FileId, method: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .flags_for(file)
            .into_iter()
            .flat_map(|flags| flags.iter())
            .filter(|(key, _)| key.name == method)
            .flat_map(|(_, snippets)| snippets.iter())
            .map(|snippet| cause_method(snippet).to_string())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Replace the flags of `file` with `current`, leaving other files untouched.
    ///
    /// Methods missing from `current` are no longer suspect and are dropped.
    pub fn reconcile(&self, file: &FileId, current: FileFlags) -> (Self, StateDelta) {
        let empty = FileFlags::new();
        let previous = self.files.get(file).unwrap_or(&empty);
        let delta = diff_flags(previous, &current);

        let files = if current.is_empty() {
            self.files.without(file)
        } else {
            self.files.update(file.clone(), current)
        };
        (Self { files }, delta)
    }

    /// Forget the flags of one file. Returns whether any were present.
    pub fn remove_file(&mut self, file: &FileId) -> bool {
        self.files.remove(file).is_some()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

fn diff_flags(previous: &FileFlags, current: &FileFlags) -> StateDelta {
    let mut delta = StateDelta::default();
    for (key, snippets) in current {
        match previous.get(key) {
            None => delta.added.push(key.clone()),
            Some(old) if old != snippets => delta.updated.push(key.clone()),
            Some(_) => {}
        }
    }
    delta.removed = previous
        .keys()
        .filter(|key| !current.contains_key(*key))
        .cloned()
        .collect();
    delta
}

/// Bare method name of a cause snippet: `list.size()` gives `size`,
/// `for (int i = 0; ...)` gives `for`.
pub fn cause_method(snippet: &str) -> &str {
    let head = snippet.split('(').next().unwrap_or(snippet).trim();
    head.rsplit(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .next()
        .unwrap_or(head)
}
