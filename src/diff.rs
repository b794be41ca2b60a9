//! Line-diff blocks consumed by the significance analyzer.
//!
//! The block shape mirrors what LCS line-diff libraries emit: a run of text
//! that is either unchanged, purely added or purely removed. Blocks can be
//! decoded from the `{value, added?, removed?}` JSON form or produced locally
//! with [`line_diff`].

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Unchanged,
    Added,
    Removed,
}

/// One contiguous run of lines from a line diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub struct ChangedLineBlock {
    pub text: String,
    pub kind: BlockKind,
}

impl ChangedLineBlock {
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn unchanged(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Unchanged, text)
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Added, text)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Removed, text)
    }

    pub fn is_added(&self) -> bool {
        self.kind == BlockKind::Added
    }

    pub fn is_removed(&self) -> bool {
        self.kind == BlockKind::Removed
    }

    /// Added or removed.
    pub fn is_change(&self) -> bool {
        self.kind != BlockKind::Unchanged
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBlock {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    added: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    removed: Option<bool>,
}

impl From<RawBlock> for ChangedLineBlock {
    fn from(raw: RawBlock) -> Self {
        let kind = match (raw.added.unwrap_or(false), raw.removed.unwrap_or(false)) {
            (true, _) => BlockKind::Added,
            (false, true) => BlockKind::Removed,
            (false, false) => BlockKind::Unchanged,
        };
        Self::new(kind, raw.value)
    }
}

impl From<ChangedLineBlock> for RawBlock {
    fn from(block: ChangedLineBlock) -> Self {
        Self {
            count: Some(block.line_count()),
            added: block.is_added().then_some(true),
            removed: block.is_removed().then_some(true),
            value: block.text,
        }
    }
}

/// Line diff of two snapshots, merged into same-kind blocks.
///
/// Within a replaced hunk the removed lines come before the added ones.
pub fn line_diff(old: &str, new: &str) -> Vec<ChangedLineBlock> {
    let diff = TextDiff::from_lines(old, new);
    let mut blocks: Vec<ChangedLineBlock> = Vec::new();

    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => BlockKind::Unchanged,
            ChangeTag::Delete => BlockKind::Removed,
            ChangeTag::Insert => BlockKind::Added,
        };
        match blocks.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(change.value()),
            _ => blocks.push(ChangedLineBlock::new(kind, change.value())),
        }
    }

    blocks
}

/// Whether any block adds or removes text.
pub fn has_changes(blocks: &[ChangedLineBlock]) -> bool {
    blocks.iter().any(ChangedLineBlock::is_change)
}
