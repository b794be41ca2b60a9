//! Enclosing-method tracking over a linear diff stream.
//!
//! There is no brace matching: the method enclosing a changed line is the
//! most recent declaration header seen in stream order. Headers in unchanged
//! and added blocks are counted in new-document order, headers in removed
//! blocks in old-document order, so a header whose parameter list was edited
//! yields the same `name:k` key on both sides of the edit.

use crate::declarations::{OccurrenceCounter, OccurrenceKey};
use crate::diff::BlockKind;

#[derive(Debug, Clone, Default)]
pub(crate) struct DiffCursor {
    old_counter: OccurrenceCounter,
    new_counter: OccurrenceCounter,
    current: Option<OccurrenceKey>,
}

impl DiffCursor {
    /// Register a header seen in a block of `kind`; it becomes the current context.
    pub(crate) fn enter(&mut self, name: &str, kind: BlockKind) -> &OccurrenceKey {
        let occurrence = match kind {
            BlockKind::Unchanged => {
                self.old_counter.next(name);
                self.new_counter.next(name)
            }
            BlockKind::Added => self.new_counter.next(name),
            BlockKind::Removed => self.old_counter.next(name),
        };
        self.current.insert(OccurrenceKey::new(name, occurrence))
    }

    /// Method enclosing the current stream position, if any header was seen.
    pub(crate) fn current(&self) -> Option<&OccurrenceKey> {
        self.current.as_ref()
    }
}

/// Sides of the document a block of `kind` belongs to, as the block kind
/// whose counter each side advances.
pub(crate) fn sides(kind: BlockKind) -> &'static [BlockKind] {
    match kind {
        BlockKind::Unchanged => &[BlockKind::Removed, BlockKind::Added],
        BlockKind::Removed => &[BlockKind::Removed],
        BlockKind::Added => &[BlockKind::Added],
    }
}

/// Unterminated header text left at the end of the last block of each side.
///
/// A header wrapped over several lines can be split across diff blocks when
/// only one of its lines was edited. The open tail is prepended to the next
/// block of the same side so the header is still recognized there.
#[derive(Debug, Clone, Default)]
pub(crate) struct HeaderTails {
    old: String,
    new: String,
}

impl HeaderTails {
    pub(crate) fn get(&self, side: BlockKind) -> &str {
        match side {
            BlockKind::Removed => &self.old,
            _ => &self.new,
        }
    }

    /// Append a block's masked text to `side` and keep only what is still open.
    pub(crate) fn extend(&mut self, side: BlockKind, code: &str) {
        let tail = match side {
            BlockKind::Removed => &mut self.old,
            _ => &mut self.new,
        };
        tail.push_str(code);
        let open_from = tail.rfind(['{', '}', ';']).map_or(0, |i| i + 1);
        let open = &tail[open_from..];
        if open.matches('(').count() > open.matches(')').count() {
            *tail = open.to_string();
        } else {
            tail.clear();
        }
    }
}
