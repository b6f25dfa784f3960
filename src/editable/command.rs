//! Mutation commands handed to a buffer's undo-capable executor.
//!
//! The engine never edits text directly. It describes the edit as a
//! [`ReplaceCommand`] value and submits it; the executor applies every range
//! of the command as one undoable step.

use serde::{Deserialize, Serialize};

use super::range::TextRange;

/// Unique identifier for a document (the target of a command)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub u64);

/// Replace every range with the same text, as a single undo step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceCommand {
    /// Document the command is addressed to
    pub target: DocumentId,
    /// Normalized, non-overlapping ranges to replace
    pub ranges: Vec<TextRange>,
    /// Replacement text (inserted literally)
    pub value: String,
}

impl ReplaceCommand {
    /// Create a command; ranges are normalized on the way in
    pub fn new(target: DocumentId, ranges: Vec<TextRange>, value: impl Into<String>) -> Self {
        Self {
            target,
            ranges: ranges.into_iter().map(TextRange::normalized).collect(),
            value: value.into(),
        }
    }

    /// Command replacing one range
    pub fn single(target: DocumentId, range: TextRange, value: impl Into<String>) -> Self {
        Self::new(target, vec![range], value)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}
