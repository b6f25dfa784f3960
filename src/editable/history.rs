//! Edit history (undo/redo) for documents driven by replace commands.

use super::range::TextRange;

/// A single text substitution at a character offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Character offset where the edit occurred
    pub offset: usize,
    /// Text that was deleted (empty for pure inserts)
    pub deleted_text: String,
    /// Text that was inserted (empty for pure deletes)
    pub inserted_text: String,
}

impl EditOperation {
    /// Create a replace operation
    pub fn replace(offset: usize, deleted_text: String, inserted_text: String) -> Self {
        Self {
            offset,
            deleted_text,
            inserted_text,
        }
    }

    /// Get the inverse operation for undo
    pub fn inverse(&self) -> Self {
        Self {
            offset: self.offset,
            deleted_text: self.inserted_text.clone(),
            inserted_text: self.deleted_text.clone(),
        }
    }
}

/// Operations applied together and undone together.
///
/// Operations are sequential: each offset is expressed in the text as it
/// stands after the preceding operations of the batch have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBatch {
    pub operations: Vec<EditOperation>,
    /// Selection before the batch
    pub selection_before: TextRange,
    /// Selection after the batch
    pub selection_after: TextRange,
}

impl EditBatch {
    /// Get the inverse batch: inverted operations in reverse order
    pub fn inverse(&self) -> Self {
        Self {
            operations: self
                .operations
                .iter()
                .rev()
                .map(EditOperation::inverse)
                .collect(),
            selection_before: self.selection_after,
            selection_after: self.selection_before,
        }
    }
}

/// Edit history with undo/redo stacks.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<EditBatch>,
    redo_stack: Vec<EditBatch>,
    max_size: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    /// Create a new edit history with default max size
    pub fn new() -> Self {
        Self::with_max_size(1000)
    }

    /// Create a new edit history with specified max size
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
        }
    }

    /// Push a batch onto the undo stack (clears redo stack)
    pub fn push(&mut self, batch: EditBatch) {
        self.redo_stack.clear();
        self.undo_stack.push(batch);

        while self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
    }

    /// Pop a batch from the undo stack (its inverse moves to the redo stack).
    /// The caller applies the inverse of the returned batch.
    pub fn pop_undo(&mut self) -> Option<EditBatch> {
        let batch = self.undo_stack.pop()?;
        self.redo_stack.push(batch.inverse());
        Some(batch)
    }

    /// Pop a batch from the redo stack (its inverse moves to the undo stack).
    /// The caller applies the inverse of the returned batch.
    pub fn pop_redo(&mut self) -> Option<EditBatch> {
        let batch = self.redo_stack.pop()?;
        self.undo_stack.push(batch.inverse());
        Some(batch)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }
}
