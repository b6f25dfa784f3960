//! The buffer contract the find/replace engine works against.
//!
//! [`TextBuffer`] abstracts over whatever owns the text: line storage, the
//! current selection, write permissions, rendering hints and the undo-capable
//! command executor. The engine only reads through it and submits commands.

use std::borrow::Cow;
use std::ops::{Deref, DerefMut};

use super::command::{DocumentId, ReplaceCommand};
use super::position::Position;
use super::range::TextRange;

/// Line-oriented text buffer with a selection and a command executor.
pub trait TextBuffer {
    /// Identifier used as the target of submitted commands
    fn id(&self) -> DocumentId;

    /// Number of lines (always >= 1)
    fn line_count(&self) -> usize;

    /// Length of a specific line in characters (excluding newline)
    fn line_length(&self, line: usize) -> usize;

    /// Get line content (without trailing newline)
    fn line(&self, line: usize) -> Option<Cow<'_, str>>;

    /// The current selection (may be unnormalized)
    fn selection(&self) -> TextRange;

    /// Replace the current selection
    fn set_selection(&mut self, range: TextRange);

    /// Whether any position covered by `range` refuses mutation.
    /// Derived from the buffer on every call.
    fn is_read_only(&self, range: &TextRange) -> bool;

    /// Scroll so that `range` is visible
    fn make_visible(&mut self, range: &TextRange);

    /// Request a redraw
    fn invalidate(&mut self);

    /// Hand a mutation to the undo-capable executor
    fn submit(&mut self, command: ReplaceCommand);

    /// Suspend layout/redraw until the matching `end_update`
    fn begin_update(&mut self);

    /// Release one `begin_update`
    fn end_update(&mut self);

    /// First position of the document
    fn document_start(&self) -> Position {
        Position::zero()
    }

    /// Last position of the document, taken from the buffer's last line
    fn document_end(&self) -> Position {
        let last = self.line_count().saturating_sub(1);
        Position::new(last, self.line_length(last))
    }

    /// Range covering the whole document
    fn document_range(&self) -> TextRange {
        TextRange::new(self.document_start(), self.document_end())
    }
}

/// Scoped `begin_update` / `end_update` bracket.
///
/// Dereferences to the buffer; `end_update` runs when the guard drops, on
/// every exit path.
pub struct UpdateGuard<'a, B: TextBuffer + ?Sized> {
    buffer: &'a mut B,
}

impl<'a, B: TextBuffer + ?Sized> UpdateGuard<'a, B> {
    pub fn new(buffer: &'a mut B) -> Self {
        buffer.begin_update();
        Self { buffer }
    }
}

impl<B: TextBuffer + ?Sized> Deref for UpdateGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.buffer
    }
}

impl<B: TextBuffer + ?Sized> DerefMut for UpdateGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.buffer
    }
}

impl<B: TextBuffer + ?Sized> Drop for UpdateGuard<'_, B> {
    fn drop(&mut self) {
        self.buffer.end_update();
    }
}
