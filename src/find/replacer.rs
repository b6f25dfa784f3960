//! Replace operations built on top of [`Navigator`].
//!
//! Text is never edited in place: every mutation is described as a
//! [`ReplaceCommand`] and handed to the buffer's executor, which applies it
//! atomically and records it as a single undo step.

use crate::editable::{ReplaceCommand, TextBuffer, TextRange, UpdateGuard};

use super::error::FindError;
use super::navigator::Navigator;
use super::options::FindOptions;
use super::pattern::CompiledPattern;
use super::scanner::{Direction, RangeScan};

/// Find-and-replace driver bound to one buffer.
pub struct Replacer<'a, B: TextBuffer + ?Sized> {
    navigator: Navigator<'a, B>,
}

impl<'a, B: TextBuffer + ?Sized> Replacer<'a, B> {
    pub fn new(buffer: &'a mut B) -> Self {
        Self {
            navigator: Navigator::new(buffer),
        }
    }

    pub fn find_next(
        &mut self,
        pattern: &str,
        options: FindOptions,
    ) -> Result<TextRange, FindError> {
        self.navigator.find_next(pattern, options)
    }

    pub fn find_prev(
        &mut self,
        pattern: &str,
        options: FindOptions,
    ) -> Result<TextRange, FindError> {
        self.navigator.find_prev(pattern, options)
    }

    /// Replace the selected text with `value`.
    ///
    /// Fails without touching the buffer when the selection is empty or any
    /// part of it is read-only.
    pub fn replace_selection(&mut self, value: &str) -> Result<TextRange, FindError> {
        let buffer = self.navigator.buffer_mut();
        let selection = buffer.selection().normalized();
        if selection.is_empty() {
            return Err(FindError::EmptySelection);
        }
        if buffer.is_read_only(&selection) {
            return Err(FindError::ReadOnlySelection);
        }

        let command = ReplaceCommand::single(buffer.id(), selection, value);
        buffer.submit(command);
        let caret = buffer.selection();
        buffer.make_visible(&caret);
        buffer.invalidate();
        Ok(selection)
    }

    /// Replace the next writable match after the selection (with wraparound).
    /// Read-only matches are skipped, not fatal.
    pub fn replace_next(
        &mut self,
        pattern: &str,
        value: &str,
        options: FindOptions,
    ) -> Result<TextRange, FindError> {
        self.replace_one(pattern, value, options, Direction::Forward)
    }

    /// Replace the previous writable match before the selection (with
    /// wraparound).
    pub fn replace_prev(
        &mut self,
        pattern: &str,
        value: &str,
        options: FindOptions,
    ) -> Result<TextRange, FindError> {
        self.replace_one(pattern, value, options, Direction::Backward)
    }

    fn replace_one(
        &mut self,
        pattern: &str,
        value: &str,
        options: FindOptions,
        direction: Direction,
    ) -> Result<TextRange, FindError> {
        let compiled = CompiledPattern::compile(pattern, options)?;
        let target = self
            .navigator
            .wraparound(&compiled, direction, |buffer, m| !buffer.is_read_only(m))
            .ok_or(FindError::NotFound)?;

        let buffer = self.navigator.buffer_mut();
        {
            let mut guard = UpdateGuard::new(&mut *buffer);
            let command = ReplaceCommand::single(guard.id(), target, value);
            guard.submit(command);
            guard.set_selection(TextRange::collapsed(target.start));
        }

        tracing::debug!(pattern, ?direction, target = %target, "replaced match");
        let caret = buffer.selection();
        buffer.make_visible(&caret);
        buffer.invalidate();
        Ok(target)
    }

    /// Replace every match in the selection, or in the whole document when
    /// the selection is empty, as one undoable command.
    ///
    /// All or nothing: if any match is read-only the buffer is left untouched
    /// and 0 is returned, the same as when nothing matches. Use
    /// [`Replacer::blocked_match`] to tell the two apart.
    pub fn replace_all(
        &mut self,
        pattern: &str,
        value: &str,
        options: FindOptions,
    ) -> Result<usize, FindError> {
        let compiled = CompiledPattern::compile(pattern, options)?;
        let buffer = self.navigator.buffer_mut();

        let bound = replace_all_bound(&*buffer);
        let ranges: Vec<TextRange> = RangeScan::new(bound, &compiled)
            .forward(&*buffer)
            .collect();

        let mut guard = UpdateGuard::new(&mut *buffer);
        if let Some(blocked) = ranges.iter().find(|r| guard.is_read_only(r)) {
            tracing::warn!(blocked = %blocked, "Replace all aborted: match is read-only");
            return Ok(0);
        }
        if ranges.is_empty() {
            return Ok(0);
        }

        let count = ranges.len();
        let command = ReplaceCommand::new(guard.id(), ranges, value);
        guard.submit(command);
        let start = guard.document_start();
        guard.set_selection(TextRange::collapsed(start));
        guard.invalidate();
        drop(guard);

        tracing::info!(pattern, count, "replace all");
        Ok(count)
    }

    /// First read-only match that would make [`replace_all`] abort, if any.
    /// Scans the same range and changes nothing.
    ///
    /// [`replace_all`]: Replacer::replace_all
    pub fn blocked_match(
        &self,
        pattern: &str,
        options: FindOptions,
    ) -> Result<Option<TextRange>, FindError> {
        let compiled = CompiledPattern::compile(pattern, options)?;
        let buffer = self.navigator.buffer();
        let bound = replace_all_bound(buffer);
        let blocked = RangeScan::new(bound, &compiled)
            .forward(buffer)
            .find(|m| buffer.is_read_only(m));
        Ok(blocked)
    }
}

/// The selection when it is non-empty, else the whole document
fn replace_all_bound<B: TextBuffer + ?Sized>(buffer: &B) -> TextRange {
    let selection = buffer.selection().normalized();
    if selection.is_empty() {
        buffer.document_range()
    } else {
        selection
    }
}
