//! Wraparound find-next / find-previous relative to the buffer's selection.

use crate::editable::{Position, TextBuffer, TextRange};

use super::error::FindError;
use super::goto::GotoLine;
use super::options::FindOptions;
use super::pattern::CompiledPattern;
use super::scanner::{Direction, RangeScan};

/// Search driver bound to one buffer.
///
/// Holds no search state of its own: every call starts from the buffer's
/// current selection.
pub struct Navigator<'a, B: TextBuffer + ?Sized> {
    buffer: &'a mut B,
}

impl<'a, B: TextBuffer + ?Sized> Navigator<'a, B> {
    pub fn new(buffer: &'a mut B) -> Self {
        Self { buffer }
    }

    pub fn buffer(&self) -> &B {
        self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut B {
        self.buffer
    }

    /// Select the next match after the current selection, wrapping to the
    /// start of the document when nothing follows it.
    pub fn find_next(
        &mut self,
        pattern: &str,
        options: FindOptions,
    ) -> Result<TextRange, FindError> {
        self.find(pattern, options, Direction::Forward)
    }

    /// Select the previous match before the current selection, wrapping to
    /// the end of the document when nothing precedes it.
    pub fn find_prev(
        &mut self,
        pattern: &str,
        options: FindOptions,
    ) -> Result<TextRange, FindError> {
        self.find(pattern, options, Direction::Backward)
    }

    pub fn find(
        &mut self,
        pattern: &str,
        options: FindOptions,
        direction: Direction,
    ) -> Result<TextRange, FindError> {
        let compiled = CompiledPattern::compile(pattern, options)?;
        let found = self
            .wraparound(&compiled, direction, |_, _| true)
            .ok_or(FindError::NotFound)?;

        tracing::debug!(
            pattern,
            ?direction,
            case_sensitive = compiled.is_case_sensitive(),
            found = %found,
            "find"
        );
        self.select(found);
        Ok(found)
    }

    /// Move the caret to the start of `line` (0-based, clamped) and return
    /// the line actually selected.
    pub fn goto_line(&mut self, line: i64) -> usize {
        let mut goto = GotoLine::for_buffer(&*self.buffer);
        let selected = goto.goto(line);
        self.select(TextRange::collapsed(Position::new(selected, 0)));
        selected
    }

    /// First match in `direction` that `accept` takes, searching from the
    /// selection to one end of the document and then wrapping.
    ///
    /// Forward, a match must start after the selection's start; the wrapped
    /// pass covers the whole document so a lone match is found again.
    pub(crate) fn wraparound<F>(
        &self,
        pattern: &CompiledPattern,
        direction: Direction,
        mut accept: F,
    ) -> Option<TextRange>
    where
        F: FnMut(&B, &TextRange) -> bool,
    {
        let buffer: &B = self.buffer;
        let whole = buffer.document_range();
        let selection = buffer.selection().normalized();
        let selected = TextRange::new(
            selection.start.min(whole.end),
            selection.end.min(whole.end),
        );

        let leading = match direction {
            Direction::Forward => TextRange::new(selected.end, whole.end),
            Direction::Backward => TextRange::new(whole.start, selected.start),
        };
        let found = RangeScan::new(leading, pattern)
            .matches(buffer, direction)
            .find(|m| {
                (direction == Direction::Backward || m.start > selected.start) && accept(buffer, m)
            });
        if found.is_some() {
            return found;
        }

        tracing::trace!(?direction, "search wrapped");
        RangeScan::new(whole, pattern)
            .matches(buffer, direction)
            .find(|m| accept(buffer, m))
    }

    fn select(&mut self, range: TextRange) {
        self.buffer.set_selection(range);
        self.buffer.make_visible(&range);
        self.buffer.invalidate();
    }
}
