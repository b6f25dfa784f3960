//! Range scanner - lazy, line-by-line matches inside a bounded range.
//!
//! A [`RangeScan`] binds one normalized range to one pattern. Each call to
//! [`RangeScan::matches`] starts a fresh, finite enumeration in the requested
//! direction; nothing is mutated and an iterator can be dropped at any point.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::editable::{TextBuffer, TextRange};

use super::pattern::CompiledPattern;

/// Scan direction through the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Document order
    #[default]
    Forward,
    /// Reverse document order
    Backward,
}

/// One bounded range and the pattern to look for inside it.
#[derive(Debug, Clone, Copy)]
pub struct RangeScan<'p> {
    bound: TextRange,
    pattern: &'p CompiledPattern,
}

impl<'p> RangeScan<'p> {
    /// `bound` must already be normalized
    pub fn new(bound: TextRange, pattern: &'p CompiledPattern) -> Self {
        debug_assert!(bound.is_normalized(), "scan bound must be normalized");
        Self { bound, pattern }
    }

    /// Start a new enumeration of the matches in `buffer`
    pub fn matches<'b, B: TextBuffer + ?Sized>(
        &self,
        buffer: &'b B,
        direction: Direction,
    ) -> Matches<'b, 'p, B> {
        let next_line = self.pattern.has_pattern().then_some(match direction {
            Direction::Forward => self.bound.start.line,
            Direction::Backward => self.bound.end.line,
        });
        Matches {
            buffer,
            pattern: self.pattern,
            bound: self.bound,
            direction,
            next_line,
            pending: VecDeque::new(),
        }
    }

    pub fn forward<'b, B: TextBuffer + ?Sized>(&self, buffer: &'b B) -> Matches<'b, 'p, B> {
        self.matches(buffer, Direction::Forward)
    }

    pub fn backward<'b, B: TextBuffer + ?Sized>(&self, buffer: &'b B) -> Matches<'b, 'p, B> {
        self.matches(buffer, Direction::Backward)
    }
}

/// Iterator over the matches of a [`RangeScan`].
///
/// Lines are scanned one at a time as the iterator is pulled; only the
/// current line's matches are held.
pub struct Matches<'b, 'p, B: ?Sized> {
    buffer: &'b B,
    pattern: &'p CompiledPattern,
    bound: TextRange,
    direction: Direction,
    next_line: Option<usize>,
    pending: VecDeque<TextRange>,
}

impl<B: TextBuffer + ?Sized> Matches<'_, '_, B> {
    fn advance_line(&mut self) -> Option<usize> {
        let line = self.next_line?;
        self.next_line = match self.direction {
            Direction::Forward => (line < self.bound.end.line).then(|| line + 1),
            Direction::Backward => (line > self.bound.start.line).then(|| line - 1),
        };
        Some(line)
    }

    fn scan_line(&mut self, line: usize) {
        let buffer = self.buffer;
        let Some(text) = buffer.line(line) else {
            return;
        };

        let start_col = if line == self.bound.start.line {
            self.bound.start.column
        } else {
            0
        };
        let end_col = if line == self.bound.end.line {
            self.bound.end.column
        } else {
            usize::MAX
        };

        let found = self.pattern.find_in_line(&text, start_col, end_col);
        tracing::trace!(line, count = found.len(), "scanned line");

        let ranges = found
            .into_iter()
            .map(|(start, end)| TextRange::on_line(line, start, end));
        match self.direction {
            Direction::Forward => self.pending.extend(ranges),
            Direction::Backward => self.pending.extend(ranges.rev()),
        }
    }
}

impl<B: TextBuffer + ?Sized> Iterator for Matches<'_, '_, B> {
    type Item = TextRange;

    fn next(&mut self) -> Option<TextRange> {
        loop {
            if let Some(range) = self.pending.pop_front() {
                return Some(range);
            }
            let line = self.advance_line()?;
            self.scan_line(line);
        }
    }
}

impl<B: TextBuffer + ?Sized> FusedIterator for Matches<'_, '_, B> {}
