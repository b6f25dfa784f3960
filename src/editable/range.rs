//! Text ranges: an ordered pair of positions spanning part of a buffer.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::position::Position;

/// A span between two positions.
///
/// The endpoints are not intrinsically ordered: `start` may come after `end`
/// (a selection dragged backwards) until the range is normalized.
/// Read-only state is never stored here; ask the buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a collapsed range (a caret with nothing selected)
    pub const fn collapsed(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Range covering a single line from `start_col` to `end_col`
    pub const fn on_line(line: usize, start_col: usize, end_col: usize) -> Self {
        Self {
            start: Position::new(line, start_col),
            end: Position::new(line, end_col),
        }
    }

    /// Check if range is empty (start == end)
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if start precedes (or equals) end in document order
    pub fn is_normalized(&self) -> bool {
        self.start <= self.end
    }

    /// Reorder the endpoints so that start <= end
    pub fn normalize(&mut self) {
        if self.start > self.end {
            std::mem::swap(&mut self.start, &mut self.end);
        }
    }

    /// Normalized copy of this range
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Check if `other` lies entirely within this range
    pub fn encloses(&self, other: &TextRange) -> bool {
        let outer = self.normalized();
        let inner = other.normalized();
        inner.start >= outer.start && inner.end <= outer.end
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
