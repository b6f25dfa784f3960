//! Go-to-line state: clamps a requested line into the buffer's bounds.

use crate::editable::TextBuffer;

/// State for one go-to-line interaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GotoLine {
    /// Highest selectable line index
    pub max_line_count: usize,
    /// Last clamped request
    pub selected_line: usize,
}

impl GotoLine {
    pub fn new(max_line_count: usize) -> Self {
        Self {
            max_line_count,
            selected_line: 0,
        }
    }

    /// Bounds taken from `buffer`: the last line index is the maximum
    pub fn for_buffer<B: TextBuffer + ?Sized>(buffer: &B) -> Self {
        Self::new(buffer.line_count().saturating_sub(1))
    }

    /// Clamp `requested` into `[0, max_line_count]` and remember it.
    /// Out-of-range input is never an error.
    pub fn goto(&mut self, requested: i64) -> usize {
        self.selected_line = if requested <= 0 {
            0
        } else {
            usize::try_from(requested)
                .unwrap_or(usize::MAX)
                .min(self.max_line_count)
        };
        self.selected_line
    }

    /// Parse 1-based user input ("42") into the 0-based request for [`goto`].
    ///
    /// [`goto`]: GotoLine::goto
    pub fn parse_input(input: &str) -> Option<i64> {
        let line = input.trim().parse::<i64>().ok()?;
        Some(line.saturating_sub(1))
    }
}
