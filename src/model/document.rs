//! Document model - a rope-backed text buffer with selection, read-only
//! regions and an undo-capable command executor.

use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use std::ops::{Range, RangeInclusive};
use std::path::Path;

use crate::editable::{
    DocumentId, EditBatch, EditHistory, EditOperation, Position, ReplaceCommand, TextBuffer,
    TextRange,
};

/// Document state - the text buffer plus everything the find/replace engine
/// queries through [`TextBuffer`].
#[derive(Debug, Clone)]
pub struct Document {
    /// Identifier matched against the target of submitted commands
    pub id: DocumentId,
    /// The text buffer
    pub buffer: Rope,
    /// Current selection (start may follow end for backward selections)
    pub selection: TextRange,
    /// Whole-document write protection
    pub read_only: bool,
    /// Whether the buffer has unapplied-to-disk changes
    pub is_modified: bool,
    /// Revision counter (incremented on each edit, undo and redo)
    pub revision: u64,
    /// Last range requested to be scrolled into view
    pub visible_range: Option<TextRange>,
    /// Number of redraws requested (coalesced while an update is held)
    pub redraw_requests: usize,

    /// Protected spans as char offsets; they move with the text
    read_only_regions: Vec<Range<usize>>,
    history: EditHistory,
    update_depth: usize,
    pending_redraw: bool,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            id: DocumentId::default(),
            buffer: Rope::from_str(text),
            selection: TextRange::default(),
            read_only: false,
            is_modified: false,
            revision: 0,
            visible_range: None,
            redraw_requests: 0,
            read_only_regions: Vec::new(),
            history: EditHistory::new(),
            update_depth: 0,
            pending_redraw: false,
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::with_text(&content))
    }

    pub fn with_id(mut self, id: DocumentId) -> Self {
        self.id = id;
        self
    }

    /// Bound the number of undo steps kept
    pub fn with_history_limit(mut self, max_size: usize) -> Self {
        self.history = EditHistory::with_max_size(max_size);
        self
    }

    /// Full content as a String
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Convert a (line, column) position to a char offset.
    /// Uses ropey's O(log n) line_to_char.
    pub fn cursor_to_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.buffer.len_lines() {
            return self.buffer.len_chars();
        }
        let line_start = self.buffer.line_to_char(line);
        line_start + column.min(self.line_length(line))
    }

    /// Convert a char offset to a (line, column) position
    pub fn offset_to_cursor(&self, offset: usize) -> (usize, usize) {
        let clamped = offset.min(self.buffer.len_chars());
        let line = self.buffer.char_to_line(clamped);
        let line_start = self.buffer.line_to_char(line);
        (line, clamped - line_start)
    }

    pub fn position_to_offset(&self, pos: Position) -> usize {
        self.cursor_to_offset(pos.line, pos.column)
    }

    pub fn offset_to_position(&self, offset: usize) -> Position {
        self.offset_to_cursor(offset).into()
    }

    // =========================================================================
    // Read-only regions
    // =========================================================================

    /// Mark a range as read-only
    pub fn protect(&mut self, range: TextRange) {
        let range = range.normalized();
        let start = self.position_to_offset(range.start);
        let end = self.position_to_offset(range.end);
        if start < end {
            self.read_only_regions.push(start..end);
        }
    }

    /// Mark whole lines (0-indexed, inclusive) as read-only
    pub fn protect_lines(&mut self, lines: RangeInclusive<usize>) {
        let last_line = self.line_count().saturating_sub(1);
        let first = (*lines.start()).min(last_line);
        let last = (*lines.end()).min(last_line);
        self.protect(TextRange::new(
            Position::new(first, 0),
            Position::new(last, self.line_length(last)),
        ));
    }

    /// Current read-only regions as ranges
    pub fn read_only_regions(&self) -> Vec<TextRange> {
        self.read_only_regions
            .iter()
            .map(|r| {
                TextRange::new(
                    self.offset_to_position(r.start),
                    self.offset_to_position(r.end),
                )
            })
            .collect()
    }

    // =========================================================================
    // Undo / redo
    // =========================================================================

    /// Undo the last submitted command
    pub fn undo(&mut self) -> bool {
        let Some(batch) = self.history.pop_undo() else {
            return false;
        };
        self.apply_batch(&batch.inverse());
        true
    }

    /// Redo the last undone command
    pub fn redo(&mut self) -> bool {
        let Some(batch) = self.history.pop_redo() else {
            return false;
        };
        self.apply_batch(&batch.inverse());
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    /// Whether a begin/end update bracket is currently held
    pub fn is_updating(&self) -> bool {
        self.update_depth > 0
    }

    fn apply_batch(&mut self, batch: &EditBatch) {
        for op in &batch.operations {
            self.apply_operation(op);
        }
        self.selection = batch.selection_after;
        self.mark_edited();
    }

    fn apply_operation(&mut self, op: &EditOperation) {
        let removed = op.deleted_text.chars().count();
        let inserted = op.inserted_text.chars().count();
        if removed > 0 {
            self.buffer.remove(op.offset..op.offset + removed);
        }
        if inserted > 0 {
            self.buffer.insert(op.offset, &op.inserted_text);
        }
        self.shift_regions(op.offset, removed, inserted);
    }

    /// Keep protected spans attached to their text after an edit
    fn shift_regions(&mut self, offset: usize, removed: usize, inserted: usize) {
        let edit_end = offset + removed;
        for region in &mut self.read_only_regions {
            if region.end <= offset {
                continue;
            }
            if region.start >= edit_end {
                region.start = region.start + inserted - removed;
                region.end = region.end + inserted - removed;
            } else {
                // Edit overlapped the region (undo of an edit made before protection)
                region.start = region.start.min(offset);
                region.end = (region.end + inserted)
                    .saturating_sub(removed)
                    .max(offset + inserted);
            }
        }
        self.read_only_regions.retain(|r| r.start < r.end);
    }

    fn mark_edited(&mut self) {
        self.is_modified = true;
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of trailing newline chars (`\n` or `\r\n`) on a rope line
fn newline_len(line: RopeSlice<'_>) -> usize {
    let len = line.len_chars();
    if len > 0 && line.char(len - 1) == '\n' {
        if len > 1 && line.char(len - 2) == '\r' {
            2
        } else {
            1
        }
    } else {
        0
    }
}

impl TextBuffer for Document {
    fn id(&self) -> DocumentId {
        self.id
    }

    fn line_count(&self) -> usize {
        self.buffer.len_lines().max(1)
    }

    fn line_length(&self, line: usize) -> usize {
        if line >= self.buffer.len_lines() {
            return 0;
        }
        let slice = self.buffer.line(line);
        slice.len_chars() - newline_len(slice)
    }

    /// Returns Cow::Borrowed if the line is stored contiguously in a single
    /// chunk, otherwise an owned copy.
    fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        if line >= self.buffer.len_lines() {
            return None;
        }
        let slice = self.buffer.line(line);
        let trimmed = slice.slice(..slice.len_chars() - newline_len(slice));
        match trimmed.as_str() {
            Some(s) => Some(Cow::Borrowed(s)),
            None => Some(Cow::Owned(trimmed.to_string())),
        }
    }

    fn selection(&self) -> TextRange {
        self.selection
    }

    fn set_selection(&mut self, range: TextRange) {
        self.selection = range;
    }

    fn is_read_only(&self, range: &TextRange) -> bool {
        if self.read_only {
            return true;
        }
        let range = range.normalized();
        let start = self.position_to_offset(range.start);
        let end = self.position_to_offset(range.end);
        self.read_only_regions.iter().any(|region| {
            if start == end {
                region.start < start && start < region.end
            } else {
                start < region.end && region.start < end
            }
        })
    }

    fn make_visible(&mut self, range: &TextRange) {
        tracing::trace!(range = %range, "make visible");
        self.visible_range = Some(range.normalized());
    }

    fn invalidate(&mut self) {
        if self.update_depth > 0 {
            self.pending_redraw = true;
        } else {
            self.redraw_requests += 1;
        }
    }

    fn submit(&mut self, command: ReplaceCommand) {
        if command.target != self.id {
            tracing::warn!(
                target_doc = ?command.target,
                document = ?self.id,
                "Ignoring replace command addressed to another document"
            );
            return;
        }
        if command.is_empty() {
            return;
        }

        let mut spans: Vec<(usize, usize)> = command
            .ranges
            .iter()
            .map(|r| (self.position_to_offset(r.start), self.position_to_offset(r.end)))
            .collect();
        spans.sort_unstable();

        let inserted_len = command.value.chars().count();
        let selection_before = self.selection;
        let mut operations = Vec::with_capacity(spans.len());
        let mut inserted_total = 0;
        let mut removed_total = 0;
        let mut last_end = 0;

        for (start, end) in spans {
            if start < last_end {
                tracing::warn!(start, end, "Skipping overlapping range in replace command");
                continue;
            }
            last_end = end;

            // Rebase onto the text as edited so far
            let offset = start + inserted_total - removed_total;
            let removed = end - start;
            let deleted_text = self.buffer.slice(offset..offset + removed).to_string();
            let op = EditOperation::replace(offset, deleted_text, command.value.clone());
            self.apply_operation(&op);

            inserted_total += inserted_len;
            removed_total += removed;
            operations.push(op);
        }

        let Some(last) = operations.last() else {
            return;
        };
        let caret = self.offset_to_position(last.offset + inserted_len);
        self.selection = TextRange::collapsed(caret);
        tracing::debug!(
            ranges = operations.len(),
            revision = self.revision + 1,
            "Applied replace command"
        );
        self.history.push(EditBatch {
            operations,
            selection_before,
            selection_after: self.selection,
        });
        self.mark_edited();
    }

    fn begin_update(&mut self) {
        self.update_depth += 1;
    }

    fn end_update(&mut self) {
        self.update_depth = self.update_depth.saturating_sub(1);
        if self.update_depth == 0 && self.pending_redraw {
            self.pending_redraw = false;
            self.redraw_requests += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(doc: &Document, ranges: Vec<TextRange>, value: &str) -> ReplaceCommand {
        ReplaceCommand::new(doc.id, ranges, value)
    }

    // ========================================================================
    // Line access
    // ========================================================================

    #[test]
    fn test_empty_document_has_one_line() {
        let doc = Document::new();
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line_length(0), 0);
        assert_eq!(doc.line(0).as_deref(), Some(""));
    }

    #[test]
    fn test_line_strips_lf_and_crlf() {
        let doc = Document::with_text("one\r\ntwo\nthree");
        assert_eq!(doc.line(0).as_deref(), Some("one"));
        assert_eq!(doc.line(1).as_deref(), Some("two"));
        assert_eq!(doc.line(2).as_deref(), Some("three"));
        assert_eq!(doc.line_length(0), 3);
        assert!(doc.line(3).is_none());
    }

    #[test]
    fn test_line_length_counts_chars() {
        let doc = Document::with_text("héllo 😀\nx");
        assert_eq!(doc.line_length(0), 7);
    }

    #[test]
    fn test_offset_position_conversion() {
        let doc = Document::with_text("hello\nworld");
        assert_eq!(doc.offset_to_position(6), Position::new(1, 0));
        assert_eq!(doc.position_to_offset(Position::new(1, 5)), 11);
        // Column clamps to line length
        assert_eq!(doc.cursor_to_offset(0, 99), 5);
    }

    // ========================================================================
    // Command execution
    // ========================================================================

    #[test]
    fn test_submit_single_range() {
        let mut doc = Document::with_text("hello world");
        let cmd = command(&doc, vec![TextRange::on_line(0, 6, 11)], "there");
        doc.submit(cmd);

        assert_eq!(doc.text(), "hello there");
        assert_eq!(doc.selection, TextRange::collapsed(Position::new(0, 11)));
        assert!(doc.is_modified);
        assert_eq!(doc.undo_count(), 1);
    }

    #[test]
    fn test_submit_multiple_ranges_rebases_offsets() {
        let mut doc = Document::with_text("a-b-c\nb");
        let cmd = command(
            &doc,
            vec![TextRange::on_line(1, 0, 1), TextRange::on_line(0, 2, 3)],
            "BBB",
        );
        doc.submit(cmd);
        assert_eq!(doc.text(), "a-BBB-c\nBBB");
        assert_eq!(doc.undo_count(), 1);
    }

    #[test]
    fn test_submit_ignores_other_document() {
        let mut doc = Document::with_text("abc").with_id(DocumentId(1));
        doc.submit(ReplaceCommand::single(
            DocumentId(2),
            TextRange::on_line(0, 0, 1),
            "x",
        ));
        assert_eq!(doc.text(), "abc");
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_submit_empty_command_is_noop() {
        let mut doc = Document::with_text("abc");
        doc.submit(command(&doc, vec![], "x"));
        assert_eq!(doc.revision, 0);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_undo_restores_text_and_selection_in_one_step() {
        let mut doc = Document::with_text("cat cat\ncat");
        doc.selection = TextRange::on_line(0, 0, 3);
        let cmd = command(
            &doc,
            vec![
                TextRange::on_line(0, 0, 3),
                TextRange::on_line(0, 4, 7),
                TextRange::on_line(1, 0, 3),
            ],
            "dog",
        );
        doc.submit(cmd);
        assert_eq!(doc.text(), "dog dog\ndog");

        assert!(doc.undo());
        assert_eq!(doc.text(), "cat cat\ncat");
        assert_eq!(doc.selection, TextRange::on_line(0, 0, 3));
        assert!(!doc.can_undo());

        assert!(doc.redo());
        assert_eq!(doc.text(), "dog dog\ndog");
        assert!(!doc.redo());
    }

    #[test]
    fn test_undo_with_length_changing_replacement() {
        let mut doc = Document::with_text("x1x1x");
        let cmd = command(
            &doc,
            vec![TextRange::on_line(0, 1, 2), TextRange::on_line(0, 3, 4)],
            "",
        );
        doc.submit(cmd);
        assert_eq!(doc.text(), "xxx");
        doc.undo();
        assert_eq!(doc.text(), "x1x1x");
    }

    #[test]
    fn test_history_limit() {
        let mut doc = Document::with_text("aaaa").with_history_limit(2);
        for col in 0..4 {
            let cmd = command(&doc, vec![TextRange::on_line(0, col, col + 1)], "b");
            doc.submit(cmd);
        }
        assert_eq!(doc.undo_count(), 2);
    }

    // ========================================================================
    // Read-only regions
    // ========================================================================

    #[test]
    fn test_read_only_overlap() {
        let mut doc = Document::with_text("hello world");
        doc.protect(TextRange::on_line(0, 6, 11));

        assert!(doc.is_read_only(&TextRange::on_line(0, 6, 8)));
        assert!(doc.is_read_only(&TextRange::on_line(0, 4, 7)));
        assert!(!doc.is_read_only(&TextRange::on_line(0, 0, 5)));
        assert!(!doc.is_read_only(&TextRange::on_line(0, 0, 6)));
    }

    #[test]
    fn test_read_only_empty_range_inside_region() {
        let mut doc = Document::with_text("hello world");
        doc.protect(TextRange::on_line(0, 6, 11));

        assert!(doc.is_read_only(&TextRange::collapsed(Position::new(0, 8))));
        // Edges of the region stay writable for insertion
        assert!(!doc.is_read_only(&TextRange::collapsed(Position::new(0, 6))));
        assert!(!doc.is_read_only(&TextRange::collapsed(Position::new(0, 11))));
    }

    #[test]
    fn test_read_only_whole_document() {
        let mut doc = Document::with_text("abc");
        doc.read_only = true;
        assert!(doc.is_read_only(&TextRange::on_line(0, 0, 1)));
    }

    #[test]
    fn test_read_only_region_follows_text() {
        let mut doc = Document::with_text("ab LOCK");
        doc.protect(TextRange::on_line(0, 3, 7));
        let cmd = command(&doc, vec![TextRange::on_line(0, 0, 2)], "abcdef");
        doc.submit(cmd);

        assert_eq!(doc.text(), "abcdef LOCK");
        assert_eq!(doc.read_only_regions(), vec![TextRange::on_line(0, 7, 11)]);
        assert!(doc.is_read_only(&TextRange::on_line(0, 7, 8)));
        assert!(!doc.is_read_only(&TextRange::on_line(0, 3, 6)));
    }

    #[test]
    fn test_protect_lines_clamps() {
        let mut doc = Document::with_text("one\ntwo\nthree");
        doc.protect_lines(1..=10);
        assert_eq!(
            doc.read_only_regions(),
            vec![TextRange::new(Position::new(1, 0), Position::new(2, 5))]
        );
    }

    // ========================================================================
    // Rendering hints
    // ========================================================================

    #[test]
    fn test_invalidate_coalesced_during_update() {
        let mut doc = Document::with_text("abc");
        doc.begin_update();
        doc.begin_update();
        doc.invalidate();
        doc.invalidate();
        doc.end_update();
        assert_eq!(doc.redraw_requests, 0);
        doc.end_update();
        assert_eq!(doc.redraw_requests, 1);
        assert!(!doc.is_updating());
    }

    #[test]
    fn test_invalidate_outside_update() {
        let mut doc = Document::with_text("abc");
        doc.invalidate();
        doc.invalidate();
        assert_eq!(doc.redraw_requests, 2);
    }

    #[test]
    fn test_make_visible_records_normalized_range() {
        let mut doc = Document::with_text("abc");
        doc.make_visible(&TextRange::on_line(0, 3, 1));
        assert_eq!(doc.visible_range, Some(TextRange::on_line(0, 1, 3)));
    }
}
