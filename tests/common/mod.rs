//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use sift::editable::{Position, TextRange};
use sift::model::Document;

/// Create a test document with given text and a collapsed caret
pub fn test_document(text: &str, line: usize, column: usize) -> Document {
    let mut doc = Document::with_text(text);
    doc.selection = TextRange::collapsed(Position::new(line, column));
    doc
}

/// Create a test document with given text and a selection (start to end)
pub fn test_document_with_selection(
    text: &str,
    start_line: usize,
    start_col: usize,
    end_line: usize,
    end_col: usize,
) -> Document {
    let mut doc = Document::with_text(text);
    doc.selection = TextRange::new(
        Position::new(start_line, start_col),
        Position::new(end_line, end_col),
    );
    doc
}

/// Helper to get buffer content as string
pub fn buffer_to_string(doc: &Document) -> String {
    doc.buffer.to_string()
}

/// Range on a single line
pub fn span(line: usize, start: usize, end: usize) -> TextRange {
    TextRange::on_line(line, start, end)
}

/// Ten lines: "line 1" .. "line 10"
pub fn ten_line_document() -> Document {
    let lines: Vec<String> = (1..=10).map(|i| format!("line {}", i)).collect();
    Document::with_text(&lines.join("\n"))
}
