//! Replace tests
//!
//! Covers single-match replacement with read-only skipping, all-or-nothing
//! batch replacement and undo integration.

mod common;

use common::{buffer_to_string, span, test_document, test_document_with_selection};
use sift::editable::{Position, TextBuffer, TextRange};
use sift::find::{FindError, FindOptions, Replacer};
use sift::model::Document;

fn literal() -> FindOptions {
    FindOptions::literal()
}

// ========================================================================
// replace_selection
// ========================================================================

#[test]
fn test_replace_selection_on_empty_selection_fails() {
    let mut doc = test_document("hello world", 0, 3);
    let result = Replacer::new(&mut doc).replace_selection("bye");
    assert_eq!(result, Err(FindError::EmptySelection));
    assert_eq!(buffer_to_string(&doc), "hello world");
    assert!(!doc.is_modified);
    assert!(!doc.can_undo());
}

#[test]
fn test_replace_selection_reversed() {
    let mut doc = test_document_with_selection("hello world", 0, 5, 0, 0);
    Replacer::new(&mut doc).replace_selection("howdy").unwrap();
    assert_eq!(buffer_to_string(&doc), "howdy world");
}

#[test]
fn test_replace_selection_across_lines() {
    let mut doc = test_document_with_selection("one\ntwo\nthree", 0, 2, 2, 2);
    Replacer::new(&mut doc).replace_selection("-").unwrap();
    assert_eq!(buffer_to_string(&doc), "on-ree");
}

#[test]
fn test_replace_selection_partially_read_only() {
    let mut doc = test_document_with_selection("abc\ndef", 0, 1, 1, 1);
    doc.protect_lines(1..=1);
    let result = Replacer::new(&mut doc).replace_selection("x");
    assert_eq!(result, Err(FindError::ReadOnlySelection));
    assert_eq!(buffer_to_string(&doc), "abc\ndef");
}

// ========================================================================
// replace_next / replace_prev
// ========================================================================

#[test]
fn test_replace_next_then_again_walks_forward() {
    let mut doc = test_document("a1 a2 a3", 0, 0);
    let options = FindOptions::new(false, true, false);
    let mut replacer = Replacer::new(&mut doc);
    replacer.replace_next(r"a\d", "X", options).unwrap();
    replacer.replace_next(r"a\d", "X", options).unwrap();
    assert_eq!(buffer_to_string(&doc), "a1 X X");
}

#[test]
fn test_replace_next_skips_read_only_candidates() {
    let mut doc = test_document("foo foo foo", 0, 0);
    doc.protect(span(0, 4, 7));
    let replaced = Replacer::new(&mut doc)
        .replace_next("foo", "bar", literal())
        .unwrap();
    assert_eq!(replaced, span(0, 8, 11));
    assert_eq!(buffer_to_string(&doc), "foo foo bar");
    assert_eq!(doc.selection, TextRange::collapsed(Position::new(0, 8)));
}

#[test]
fn test_replace_next_read_only_skip_wraps() {
    let mut doc = test_document("foo\nfoo", 0, 0);
    doc.protect_lines(1..=1);
    Replacer::new(&mut doc)
        .replace_next("foo", "bar", literal())
        .unwrap();
    assert_eq!(buffer_to_string(&doc), "bar\nfoo");
}

#[test]
fn test_replace_next_only_read_only_matches() {
    let mut doc = test_document("keep foo", 0, 0);
    doc.protect(span(0, 5, 8));
    let result = Replacer::new(&mut doc).replace_next("foo", "bar", literal());
    assert_eq!(result, Err(FindError::NotFound));
    assert_eq!(buffer_to_string(&doc), "keep foo");
}

#[test]
fn test_replace_prev_skips_read_only_candidates() {
    let mut doc = test_document("foo foo foo", 0, 11);
    doc.protect(span(0, 8, 11));
    Replacer::new(&mut doc)
        .replace_prev("foo", "bar", literal())
        .unwrap();
    assert_eq!(buffer_to_string(&doc), "foo bar foo");
}

#[test]
fn test_replace_next_releases_update_bracket() {
    let mut doc = test_document("abc abc", 0, 0);
    Replacer::new(&mut doc)
        .replace_next("abc", "x", literal())
        .unwrap();
    assert!(!doc.is_updating());
    assert_eq!(doc.undo_count(), 1);
}

// ========================================================================
// replace_all
// ========================================================================

#[test]
fn test_replace_all_counts_and_resets_selection() {
    let mut doc = test_document("cat\ncat dog cat\ndog", 2, 1);
    let count = Replacer::new(&mut doc)
        .replace_all("cat", "cow", literal())
        .unwrap();
    assert_eq!(count, 3);
    assert_eq!(buffer_to_string(&doc), "cow\ncow dog cow\ndog");
    assert_eq!(doc.selection, TextRange::collapsed(Position::zero()));
}

#[test]
fn test_replace_all_zero_matches_changes_nothing() {
    let mut doc = test_document_with_selection("abc def", 0, 1, 0, 3);
    let revision = doc.revision;
    let count = Replacer::new(&mut doc)
        .replace_all("xyz", "q", literal())
        .unwrap();
    assert_eq!(count, 0);
    assert_eq!(buffer_to_string(&doc), "abc def");
    assert_eq!(doc.selection, span(0, 1, 3));
    assert_eq!(doc.revision, revision);
    assert_eq!(doc.undo_count(), 0);
}

#[test]
fn test_replace_all_aborts_when_middle_match_read_only() {
    // Matches A, B, C with B protected: neither A nor C may change
    let mut doc = test_document("A:x B:x C:x", 0, 0);
    doc.protect(span(0, 4, 7));
    let options = FindOptions::new(true, true, false);
    let mut replacer = Replacer::new(&mut doc);
    assert_eq!(replacer.replace_all(r"\w:x", "y", options), Ok(0));
    assert_eq!(replacer.blocked_match(r"\w:x", options), Ok(Some(span(0, 4, 7))));
    assert_eq!(buffer_to_string(&doc), "A:x B:x C:x");
    assert!(!doc.can_undo());
    assert!(!doc.is_updating());
    assert_eq!(doc.redraw_requests, 0);
}

#[test]
fn test_replace_all_read_only_document() {
    let mut doc = Document::with_text("a a");
    doc.read_only = true;
    let result = Replacer::new(&mut doc).replace_all("a", "b", literal());
    assert_eq!(result, Ok(0));
    assert_eq!(buffer_to_string(&doc), "a a");
    assert!(!doc.can_undo());
    assert!(!doc.is_updating());
}

#[test]
fn test_replace_all_whole_word_selection_ends_inside_word() {
    let mut doc = test_document_with_selection("a category", 0, 0, 0, 5);
    let count = Replacer::new(&mut doc)
        .replace_all("cat", "dog", FindOptions::new(false, false, true))
        .unwrap();
    assert_eq!(count, 0);
    assert_eq!(buffer_to_string(&doc), "a category");
    assert!(!doc.can_undo());
}

#[test]
fn test_replace_all_outside_protected_region_succeeds() {
    let mut doc = test_document("x\nlocked\nx", 0, 0);
    doc.protect_lines(1..=1);
    let count = Replacer::new(&mut doc).replace_all("x", "y", literal()).unwrap();
    assert_eq!(count, 2);
    assert_eq!(buffer_to_string(&doc), "y\nlocked\ny");
}

#[test]
fn test_replace_all_limited_to_selection() {
    let mut doc = test_document_with_selection("foo\nfoo\nfoo\nfoo", 1, 0, 2, 3);
    let count = Replacer::new(&mut doc)
        .replace_all("foo", "bar", literal())
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(buffer_to_string(&doc), "foo\nbar\nbar\nfoo");
}

#[test]
fn test_replace_all_growing_replacement() {
    let mut doc = test_document("a.a.a", 0, 0);
    Replacer::new(&mut doc)
        .replace_all("a", "long", literal())
        .unwrap();
    assert_eq!(buffer_to_string(&doc), "long.long.long");
}

#[test]
fn test_replace_all_value_is_literal() {
    let mut doc = test_document("k=1", 0, 0);
    Replacer::new(&mut doc)
        .replace_all(r"(\w)=(\d)", "$2=$1", FindOptions::new(false, true, false))
        .unwrap();
    assert_eq!(buffer_to_string(&doc), "$2=$1");
}

// ========================================================================
// Undo integration
// ========================================================================

#[test]
fn test_replace_all_undoes_in_one_step() {
    let mut doc = test_document("x y x y x", 0, 0);
    Replacer::new(&mut doc).replace_all("x", "zz", literal()).unwrap();
    assert_eq!(doc.undo_count(), 1);

    assert!(doc.undo());
    assert_eq!(buffer_to_string(&doc), "x y x y x");
    assert_eq!(doc.selection(), TextRange::collapsed(Position::zero()));

    assert!(doc.redo());
    assert_eq!(buffer_to_string(&doc), "zz y zz y zz");
}

#[test]
fn test_each_replace_next_is_its_own_undo_step() {
    let mut doc = test_document("a a a", 0, 0);
    let mut replacer = Replacer::new(&mut doc);
    replacer.replace_next("a", "b", literal()).unwrap();
    replacer.replace_next("a", "b", literal()).unwrap();
    assert_eq!(doc.undo_count(), 2);
    assert!(doc.undo());
    assert_eq!(buffer_to_string(&doc), "a b a");
}

#[test]
fn test_read_only_region_survives_replace_all_elsewhere() {
    let mut doc = test_document("ab LOCK ab", 0, 0);
    doc.protect(span(0, 3, 7));
    Replacer::new(&mut doc)
        .replace_all("ab", "abcd", literal())
        .unwrap();
    assert_eq!(buffer_to_string(&doc), "abcd LOCK abcd");
    assert_eq!(doc.read_only_regions(), vec![span(0, 5, 9)]);
}
