//! Command-line front end
//!
//! Loads one file into a [`Document`], applies the caret and read-only setup
//! given on the command line, runs a single engine action and reports the
//! outcome. The file is never written back.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::editable::{Position, TextBuffer, TextRange};
use crate::find::{FindError, FindOptions, GotoLine, Navigator, Replacer};
use crate::model::Document;

/// Find, replace and go to line in a text file
#[derive(Parser, Debug)]
#[command(name = "sift", version, about = "Find, replace and go to line in a text file")]
pub struct CliArgs {
    /// File to load (never modified)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Case-sensitive matching
    #[arg(short = 'c', long)]
    pub match_case: bool,

    /// Treat the pattern as a regular expression
    #[arg(short = 'e', long)]
    pub regex: bool,

    /// Only match whole words
    #[arg(short = 'w', long)]
    pub whole_word: bool,

    /// Start of the initial selection (1-indexed)
    #[arg(long, value_name = "LINE:COL", value_parser = parse_position)]
    pub at: Option<Position>,

    /// End of the initial selection (1-indexed, used with --at)
    #[arg(long, value_name = "LINE:COL", value_parser = parse_position, requires = "at")]
    pub to: Option<Position>,

    /// Mark lines as read-only (1-indexed, inclusive, repeatable)
    #[arg(long, value_name = "FROM-TO", value_parser = parse_line_span)]
    pub protect: Vec<RangeInclusive<usize>>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub action: Action,
}

/// Engine action to run
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Select the next (or previous) match
    Find {
        pattern: String,
        /// Search backwards
        #[arg(long)]
        prev: bool,
        /// Repeat the search N times
        #[arg(long, value_name = "N", default_value_t = 1)]
        count: usize,
    },
    /// Replace the next (or previous) writable match
    Replace {
        pattern: String,
        value: String,
        /// Search backwards
        #[arg(long)]
        prev: bool,
    },
    /// Replace every match in the selection, or in the whole file
    ReplaceAll { pattern: String, value: String },
    /// Replace the selected text
    ReplaceSelection { value: String },
    /// Move the caret to a line (1-indexed, clamped)
    Goto {
        #[arg(value_parser = parse_goto_line, allow_negative_numbers = true)]
        line: i64,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Find { .. } => "find",
            Action::Replace { .. } => "replace",
            Action::ReplaceAll { .. } => "replace-all",
            Action::ReplaceSelection { .. } => "replace-selection",
            Action::Goto { .. } => "goto",
        }
    }
}

impl CliArgs {
    /// Command-line flags OR-ed with the configured defaults
    pub fn options(&self, defaults: FindOptions) -> FindOptions {
        defaults.union(FindOptions::new(
            self.match_case,
            self.regex,
            self.whole_word,
        ))
    }

    /// Apply read-only spans and the initial selection to `doc`
    pub fn prepare(&self, doc: &mut Document) {
        for span in &self.protect {
            doc.protect_lines(span.clone());
        }
        if let Some(start) = self.at {
            let start = clamp_position(doc, start);
            let end = self.to.map_or(start, |end| clamp_position(doc, end));
            doc.set_selection(TextRange::new(start, end));
        }
    }
}

/// Outcome of one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub action: &'static str,
    /// Selection after the action (0-indexed)
    pub selection: TextRange,
    /// Number of replaced matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced: Option<usize>,
    /// Line reached by goto (1-indexed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Selected text for find, line text for goto, document text after a replace
    pub text: String,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.selection.start;
        let end = self.selection.end;
        writeln!(
            f,
            "{}: {}:{}-{}:{}",
            self.action,
            start.line + 1,
            start.column + 1,
            end.line + 1,
            end.column + 1
        )?;
        if let Some(count) = self.replaced {
            writeln!(f, "replaced {}", count)?;
        }
        if let Some(line) = self.line {
            writeln!(f, "line {}", line)?;
        }
        writeln!(f, "{}", self.text)
    }
}

/// Run `action` against `doc`
pub fn execute(
    doc: &mut Document,
    action: &Action,
    options: FindOptions,
) -> Result<Report, FindError> {
    tracing::debug!(action = action.name(), ?options, "executing");
    let mut replaced = None;
    let mut line = None;

    let text = match action {
        Action::Find {
            pattern,
            prev,
            count,
        } => {
            let mut navigator = Navigator::new(&mut *doc);
            for _ in 0..(*count).max(1) {
                if *prev {
                    navigator.find_prev(pattern, options)?;
                } else {
                    navigator.find_next(pattern, options)?;
                }
            }
            selected_text(doc)
        }
        Action::Replace {
            pattern,
            value,
            prev,
        } => {
            let mut replacer = Replacer::new(&mut *doc);
            if *prev {
                replacer.replace_prev(pattern, value, options)?;
            } else {
                replacer.replace_next(pattern, value, options)?;
            }
            doc.text()
        }
        Action::ReplaceAll { pattern, value } => {
            let mut replacer = Replacer::new(&mut *doc);
            let count = replacer.replace_all(pattern, value, options)?;
            if count == 0 && replacer.blocked_match(pattern, options)?.is_some() {
                return Err(FindError::ReadOnlySelection);
            }
            replaced = Some(count);
            doc.text()
        }
        Action::ReplaceSelection { value } => {
            Replacer::new(&mut *doc).replace_selection(value)?;
            replaced = Some(1);
            doc.text()
        }
        Action::Goto { line: requested } => {
            let reached = Navigator::new(&mut *doc).goto_line(*requested);
            line = Some(reached + 1);
            doc.line(reached).map(|l| l.into_owned()).unwrap_or_default()
        }
    };

    Ok(Report {
        action: action.name(),
        selection: doc.selection(),
        replaced,
        line,
        text,
    })
}

fn selected_text(doc: &Document) -> String {
    let selection = doc.selection().normalized();
    let start = doc.position_to_offset(selection.start);
    let end = doc.position_to_offset(selection.end);
    doc.buffer.slice(start..end).to_string()
}

fn clamp_position(doc: &Document, pos: Position) -> Position {
    let line = pos.line.min(doc.line_count().saturating_sub(1));
    Position::new(line, pos.column.min(doc.line_length(line)))
}

/// Parse `LINE:COL` (1-indexed) into a 0-indexed position
pub fn parse_position(s: &str) -> Result<Position, String> {
    let (line, col) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COL, got '{}'", s))?;
    let line: usize = line
        .trim()
        .parse()
        .map_err(|_| format!("invalid line '{}'", line))?;
    let col: usize = col
        .trim()
        .parse()
        .map_err(|_| format!("invalid column '{}'", col))?;
    Ok(Position::new(line.saturating_sub(1), col.saturating_sub(1)))
}

/// Parse `FROM-TO` or a single `LINE` (1-indexed) into a 0-indexed span
pub fn parse_line_span(s: &str) -> Result<RangeInclusive<usize>, String> {
    let parse = |part: &str| -> Result<usize, String> {
        let n: usize = part
            .trim()
            .parse()
            .map_err(|_| format!("invalid line '{}'", part))?;
        Ok(n.saturating_sub(1))
    };
    let (from, to) = match s.split_once('-') {
        Some((from, to)) => (parse(from)?, parse(to)?),
        None => {
            let line = parse(s)?;
            (line, line)
        }
    };
    if from > to {
        return Err(format!("line span '{}' is reversed", s));
    }
    Ok(from..=to)
}

fn parse_goto_line(s: &str) -> Result<i64, String> {
    GotoLine::parse_input(s).ok_or_else(|| format!("invalid line number '{}'", s))
}
