//! Pattern compiler - turns a query string plus [`FindOptions`] into a matcher.

use regex::{Regex, RegexBuilder};

use super::error::FindError;
use super::options::FindOptions;

/// A compiled search pattern.
///
/// An empty query compiles to a pattern that matches nothing.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Option<Regex>,
    case_sensitive: bool,
}

impl CompiledPattern {
    /// Compile `pattern` according to `options`:
    /// literal patterns are escaped, whole-word patterns are wrapped in word
    /// boundaries, and case sensitivity follows `match_case`.
    pub fn compile(pattern: &str, options: FindOptions) -> Result<Self, FindError> {
        let case_sensitive = options.match_case;
        if pattern.is_empty() {
            return Ok(Self {
                regex: None,
                case_sensitive,
            });
        }

        let mut source = if options.is_regex {
            pattern.to_string()
        } else {
            regex::escape(pattern)
        };
        if options.whole_word {
            source = format!(r"\b(?:{})\b", source);
        }

        let regex = RegexBuilder::new(&source)
            .case_insensitive(!case_sensitive)
            .build()?;

        Ok(Self {
            regex: Some(regex),
            case_sensitive,
        })
    }

    pub fn has_pattern(&self) -> bool {
        self.regex.is_some()
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Non-empty matches in `text` between char columns `start_col` and
    /// `end_col`, as (start, end) char columns in document order.
    pub fn find_in_line(
        &self,
        text: &str,
        start_col: usize,
        end_col: usize,
    ) -> Vec<(usize, usize)> {
        let Some(regex) = &self.regex else {
            return Vec::new();
        };

        let start_byte = char_to_byte(text, start_col);
        let end_byte = char_to_byte(text, end_col);
        if start_byte > end_byte {
            return Vec::new();
        }

        // The whole line stays visible so \b sees the real neighbours on
        // both sides of the bound
        let mut matches = Vec::new();
        let mut pos = start_byte;
        let mut col = start_col;
        let mut col_byte = start_byte;

        while pos <= text.len() {
            let Some(m) = regex.find_at(text, pos) else {
                break;
            };
            if m.end() > end_byte {
                break;
            }
            if m.is_empty() {
                let step = text[m.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                pos = m.start() + step;
                continue;
            }

            col += text[col_byte..m.start()].chars().count();
            let start = col;
            col += m.as_str().chars().count();
            col_byte = m.end();
            matches.push((start, col));
            pos = m.end();
        }

        matches
    }
}

/// Byte offset of char column `col` in `text` (clamped to the end)
fn char_to_byte(text: &str, col: usize) -> usize {
    text.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
