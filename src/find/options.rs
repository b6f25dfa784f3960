use serde::{Deserialize, Serialize};

/// Flags governing one search request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FindOptions {
    /// Case-sensitive matching
    pub match_case: bool,
    /// Treat the pattern as a regular expression instead of literal text
    pub is_regex: bool,
    /// Only match whole words
    pub whole_word: bool,
}

impl FindOptions {
    pub const fn new(match_case: bool, is_regex: bool, whole_word: bool) -> Self {
        Self {
            match_case,
            is_regex,
            whole_word,
        }
    }

    /// Literal, case-insensitive, substring search
    pub const fn literal() -> Self {
        Self::new(false, false, false)
    }

    /// Flags set in either value
    pub fn union(self, other: FindOptions) -> Self {
        Self {
            match_case: self.match_case || other.match_case,
            is_regex: self.is_regex || other.is_regex,
            whole_word: self.whole_word || other.whole_word,
        }
    }
}
