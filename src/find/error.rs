//! Typed failures of find, replace and go-to operations

/// Errors returned by the find/replace engine.
///
/// The engine never presents these; callers decide how to show them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindError {
    /// Wraparound search exhausted both halves of the document
    NotFound,
    /// Replace-selection attempted with nothing selected
    EmptySelection,
    /// Target range is not writable
    ReadOnlySelection,
    /// The user-supplied regex failed to compile
    Pattern(String),
}

impl std::fmt::Display for FindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FindError::NotFound => write!(f, "No matches found"),
            FindError::EmptySelection => write!(f, "Selection is empty"),
            FindError::ReadOnlySelection => write!(f, "Selection is read-only"),
            FindError::Pattern(e) => write!(f, "Invalid pattern: {}", e),
        }
    }
}

impl std::error::Error for FindError {}

impl From<regex::Error> for FindError {
    fn from(e: regex::Error) -> Self {
        FindError::Pattern(e.to_string())
    }
}
