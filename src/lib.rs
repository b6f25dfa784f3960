//! Sift - find, replace and go-to-line for line-oriented text buffers
//!
//! The engine in [`find`] works against the [`editable::TextBuffer`] contract.
//! [`model::Document`] is the rope-backed buffer shipped with the crate; it
//! applies submitted replace commands and keeps their undo history.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod find;
pub mod model;
pub mod tracing;

// Re-export commonly used types
pub use config::FindConfig;
pub use editable::{Position, ReplaceCommand, TextBuffer, TextRange};
pub use find::{FindError, FindOptions, GotoLine, Navigator, Replacer};
pub use model::Document;
