//! Buffer-facing types for the find/replace engine.
//!
//! # Architecture
//!
//! - [`Position`] / [`TextRange`]: document coordinates and spans
//! - [`TextBuffer`]: the contract a text buffer offers the engine
//! - [`UpdateGuard`]: scoped begin/end update bracket on a buffer
//! - [`ReplaceCommand`]: mutation described as a value, submitted to the executor
//! - [`EditHistory`] / [`EditBatch`]: undo/redo storage used by executors

mod buffer;
mod command;
mod history;
mod position;
mod range;

pub use buffer::{TextBuffer, UpdateGuard};
pub use command::{DocumentId, ReplaceCommand};
pub use history::{EditBatch, EditHistory, EditOperation};
pub use position::Position;
pub use range::TextRange;
