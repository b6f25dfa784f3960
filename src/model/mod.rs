//! Document model - the concrete buffer the engine runs against
//!
//! [`Document`] implements [`crate::editable::TextBuffer`] over a rope and
//! doubles as the undo-capable executor for submitted replace commands.

pub mod document;

pub use document::Document;
