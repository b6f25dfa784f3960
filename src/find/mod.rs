//! Find / replace / go-to engine
//!
//! Layered bottom-up: [`CompiledPattern`] turns a query into a matcher,
//! [`RangeScan`] enumerates matches inside a range line by line,
//! [`Navigator`] walks the selection with wraparound, [`Replacer`] adds
//! replace operations on top of a navigator and [`GotoLine`] clamps line
//! requests.

pub mod error;
pub mod goto;
pub mod navigator;
pub mod options;
pub mod pattern;
pub mod replacer;
pub mod scanner;

pub use error::FindError;
pub use goto::GotoLine;
pub use navigator::Navigator;
pub use options::FindOptions;
pub use pattern::CompiledPattern;
pub use replacer::Replacer;
pub use scanner::{Direction, Matches, RangeScan};
