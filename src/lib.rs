//! Doc-comment generation for C++ headers.
//!
//! The core is pure text processing: [`signature`] turns one declaration line
//! into `@param` / `@return` lines, [`scope`] decides which lines are direct
//! class members, and [`transform`] drives both over a whole file. The
//! remaining modules find headers and write them back.

pub mod config;
pub mod discover;
pub mod project;
pub mod rewrite;
pub mod scope;
pub mod signature;
pub mod transform;

pub use transform::{annotate_source, Annotated, TransformStats};
