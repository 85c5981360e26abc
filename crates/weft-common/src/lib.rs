//! Shared types for the Weft compiler backend.
//!
//! - [`span`]: byte-offset spans and the line index
//! - [`source`]: registered source files and their position map entries

pub mod source;
pub mod span;

pub use source::{FileEntry, FileId, SourceFile, SourceManager};
pub use span::{LineIndex, Span};
