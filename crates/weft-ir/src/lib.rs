//! Backend IR for the Weft compiler.
//!
//! This crate holds the resolved tree that the backend consumes, the symbol
//! descriptors attached to it, and the diagnostic dump of that tree.
//!
//! ## Architecture
//!
//! - [`descriptor`]: classes, functions, fields and packages as resolved symbols
//! - [`ir`]: the IR tree and the [`IrNode`] view used for generic traversal
//! - [`dump`]: per-element rendering, whole-tree dumps, line-scoped dumps
//!
//! ## Dump format
//!
//! ```text
//! FILE fqName:app fileName:app/main.kt
//!   FUN name:main visibility:public modality:FINAL () returnType:Unit
//!     BLOCK_BODY
//!       CALL 'println(Any?): Unit' type=Unit
//!         message: CONST String type=String value="hi"
//! ```

pub mod descriptor;
pub mod dump;
pub mod ir;

pub use dump::{dump, dump_to, dump_trees_from_line, render};
pub use ir::types::IrType;
pub use ir::IrNode;
