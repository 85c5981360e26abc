//! Backend session services for the Weft compiler.
//!
//! Lowering and code generation need a few declarations that no source file
//! spells out: the static field behind each enum constant, the `INSTANCE`
//! field of each object, and one facade class per file for its top-level
//! declarations. This crate mints them and keeps them stable for the length
//! of a compilation run.
//!
//! ## Architecture
//!
//! - [`session`]: [`BackendSession`], owner of the per-run state
//! - [`synthetic`]: [`SyntheticDescriptorFactory`] and its identity cache
//! - [`facade`]: facade class naming
//! - [`config`]: [`BackendConfig`]
//! - [`error`]: [`SyntheticError`]

pub mod config;
pub mod error;
pub mod facade;
pub mod session;
pub mod synthetic;

pub use config::BackendConfig;
pub use error::SyntheticError;
pub use session::BackendSession;
pub use synthetic::SyntheticDescriptorFactory;
