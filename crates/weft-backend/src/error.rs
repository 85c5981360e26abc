//! Internal-consistency failures raised while minting synthetic symbols.
//!
//! None of these are user errors: each one means an earlier phase handed the
//! backend something it must never produce. The caller aborts backend
//! processing of the current unit and reports the message.

use std::fmt;

use weft_ir::descriptor::ClassKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntheticError {
    /// An enum backing field was requested for something that is not an
    /// enum entry.
    NotAnEnumEntry { declaration: String, kind: ClassKind },
    /// An enum entry whose container is not an enum class.
    NotAnEnumClass {
        entry: String,
        container: String,
    },
    /// An instance field was requested for something that is not an object.
    NotAnObject { declaration: String, kind: ClassKind },
    /// A file entry that does not resolve to a registered source file.
    UnresolvedFileEntry { entry: String },
}

impl fmt::Display for SyntheticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnEnumEntry { declaration, kind } => {
                write!(f, "should be enum entry: {declaration} is {kind}")
            }
            Self::NotAnEnumClass { entry, container } => {
                write!(f, "should be enum class: container of {entry} is {container}")
            }
            Self::NotAnObject { declaration, kind } => {
                write!(f, "should be an object: {declaration} is {kind}")
            }
            Self::UnresolvedFileEntry { entry } => write!(f, "unexpected file entry: {entry}"),
        }
    }
}

impl std::error::Error for SyntheticError {}
