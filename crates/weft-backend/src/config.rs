//! Backend configuration.
//!
//! The compiler driver deserializes this from the `[backend]` table of its
//! configuration file; every field has a default so partial tables work.

use serde::Deserialize;

use weft_ir::IrType;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Fully qualified name of the root of the class hierarchy. File facade
    /// classes use it as their only supertype.
    pub root_supertype: String,
    /// Appended to the capitalized file stem to name a file facade class,
    /// unless the file requests an explicit name.
    pub facade_suffix: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            root_supertype: "kotlin.Any".to_string(),
            facade_suffix: "Kt".to_string(),
        }
    }
}

impl BackendConfig {
    pub fn root_type(&self) -> IrType {
        IrType::class(self.root_supertype.clone())
    }
}
