//! Resolved types as carried by IR elements and descriptors.

use std::fmt;

/// A resolved type.
///
/// `Error` stands in for a type resolution could not produce; it is kept so
/// that partially resolved trees can still be dumped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IrType {
    /// A class type such as `kotlin.Int` or `kotlin.collections.List<T>?`.
    Class {
        fq_name: String,
        arguments: Vec<IrType>,
        nullable: bool,
    },
    /// A reference to a type parameter in scope.
    TypeParameter { name: String, nullable: bool },
    /// An unresolved type with a short explanation.
    Error(String),
}

impl IrType {
    pub fn class(fq_name: impl Into<String>) -> Self {
        IrType::Class {
            fq_name: fq_name.into(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn generic(fq_name: impl Into<String>, arguments: Vec<IrType>) -> Self {
        IrType::Class {
            fq_name: fq_name.into(),
            arguments,
            nullable: false,
        }
    }

    pub fn type_parameter(name: impl Into<String>) -> Self {
        IrType::TypeParameter {
            name: name.into(),
            nullable: false,
        }
    }

    pub fn unit() -> Self {
        IrType::class("kotlin.Unit")
    }

    pub fn nothing() -> Self {
        IrType::class("kotlin.Nothing")
    }

    /// The nullable variant of this type. Error types are returned unchanged.
    pub fn nullable(self) -> Self {
        match self {
            IrType::Class {
                fq_name, arguments, ..
            } => IrType::Class {
                fq_name,
                arguments,
                nullable: true,
            },
            IrType::TypeParameter { name, .. } => IrType::TypeParameter {
                name,
                nullable: true,
            },
            error @ IrType::Error(_) => error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, IrType::Error(_))
    }
}

/// Short rendering: class names without their package.
impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Class {
                fq_name,
                arguments,
                nullable,
            } => {
                let short = fq_name.rsplit('.').next().unwrap_or(fq_name);
                f.write_str(short)?;
                if !arguments.is_empty() {
                    let args: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
                if *nullable {
                    f.write_str("?")?;
                }
                Ok(())
            }
            IrType::TypeParameter { name, nullable } => {
                f.write_str(name)?;
                if *nullable {
                    f.write_str("?")?;
                }
                Ok(())
            }
            IrType::Error(message) => write!(f, "[ERROR : {message}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_with_arguments() {
        let ty = IrType::generic(
            "kotlin.collections.Map",
            vec![IrType::class("kotlin.String"), IrType::type_parameter("V").nullable()],
        );
        assert_eq!(ty.to_string(), "Map<String, V?>");
    }

    #[test]
    fn nullable_class() {
        assert_eq!(IrType::class("kotlin.Int").nullable().to_string(), "Int?");
    }

    #[test]
    fn error_types_stay_errors() {
        let ty = IrType::Error("cannot infer".into()).nullable();
        assert!(ty.is_error());
        assert_eq!(ty.to_string(), "[ERROR : cannot infer]");
    }
}
