//! Symbol descriptors attached to IR elements.
//!
//! Descriptors are produced by resolution (or minted by the backend's
//! synthetic factory) and shared as `Arc`s. Two descriptors are the *same*
//! symbol only if they are the same allocation; `PartialEq` compares content.

use std::fmt;
use std::sync::Arc;

use weft_common::{SourceFile, Span};

use crate::ir::types::IrType;

/// Platform access flags carried by field descriptors.
pub mod access_flags {
    /// Marks the static field holding an enum constant.
    pub const ACC_ENUM: u32 = 0x4000;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Final,
    Open,
    Abstract,
    Sealed,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modality::Final => "FINAL",
            Modality::Open => "OPEN",
            Modality::Abstract => "ABSTRACT",
            Modality::Sealed => "SEALED",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Internal,
    Private,
    Local,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Internal => "internal",
            Visibility::Private => "private",
            Visibility::Local => "local",
        };
        f.write_str(s)
    }
}

/// The declaration shape of a class-like descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    EnumClass,
    EnumEntry,
    AnnotationClass,
    Object,
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClassKind::Class => "CLASS",
            ClassKind::Interface => "INTERFACE",
            ClassKind::EnumClass => "ENUM_CLASS",
            ClassKind::EnumEntry => "ENUM_ENTRY",
            ClassKind::AnnotationClass => "ANNOTATION_CLASS",
            ClassKind::Object => "OBJECT",
        };
        f.write_str(s)
    }
}

/// Whether a member was written in source or made up by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Declaration,
    Synthesized,
}

/// A resolved annotation with pre-rendered argument values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Fully qualified annotation class name, e.g. `"kotlin.jvm.JvmName"`.
    pub fq_name: String,
    /// `(parameter name, rendered value)` pairs in declaration order.
    pub arguments: Vec<(String, String)>,
}

impl Annotation {
    pub fn new(fq_name: impl Into<String>) -> Self {
        Self {
            fq_name: fq_name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.fq_name)?;
        if !self.arguments.is_empty() {
            let args: Vec<String> = self
                .arguments
                .iter()
                .map(|(name, value)| format!("{name} = {value}"))
                .collect();
            write!(f, "({})", args.join(", "))?;
        }
        Ok(())
    }
}

/// Where a descriptor came from.
#[derive(Debug, Clone)]
pub enum SourceElement {
    /// Purely synthetic; no source construct exists.
    None,
    /// A declaration at `span` in the file with the given path.
    Declaration { file: String, span: Span },
    /// A whole source file.
    File(Arc<SourceFile>),
}

impl PartialEq for SourceElement {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SourceElement::None, SourceElement::None) => true,
            (
                SourceElement::Declaration { file: a, span: sa },
                SourceElement::Declaration { file: b, span: sb },
            ) => a == b && sa == sb,
            (SourceElement::File(a), SourceElement::File(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageFragment {
    /// Fully qualified package name; empty for the root package.
    pub fq_name: String,
}

impl PackageFragment {
    pub fn new(fq_name: impl Into<String>) -> Self {
        Self {
            fq_name: fq_name.into(),
        }
    }

    /// Qualify `name` with this package.
    pub fn child(&self, name: &str) -> String {
        if self.fq_name.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.fq_name, name)
        }
    }
}

impl fmt::Display for PackageFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fq_name.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.fq_name)
        }
    }
}

/// The declaration that directly contains another one.
#[derive(Debug, Clone, PartialEq)]
pub enum Container {
    Package(Arc<PackageFragment>),
    Class(Arc<ClassDescriptor>),
}

impl Container {
    fn qualify(&self, name: &str) -> String {
        match self {
            Container::Package(package) => package.child(name),
            Container::Class(class) => format!("{}.{}", class.fq_name(), name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDescriptor {
    pub name: String,
    pub kind: ClassKind,
    pub container: Container,
    pub modality: Modality,
    pub visibility: Visibility,
    pub annotations: Vec<Annotation>,
    pub type_parameters: Vec<String>,
    pub source: SourceElement,
}

impl ClassDescriptor {
    /// A public final class-like descriptor with no annotations or type
    /// parameters.
    pub fn new(name: impl Into<String>, kind: ClassKind, container: Container) -> Self {
        Self {
            name: name.into(),
            kind,
            container,
            modality: Modality::Final,
            visibility: Visibility::Public,
            annotations: Vec::new(),
            type_parameters: Vec::new(),
            source: SourceElement::None,
        }
    }

    pub fn fq_name(&self) -> String {
        self.container.qualify(&self.name)
    }

    /// The class directly containing this one, if any.
    pub fn containing_class(&self) -> Option<&Arc<ClassDescriptor>> {
        match &self.container {
            Container::Class(class) => Some(class),
            Container::Package(_) => None,
        }
    }

    /// The type of `this` inside the class: the class applied to its own
    /// type parameters.
    pub fn default_type(&self) -> IrType {
        IrType::Class {
            fq_name: self.fq_name(),
            arguments: self
                .type_parameters
                .iter()
                .map(|name| IrType::type_parameter(name.clone()))
                .collect(),
            nullable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueParameter {
    pub index: usize,
    pub name: String,
    pub ty: IrType,
    pub declares_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    Constructor { primary: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDescriptor {
    /// Function name; for constructors, the name of the constructed class.
    pub name: String,
    pub kind: FunctionKind,
    pub modality: Modality,
    pub visibility: Visibility,
    pub type_parameters: Vec<TypeParameter>,
    pub value_parameters: Vec<ValueParameter>,
    /// `None` while the return type has not been inferred yet.
    pub return_type: Option<IrType>,
}

impl FunctionDescriptor {
    pub fn function(name: impl Into<String>, return_type: Option<IrType>) -> Self {
        Self {
            name: name.into(),
            kind: FunctionKind::Function,
            modality: Modality::Final,
            visibility: Visibility::Public,
            type_parameters: Vec::new(),
            value_parameters: Vec::new(),
            return_type,
        }
    }

    pub fn constructor(class: &ClassDescriptor, primary: bool) -> Self {
        Self {
            name: class.name.clone(),
            kind: FunctionKind::Constructor { primary },
            modality: Modality::Final,
            visibility: Visibility::Public,
            type_parameters: Vec::new(),
            value_parameters: Vec::new(),
            return_type: Some(class.default_type()),
        }
    }

    /// Append a value parameter; its index is its position.
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        ty: IrType,
        declares_default: bool,
    ) -> Self {
        self.value_parameters.push(ValueParameter {
            index: self.value_parameters.len(),
            name: name.into(),
            ty,
            declares_default,
        });
        self
    }

    pub fn with_type_parameter(mut self, name: impl Into<String>) -> Self {
        self.type_parameters.push(TypeParameter {
            index: self.type_parameters.len(),
            name: name.into(),
        });
        self
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self.kind, FunctionKind::Constructor { .. })
    }
}

/// A property or field symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub container: Container,
    pub ty: IrType,
    pub annotations: Vec<Annotation>,
    pub modality: Modality,
    pub visibility: Visibility,
    pub is_var: bool,
    pub is_static: bool,
    /// Extra platform flags beyond what modality/visibility/static imply.
    pub access_flags: u32,
    pub member_kind: MemberKind,
    pub source: SourceElement,
}

impl PropertyDescriptor {
    /// A public final `val` declared in source.
    pub fn new(name: impl Into<String>, container: Container, ty: IrType) -> Self {
        Self {
            name: name.into(),
            container,
            ty,
            annotations: Vec::new(),
            modality: Modality::Final,
            visibility: Visibility::Public,
            is_var: false,
            is_static: false,
            access_flags: 0,
            member_kind: MemberKind::Declaration,
            source: SourceElement::None,
        }
    }

    pub fn owner_class(&self) -> Option<&Arc<ClassDescriptor>> {
        match &self.container {
            Container::Class(class) => Some(class),
            Container::Package(_) => None,
        }
    }
}

/// The platform class that holds one file's top-level declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct FileClassDescriptor {
    pub name: String,
    pub package: Arc<PackageFragment>,
    pub supertypes: Vec<IrType>,
    pub annotations: Vec<Annotation>,
    pub source: SourceElement,
}

impl FileClassDescriptor {
    pub fn fq_name(&self) -> String {
        self.package.child(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(name: &str) -> Container {
        Container::Package(Arc::new(PackageFragment::new(name)))
    }

    #[test]
    fn nested_fq_names() {
        let outer = Arc::new(ClassDescriptor::new(
            "Color",
            ClassKind::EnumClass,
            package("app"),
        ));
        let entry = ClassDescriptor::new(
            "RED",
            ClassKind::EnumEntry,
            Container::Class(outer.clone()),
        );
        assert_eq!(entry.fq_name(), "app.Color.RED");
        assert!(Arc::ptr_eq(entry.containing_class().unwrap(), &outer));

        let root = ClassDescriptor::new("Main", ClassKind::Object, package(""));
        assert_eq!(root.fq_name(), "Main");
        assert!(root.containing_class().is_none());
    }

    #[test]
    fn default_type_applies_own_parameters() {
        let mut class = ClassDescriptor::new("Box", ClassKind::Class, package("app"));
        class.type_parameters.push("T".into());
        assert_eq!(class.default_type().to_string(), "Box<T>");
    }

    #[test]
    fn annotation_display() {
        let plain = Annotation::new("kotlin.Deprecated");
        assert_eq!(plain.to_string(), "@kotlin.Deprecated");
        let named = Annotation::new("kotlin.jvm.JvmName").with_argument("name", "\"Util\"");
        assert_eq!(named.to_string(), "@kotlin.jvm.JvmName(name = \"Util\")");
    }

    #[test]
    fn parameters_are_indexed_in_order() {
        let f = FunctionDescriptor::function("f", None)
            .with_parameter("a", IrType::class("kotlin.Int"), false)
            .with_parameter("b", IrType::class("kotlin.Int"), true);
        assert_eq!(f.value_parameters[1].index, 1);
        assert!(f.value_parameters[1].declares_default);
        assert!(!f.is_constructor());
    }

    #[test]
    fn file_source_elements_compare_by_identity() {
        let mut sources = weft_common::SourceManager::new();
        let entry = sources.add_file("a.kt", "", "", None);
        let file = sources.source_file(&entry).unwrap();
        assert_eq!(SourceElement::File(file.clone()), SourceElement::File(file));
        let declared = SourceElement::Declaration {
            file: "a.kt".into(),
            span: Span::new(0, 1),
        };
        assert_ne!(SourceElement::None, declared);
    }
}
