//! Backend IR tree definitions.
//!
//! The IR is the resolved, typed tree handed to the backend by earlier
//! phases. Storage is strongly typed: files hold [`IrDeclaration`]s, bodies
//! hold [`IrStatement`]s, and expressions are [`IrExpression`]s. Generic
//! traversal goes through the borrowed [`node::IrNode`] view, which has one
//! variant per element kind.
//!
//! The tree is immutable once built; nothing in the backend rewrites it in
//! place.

pub mod node;
pub mod types;

use std::sync::Arc;

use weft_common::{FileEntry, Span};

use crate::descriptor::{
    Annotation, ClassDescriptor, FunctionDescriptor, PackageFragment, PropertyDescriptor,
    ValueParameter,
};
use types::IrType;

pub use node::IrNode;

// ── File ────────────────────────────────────────────────────────────

/// One compiled source file.
#[derive(Debug, Clone)]
pub struct IrFile {
    pub span: Span,
    /// Position map entry of the file.
    pub entry: FileEntry,
    pub package: Arc<PackageFragment>,
    /// File-level annotations, e.g. `@file:JvmName("Util")`.
    pub annotations: Vec<Annotation>,
    pub declarations: Vec<IrDeclaration>,
}

// ── Declarations ────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum IrDeclaration {
    Class(IrClass),
    Function(IrFunction),
    Constructor(IrFunction),
    EnumEntry(IrEnumEntry),
    Property(IrProperty),
    Field(IrField),
    Variable(IrVariable),
}

#[derive(Debug, Clone)]
pub struct IrClass {
    pub span: Span,
    pub descriptor: Arc<ClassDescriptor>,
    pub declarations: Vec<IrDeclaration>,
}

/// A function or constructor.
#[derive(Debug, Clone)]
pub struct IrFunction {
    pub span: Span,
    pub descriptor: Arc<FunctionDescriptor>,
    /// Default value expressions indexed by value-parameter index. Shorter
    /// than the parameter list when trailing parameters have no default.
    pub default_values: Vec<Option<IrExpression>>,
    pub body: Option<IrBody>,
}

impl IrFunction {
    /// Default value of the parameter at `index`, if it has one.
    pub fn default_value(&self, index: usize) -> Option<&IrExpression> {
        self.default_values.get(index).and_then(Option::as_ref)
    }

    /// Default values of the parameters whose descriptor declares one, in
    /// parameter order.
    ///
    /// The descriptor decides: slots past the parameter list, and slots of
    /// parameters without a declared default, are never visited.
    pub fn declared_defaults(&self) -> impl Iterator<Item = (&ValueParameter, &IrExpression)> + '_ {
        self.descriptor
            .value_parameters
            .iter()
            .filter(|parameter| parameter.declares_default)
            .filter_map(|parameter| Some((parameter, self.default_value(parameter.index)?)))
    }
}

#[derive(Debug, Clone)]
pub struct IrEnumEntry {
    pub span: Span,
    pub descriptor: Arc<ClassDescriptor>,
    /// The enum constructor call creating the entry's instance.
    pub initializer: IrExpression,
    /// Body class for entries that override members.
    pub corresponding_class: Option<Box<IrClass>>,
}

#[derive(Debug, Clone)]
pub struct IrProperty {
    pub span: Span,
    pub descriptor: Arc<PropertyDescriptor>,
    pub initializer: Option<IrExpression>,
}

/// A backing field, either declared or synthesized by the backend.
#[derive(Debug, Clone)]
pub struct IrField {
    pub span: Span,
    pub descriptor: Arc<PropertyDescriptor>,
    pub initializer: Option<IrExpression>,
}

#[derive(Debug, Clone)]
pub struct IrVariable {
    pub span: Span,
    pub name: String,
    pub ty: IrType,
    pub is_var: bool,
    pub initializer: Option<IrExpression>,
}

// ── Bodies and statements ───────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum IrBody {
    Expression(IrExpressionBody),
    Block(IrBlockBody),
}

#[derive(Debug, Clone)]
pub struct IrExpressionBody {
    pub span: Span,
    pub expression: IrExpression,
}

#[derive(Debug, Clone)]
pub struct IrBlockBody {
    pub span: Span,
    pub statements: Vec<IrStatement>,
}

#[derive(Debug, Clone)]
pub enum IrStatement {
    Declaration(IrDeclaration),
    Expression(IrExpression),
}

// ── Expressions ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum IrExpression {
    Block(IrBlock),
    Const(IrConst),
    GetValue(IrGetValue),
    SetVariable(IrSetVariable),
    MemberAccess(IrMemberAccess),
    GetField(IrGetField),
    SetField(IrSetField),
    GetObjectValue(IrGetObjectValue),
    GetEnumValue(IrGetEnumValue),
    TypeOperator(IrTypeOperatorCall),
    Return(IrReturn),
    Throw(IrThrow),
    StringConcatenation(IrStringConcatenation),
    When(IrWhen),
    WhileLoop(IrLoop),
    DoWhileLoop(IrLoop),
    Break(IrJump),
    Continue(IrJump),
    Try(IrTry),
    ErrorCall(IrErrorCall),
    Error(IrErrorExpression),
}

#[derive(Debug, Clone)]
pub struct IrBlock {
    pub span: Span,
    pub ty: IrType,
    /// Lowering origin such as `"SAFE_CALL"`, if the block was desugared.
    pub origin: Option<String>,
    pub statements: Vec<IrStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Null,
    Boolean(bool),
    Char(char),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
}

#[derive(Debug, Clone)]
pub struct IrConst {
    pub span: Span,
    pub ty: IrType,
    pub value: ConstValue,
}

#[derive(Debug, Clone)]
pub struct IrGetValue {
    pub span: Span,
    pub name: String,
    pub ty: IrType,
}

#[derive(Debug, Clone)]
pub struct IrSetVariable {
    pub span: Span,
    pub name: String,
    pub variable_type: IrType,
    pub ty: IrType,
    pub value: Box<IrExpression>,
}

/// The callable shape behind an [`IrMemberAccess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAccessKind {
    Call,
    ConstructorCall,
    DelegatingConstructorCall,
    EnumConstructorCall,
}

/// A call to a resolved function or constructor.
#[derive(Debug, Clone)]
pub struct IrMemberAccess {
    pub span: Span,
    pub kind: MemberAccessKind,
    pub callee: Arc<FunctionDescriptor>,
    pub ty: IrType,
    pub origin: Option<String>,
    /// Type arguments indexed by the callee's type-parameter index.
    pub type_arguments: Vec<Option<IrType>>,
    pub dispatch_receiver: Option<Box<IrExpression>>,
    pub extension_receiver: Option<Box<IrExpression>>,
    /// Value arguments indexed by the callee's value-parameter index.
    /// `None` (or a missing slot) means the default value is used.
    pub value_arguments: Vec<Option<IrExpression>>,
}

impl IrMemberAccess {
    pub fn value_argument(&self, index: usize) -> Option<&IrExpression> {
        self.value_arguments.get(index).and_then(Option::as_ref)
    }

    pub fn type_argument(&self, index: usize) -> Option<&IrType> {
        self.type_arguments.get(index).and_then(Option::as_ref)
    }
}

#[derive(Debug, Clone)]
pub struct IrGetField {
    pub span: Span,
    pub field: Arc<PropertyDescriptor>,
    pub ty: IrType,
    pub receiver: Option<Box<IrExpression>>,
}

#[derive(Debug, Clone)]
pub struct IrSetField {
    pub span: Span,
    pub field: Arc<PropertyDescriptor>,
    pub ty: IrType,
    pub receiver: Option<Box<IrExpression>>,
    pub value: Box<IrExpression>,
}

#[derive(Debug, Clone)]
pub struct IrGetObjectValue {
    pub span: Span,
    pub class: Arc<ClassDescriptor>,
    pub ty: IrType,
}

#[derive(Debug, Clone)]
pub struct IrGetEnumValue {
    pub span: Span,
    pub entry: Arc<ClassDescriptor>,
    pub ty: IrType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOperator {
    Cast,
    ImplicitCast,
    SafeCast,
    InstanceOf,
    NotInstanceOf,
    ImplicitCoercionToUnit,
}

#[derive(Debug, Clone)]
pub struct IrTypeOperatorCall {
    pub span: Span,
    pub ty: IrType,
    pub operator: TypeOperator,
    pub type_operand: IrType,
    pub argument: Box<IrExpression>,
}

#[derive(Debug, Clone)]
pub struct IrReturn {
    pub span: Span,
    pub ty: IrType,
    /// Name of the function returned from.
    pub target: String,
    pub value: Box<IrExpression>,
}

#[derive(Debug, Clone)]
pub struct IrThrow {
    pub span: Span,
    pub ty: IrType,
    pub value: Box<IrExpression>,
}

#[derive(Debug, Clone)]
pub struct IrStringConcatenation {
    pub span: Span,
    pub ty: IrType,
    pub arguments: Vec<IrExpression>,
}

#[derive(Debug, Clone)]
pub struct IrWhen {
    pub span: Span,
    pub ty: IrType,
    pub origin: Option<String>,
    pub branches: Vec<IrBranch>,
}

#[derive(Debug, Clone)]
pub struct IrBranch {
    pub span: Span,
    pub condition: IrExpression,
    pub result: IrExpression,
}

/// A `while` or `do-while` loop; which one is decided by the
/// [`IrExpression`] variant holding it.
#[derive(Debug, Clone)]
pub struct IrLoop {
    pub span: Span,
    pub ty: IrType,
    pub label: Option<String>,
    pub condition: Box<IrExpression>,
    pub body: Option<Box<IrExpression>>,
}

/// `break` or `continue`.
#[derive(Debug, Clone)]
pub struct IrJump {
    pub span: Span,
    pub ty: IrType,
    pub label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IrTry {
    pub span: Span,
    pub ty: IrType,
    pub try_result: Box<IrExpression>,
    pub catches: Vec<IrCatch>,
    pub finally: Option<Box<IrExpression>>,
}

#[derive(Debug, Clone)]
pub struct IrCatch {
    pub span: Span,
    pub parameter_name: String,
    pub parameter_type: IrType,
    pub result: IrExpression,
}

/// A call resolution failed on, kept so later phases can report or recover.
#[derive(Debug, Clone)]
pub struct IrErrorCall {
    pub span: Span,
    pub ty: IrType,
    pub description: String,
    pub explicit_receiver: Option<Box<IrExpression>>,
    pub arguments: Vec<IrExpression>,
}

#[derive(Debug, Clone)]
pub struct IrErrorExpression {
    pub span: Span,
    pub ty: IrType,
    pub description: String,
}
