//! One-line descriptions of single IR elements.
//!
//! [`render`] is total over [`IrNode`]: every kind has an arm, and missing
//! metadata (an uninferred return type, an error type) shows up as marked
//! text instead of a panic.

use crate::descriptor::{FunctionDescriptor, FunctionKind, PropertyDescriptor};
use crate::ir::types::IrType;
use crate::ir::{ConstValue, IrFunction, IrNode, MemberAccessKind, TypeOperator};

/// Placeholder for metadata that has not been resolved yet.
const UNRESOLVED: &str = "<unresolved>";

/// Render one element as a single line (no trailing newline).
///
/// Free text taken from source, such as error descriptions, is escaped so a
/// newline inside it cannot split the line.
pub fn render(node: IrNode<'_>) -> String {
    match node {
        IrNode::File(file) => format!(
            "FILE fqName:{} fileName:{}",
            file.package,
            file.entry.name()
        ),
        IrNode::Class(class) => {
            let d = &class.descriptor;
            format!(
                "CLASS {} name:{} modality:{} visibility:{}",
                d.kind, d.name, d.modality, d.visibility
            )
        }
        IrNode::Function(function) => {
            let d = &function.descriptor;
            format!(
                "FUN name:{} visibility:{} modality:{} {} returnType:{}",
                d.name,
                d.visibility,
                d.modality,
                render_parameters(function),
                render_return_type(d)
            )
        }
        IrNode::Constructor(function) => {
            let d = &function.descriptor;
            let mut line = format!(
                "CONSTRUCTOR visibility:{} {} returnType:{}",
                d.visibility,
                render_parameters(function),
                render_return_type(d)
            );
            if let FunctionKind::Constructor { primary: true } = d.kind {
                line.push_str(" [primary]");
            }
            line
        }
        IrNode::EnumEntry(entry) => format!("ENUM_ENTRY name:{}", entry.descriptor.name),
        IrNode::Property(property) => {
            let d = &property.descriptor;
            format!(
                "PROPERTY name:{} type:{} visibility:{} modality:{} [{}]",
                d.name,
                d.ty,
                d.visibility,
                d.modality,
                if d.is_var { "var" } else { "val" }
            )
        }
        IrNode::Field(field) => {
            let d = &field.descriptor;
            let mut line = format!(
                "FIELD name:{} type:{} visibility:{}",
                d.name, d.ty, d.visibility
            );
            if d.is_static {
                line.push_str(" [static]");
            }
            line
        }
        IrNode::Variable(variable) => format!(
            "VAR name:{} type:{} [{}]",
            variable.name,
            variable.ty,
            if variable.is_var { "var" } else { "val" }
        ),
        IrNode::ExpressionBody(_) => "EXPRESSION_BODY".to_string(),
        IrNode::BlockBody(_) => "BLOCK_BODY".to_string(),
        IrNode::Block(block) => with_origin(format!("BLOCK type={}", block.ty), &block.origin),
        IrNode::Const(constant) => format!(
            "CONST {} type={} value={}",
            const_kind(&constant.value),
            constant.ty,
            const_value(&constant.value)
        ),
        IrNode::GetValue(get) => format!("GET_VAR '{}: {}' type={}", get.name, get.ty, get.ty),
        IrNode::SetVariable(set) => format!(
            "SET_VAR '{}: {}' type={}",
            set.name, set.variable_type, set.ty
        ),
        IrNode::MemberAccess(call) => {
            let keyword = match call.kind {
                MemberAccessKind::Call => "CALL",
                MemberAccessKind::ConstructorCall => "CONSTRUCTOR_CALL",
                MemberAccessKind::DelegatingConstructorCall => "DELEGATING_CONSTRUCTOR_CALL",
                MemberAccessKind::EnumConstructorCall => "ENUM_CONSTRUCTOR_CALL",
            };
            with_origin(
                format!("{keyword} '{}' type={}", render_signature(&call.callee), call.ty),
                &call.origin,
            )
        }
        IrNode::GetField(get) => format!("GET_FIELD '{}' type={}", field_ref(&get.field), get.ty),
        IrNode::SetField(set) => format!("SET_FIELD '{}' type={}", field_ref(&set.field), set.ty),
        IrNode::GetObjectValue(get) => format!("GET_OBJECT '{}' type={}", get.class.name, get.ty),
        IrNode::GetEnumValue(get) => format!("GET_ENUM '{}' type={}", get.entry.name, get.ty),
        IrNode::TypeOperator(op) => format!(
            "TYPE_OP type={} origin={} typeOperand={}",
            op.ty,
            type_operator(op.operator),
            op.type_operand
        ),
        IrNode::Return(ret) => format!("RETURN type={} from='{}'", ret.ty, ret.target),
        IrNode::Throw(throw) => format!("THROW type={}", throw.ty),
        IrNode::StringConcatenation(concat) => format!("STRING_CONCATENATION type={}", concat.ty),
        IrNode::When(when) => with_origin(format!("WHEN type={}", when.ty), &when.origin),
        IrNode::Branch(_) => "BRANCH".to_string(),
        IrNode::WhileLoop(lp) => with_label("WHILE", &lp.label),
        IrNode::DoWhileLoop(lp) => with_label("DO_WHILE", &lp.label),
        IrNode::Break(jump) => with_label("BREAK", &jump.label),
        IrNode::Continue(jump) => with_label("CONTINUE", &jump.label),
        IrNode::Try(try_expr) => format!("TRY type={}", try_expr.ty),
        IrNode::Catch(catch) => format!(
            "CATCH parameter={}: {}",
            catch.parameter_name, catch.parameter_type
        ),
        IrNode::ErrorCall(call) => format!(
            "ERROR_CALL '{}' type={}",
            call.description.escape_debug(),
            call.ty
        ),
        IrNode::ErrorExpression(error) => format!(
            "ERROR_EXPR '{}' type={}",
            error.description.escape_debug(),
            error.ty
        ),
    }
}

/// `name(Int, String): Unit`, or `constructor Point(Int, Int)`.
pub fn render_signature(function: &FunctionDescriptor) -> String {
    let params: Vec<String> = function
        .value_parameters
        .iter()
        .map(|p| p.ty.to_string())
        .collect();
    match function.kind {
        FunctionKind::Constructor { .. } => {
            format!("constructor {}({})", function.name, params.join(", "))
        }
        FunctionKind::Function => format!(
            "{}({}): {}",
            function.name,
            params.join(", "),
            render_return_type(function)
        ),
    }
}

/// Render a type-argument binding as `T: Int`.
pub fn render_type_argument(parameter: &str, argument: &IrType) -> String {
    format!("{parameter}: {argument}")
}

fn render_parameters(function: &IrFunction) -> String {
    let params: Vec<String> = function
        .descriptor
        .value_parameters
        .iter()
        .map(|p| format!("{}:{}", p.name, p.ty))
        .collect();
    format!("({})", params.join(", "))
}

fn render_return_type(function: &FunctionDescriptor) -> String {
    match &function.return_type {
        Some(ty) => ty.to_string(),
        None => UNRESOLVED.to_string(),
    }
}

fn field_ref(field: &PropertyDescriptor) -> String {
    format!("{}: {}", field.name, field.ty)
}

fn with_origin(mut line: String, origin: &Option<String>) -> String {
    if let Some(origin) = origin {
        line.push_str(" origin=");
        line.push_str(origin);
    }
    line
}

fn with_label(keyword: &str, label: &Option<String>) -> String {
    match label {
        Some(label) => format!("{keyword} label={label}"),
        None => keyword.to_string(),
    }
}

fn const_kind(value: &ConstValue) -> &'static str {
    match value {
        ConstValue::Null => "Null",
        ConstValue::Boolean(_) => "Boolean",
        ConstValue::Char(_) => "Char",
        ConstValue::Int(_) => "Int",
        ConstValue::Long(_) => "Long",
        ConstValue::Double(_) => "Double",
        ConstValue::String(_) => "String",
    }
}

fn const_value(value: &ConstValue) -> String {
    match value {
        ConstValue::Null => "null".to_string(),
        ConstValue::Boolean(b) => b.to_string(),
        ConstValue::Char(c) => format!("{c:?}"),
        ConstValue::Int(i) => i.to_string(),
        ConstValue::Long(l) => l.to_string(),
        ConstValue::Double(d) => format!("{d:?}"),
        ConstValue::String(s) => format!("{s:?}"),
    }
}

fn type_operator(op: TypeOperator) -> &'static str {
    match op {
        TypeOperator::Cast => "CAST",
        TypeOperator::ImplicitCast => "IMPLICIT_CAST",
        TypeOperator::SafeCast => "SAFE_CAST",
        TypeOperator::InstanceOf => "INSTANCEOF",
        TypeOperator::NotInstanceOf => "NOT_INSTANCEOF",
        TypeOperator::ImplicitCoercionToUnit => "IMPLICIT_COERCION_TO_UNIT",
    }
}
