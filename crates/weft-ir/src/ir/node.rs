//! Borrowed, kind-tagged view over any IR element.
//!
//! Every operation that must cover all element kinds (rendering, dumping,
//! line selection) matches on [`IrNode`], so adding a kind is a compile
//! error at each of them until it is handled.

use weft_common::Span;

use super::*;

#[derive(Debug, Clone, Copy)]
pub enum IrNode<'a> {
    File(&'a IrFile),
    Class(&'a IrClass),
    Function(&'a IrFunction),
    Constructor(&'a IrFunction),
    EnumEntry(&'a IrEnumEntry),
    Property(&'a IrProperty),
    Field(&'a IrField),
    Variable(&'a IrVariable),
    ExpressionBody(&'a IrExpressionBody),
    BlockBody(&'a IrBlockBody),
    Block(&'a IrBlock),
    Const(&'a IrConst),
    GetValue(&'a IrGetValue),
    SetVariable(&'a IrSetVariable),
    MemberAccess(&'a IrMemberAccess),
    GetField(&'a IrGetField),
    SetField(&'a IrSetField),
    GetObjectValue(&'a IrGetObjectValue),
    GetEnumValue(&'a IrGetEnumValue),
    TypeOperator(&'a IrTypeOperatorCall),
    Return(&'a IrReturn),
    Throw(&'a IrThrow),
    StringConcatenation(&'a IrStringConcatenation),
    When(&'a IrWhen),
    Branch(&'a IrBranch),
    WhileLoop(&'a IrLoop),
    DoWhileLoop(&'a IrLoop),
    Break(&'a IrJump),
    Continue(&'a IrJump),
    Try(&'a IrTry),
    Catch(&'a IrCatch),
    ErrorCall(&'a IrErrorCall),
    ErrorExpression(&'a IrErrorExpression),
}

impl<'a> IrNode<'a> {
    pub fn span(self) -> Span {
        match self {
            IrNode::File(n) => n.span,
            IrNode::Class(n) => n.span,
            IrNode::Function(n) | IrNode::Constructor(n) => n.span,
            IrNode::EnumEntry(n) => n.span,
            IrNode::Property(n) => n.span,
            IrNode::Field(n) => n.span,
            IrNode::Variable(n) => n.span,
            IrNode::ExpressionBody(n) => n.span,
            IrNode::BlockBody(n) => n.span,
            IrNode::Block(n) => n.span,
            IrNode::Const(n) => n.span,
            IrNode::GetValue(n) => n.span,
            IrNode::SetVariable(n) => n.span,
            IrNode::MemberAccess(n) => n.span,
            IrNode::GetField(n) => n.span,
            IrNode::SetField(n) => n.span,
            IrNode::GetObjectValue(n) => n.span,
            IrNode::GetEnumValue(n) => n.span,
            IrNode::TypeOperator(n) => n.span,
            IrNode::Return(n) => n.span,
            IrNode::Throw(n) => n.span,
            IrNode::StringConcatenation(n) => n.span,
            IrNode::When(n) => n.span,
            IrNode::Branch(n) => n.span,
            IrNode::WhileLoop(n) | IrNode::DoWhileLoop(n) => n.span,
            IrNode::Break(n) | IrNode::Continue(n) => n.span,
            IrNode::Try(n) => n.span,
            IrNode::Catch(n) => n.span,
            IrNode::ErrorCall(n) => n.span,
            IrNode::ErrorExpression(n) => n.span,
        }
    }

    pub fn start_offset(self) -> u32 {
        self.span().start
    }

    pub fn end_offset(self) -> u32 {
        self.span().end
    }

    /// All structural children in source order.
    ///
    /// This is the generic enumeration used by traversals that have no
    /// kind-specific handling. Annotations and type arguments are metadata,
    /// not children.
    pub fn children(self) -> Vec<IrNode<'a>> {
        let mut out = Vec::new();
        match self {
            IrNode::File(file) => out.extend(file.declarations.iter().map(IrNode::from)),
            IrNode::Class(class) => out.extend(class.declarations.iter().map(IrNode::from)),
            IrNode::Function(function) | IrNode::Constructor(function) => {
                out.extend(
                    function
                        .declared_defaults()
                        .map(|(_, default)| IrNode::from(default)),
                );
                out.extend(function.body.as_ref().map(IrNode::from));
            }
            IrNode::EnumEntry(entry) => {
                out.push(IrNode::from(&entry.initializer));
                out.extend(entry.corresponding_class.as_deref().map(IrNode::Class));
            }
            IrNode::Property(property) => {
                out.extend(property.initializer.as_ref().map(IrNode::from))
            }
            IrNode::Field(field) => out.extend(field.initializer.as_ref().map(IrNode::from)),
            IrNode::Variable(variable) => {
                out.extend(variable.initializer.as_ref().map(IrNode::from))
            }
            IrNode::ExpressionBody(body) => out.push(IrNode::from(&body.expression)),
            IrNode::BlockBody(body) => out.extend(body.statements.iter().map(IrNode::from)),
            IrNode::Block(block) => out.extend(block.statements.iter().map(IrNode::from)),
            IrNode::SetVariable(set) => out.push(IrNode::from(&*set.value)),
            IrNode::MemberAccess(call) => {
                out.extend(call.dispatch_receiver.as_deref().map(IrNode::from));
                out.extend(call.extension_receiver.as_deref().map(IrNode::from));
                out.extend(call.value_arguments.iter().flatten().map(IrNode::from));
            }
            IrNode::GetField(get) => out.extend(get.receiver.as_deref().map(IrNode::from)),
            IrNode::SetField(set) => {
                out.extend(set.receiver.as_deref().map(IrNode::from));
                out.push(IrNode::from(&*set.value));
            }
            IrNode::TypeOperator(op) => out.push(IrNode::from(&*op.argument)),
            IrNode::Return(ret) => out.push(IrNode::from(&*ret.value)),
            IrNode::Throw(throw) => out.push(IrNode::from(&*throw.value)),
            IrNode::StringConcatenation(concat) => {
                out.extend(concat.arguments.iter().map(IrNode::from))
            }
            IrNode::When(when) => out.extend(when.branches.iter().map(IrNode::Branch)),
            IrNode::Branch(branch) => {
                out.push(IrNode::from(&branch.condition));
                out.push(IrNode::from(&branch.result));
            }
            IrNode::WhileLoop(lp) | IrNode::DoWhileLoop(lp) => {
                out.push(IrNode::from(&*lp.condition));
                out.extend(lp.body.as_deref().map(IrNode::from));
            }
            IrNode::Try(try_expr) => {
                out.push(IrNode::from(&*try_expr.try_result));
                out.extend(try_expr.catches.iter().map(IrNode::Catch));
                out.extend(try_expr.finally.as_deref().map(IrNode::from));
            }
            IrNode::Catch(catch) => out.push(IrNode::from(&catch.result)),
            IrNode::ErrorCall(call) => {
                out.extend(call.explicit_receiver.as_deref().map(IrNode::from));
                out.extend(call.arguments.iter().map(IrNode::from));
            }
            IrNode::Const(_)
            | IrNode::GetValue(_)
            | IrNode::GetObjectValue(_)
            | IrNode::GetEnumValue(_)
            | IrNode::Break(_)
            | IrNode::Continue(_)
            | IrNode::ErrorExpression(_) => {}
        }
        out
    }
}

impl<'a> From<&'a IrFile> for IrNode<'a> {
    fn from(file: &'a IrFile) -> Self {
        IrNode::File(file)
    }
}

impl<'a> From<&'a IrDeclaration> for IrNode<'a> {
    fn from(declaration: &'a IrDeclaration) -> Self {
        match declaration {
            IrDeclaration::Class(n) => IrNode::Class(n),
            IrDeclaration::Function(n) => IrNode::Function(n),
            IrDeclaration::Constructor(n) => IrNode::Constructor(n),
            IrDeclaration::EnumEntry(n) => IrNode::EnumEntry(n),
            IrDeclaration::Property(n) => IrNode::Property(n),
            IrDeclaration::Field(n) => IrNode::Field(n),
            IrDeclaration::Variable(n) => IrNode::Variable(n),
        }
    }
}

impl<'a> From<&'a IrBody> for IrNode<'a> {
    fn from(body: &'a IrBody) -> Self {
        match body {
            IrBody::Expression(n) => IrNode::ExpressionBody(n),
            IrBody::Block(n) => IrNode::BlockBody(n),
        }
    }
}

impl<'a> From<&'a IrStatement> for IrNode<'a> {
    fn from(statement: &'a IrStatement) -> Self {
        match statement {
            IrStatement::Declaration(n) => IrNode::from(n),
            IrStatement::Expression(n) => IrNode::from(n),
        }
    }
}

impl<'a> From<&'a IrExpression> for IrNode<'a> {
    fn from(expression: &'a IrExpression) -> Self {
        match expression {
            IrExpression::Block(n) => IrNode::Block(n),
            IrExpression::Const(n) => IrNode::Const(n),
            IrExpression::GetValue(n) => IrNode::GetValue(n),
            IrExpression::SetVariable(n) => IrNode::SetVariable(n),
            IrExpression::MemberAccess(n) => IrNode::MemberAccess(n),
            IrExpression::GetField(n) => IrNode::GetField(n),
            IrExpression::SetField(n) => IrNode::SetField(n),
            IrExpression::GetObjectValue(n) => IrNode::GetObjectValue(n),
            IrExpression::GetEnumValue(n) => IrNode::GetEnumValue(n),
            IrExpression::TypeOperator(n) => IrNode::TypeOperator(n),
            IrExpression::Return(n) => IrNode::Return(n),
            IrExpression::Throw(n) => IrNode::Throw(n),
            IrExpression::StringConcatenation(n) => IrNode::StringConcatenation(n),
            IrExpression::When(n) => IrNode::When(n),
            IrExpression::WhileLoop(n) => IrNode::WhileLoop(n),
            IrExpression::DoWhileLoop(n) => IrNode::DoWhileLoop(n),
            IrExpression::Break(n) => IrNode::Break(n),
            IrExpression::Continue(n) => IrNode::Continue(n),
            IrExpression::Try(n) => IrNode::Try(n),
            IrExpression::ErrorCall(n) => IrNode::ErrorCall(n),
            IrExpression::Error(n) => IrNode::ErrorExpression(n),
        }
    }
}

impl<'a> From<&'a IrClass> for IrNode<'a> {
    fn from(class: &'a IrClass) -> Self {
        IrNode::Class(class)
    }
}

impl<'a> From<&'a IrBranch> for IrNode<'a> {
    fn from(branch: &'a IrBranch) -> Self {
        IrNode::Branch(branch)
    }
}

impl<'a> From<&'a IrCatch> for IrNode<'a> {
    fn from(catch: &'a IrCatch) -> Self {
        IrNode::Catch(catch)
    }
}
