//! Textual tree dumps of the backend IR.
//!
//! Each element becomes one line, `label: <render>` (or just `<render>` when
//! the label is empty), followed by its children one [`INDENT_UNIT`] deeper.
//! The order children are visited in is fixed per kind; see
//! [`TreeDumper::dump_labeled`]. Identical trees always produce identical
//! text, which golden-file tests rely on.
//!
//! ## Architecture
//!
//! - [`render`]: the one-line description of a single element
//! - [`select`]: dumps restricted to the subtrees starting on one source line
//!
//! Traversal is plain recursion, so the stack depth grows with the nesting
//! depth of the tree. Trees built from real source stay far below any limit.

pub mod render;
pub mod select;

use std::fmt::{self, Write};

use crate::ir::IrNode;

pub use render::render;
pub use select::{dump_trees_from_line, dump_trees_from_line_to};

/// Indentation added per nesting level.
pub const INDENT_UNIT: &str = "  ";

/// Dump `node` and its whole subtree.
pub fn dump<'a>(node: impl Into<IrNode<'a>>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = dump_to(node, &mut out);
    out
}

/// Dump `node` and its whole subtree into `out`.
pub fn dump_to<'a, W: Write>(node: impl Into<IrNode<'a>>, out: &mut W) -> fmt::Result {
    TreeDumper::new(out).dump_labeled(node.into(), "")
}

/// Writes lines at the current indentation level.
struct Printer<'w, W: Write> {
    out: &'w mut W,
    depth: usize,
}

impl<'w, W: Write> Printer<'w, W> {
    fn println(&mut self, line: &str) -> fmt::Result {
        for _ in 0..self.depth {
            self.out.write_str(INDENT_UNIT)?;
        }
        self.out.write_str(line)?;
        self.out.write_char('\n')
    }
}

/// Recursive IR dumper writing into any [`fmt::Write`] sink.
pub struct TreeDumper<'w, W: Write> {
    printer: Printer<'w, W>,
}

impl<'w, W: Write> TreeDumper<'w, W> {
    pub fn new(out: &'w mut W) -> Self {
        Self {
            printer: Printer { out, depth: 0 },
        }
    }

    /// Dump `node` under `label`, then its children.
    ///
    /// | Kind | Children, in order |
    /// |---|---|
    /// | File | `fileAnnotations:` and the annotations as plain lines, then declarations |
    /// | Function, Constructor | declared defaults labeled by parameter name, then body |
    /// | EnumEntry | `init`, then `class` |
    /// | MemberAccess | type arguments (plain lines), `$this`, `$receiver`, bound arguments |
    /// | GetField | `receiver` |
    /// | SetField | `receiver`, `value` |
    /// | When | branches |
    /// | Branch | `if`, `then` |
    /// | WhileLoop | `condition`, `body` |
    /// | DoWhileLoop | `body`, `condition` |
    /// | Try | `try`, catches, `finally` |
    /// | ErrorCall | `receiver`, arguments |
    /// | anything else | [`IrNode::children`], unlabeled |
    pub fn dump_labeled(&mut self, node: IrNode<'_>, label: &str) -> fmt::Result {
        match node {
            IrNode::File(file) => self.dump_labeled_with(node, label, |d| {
                if !file.annotations.is_empty() {
                    d.printer.println("fileAnnotations:")?;
                    d.indented(|d| {
                        for annotation in &file.annotations {
                            d.printer.println(&annotation.to_string())?;
                        }
                        Ok(())
                    })?;
                }
                for declaration in &file.declarations {
                    d.dump_labeled(declaration.into(), "")?;
                }
                Ok(())
            }),
            IrNode::Function(function) | IrNode::Constructor(function) => {
                self.dump_labeled_with(node, label, |d| {
                    for (parameter, default) in function.declared_defaults() {
                        d.dump_labeled(default.into(), &parameter.name)?;
                    }
                    if let Some(body) = &function.body {
                        d.dump_labeled(body.into(), "")?;
                    }
                    Ok(())
                })
            }
            IrNode::EnumEntry(entry) => self.dump_labeled_with(node, label, |d| {
                d.dump_labeled((&entry.initializer).into(), "init")?;
                if let Some(class) = entry.corresponding_class.as_deref() {
                    d.dump_labeled(class.into(), "class")?;
                }
                Ok(())
            }),
            IrNode::MemberAccess(call) => self.dump_labeled_with(node, label, |d| {
                for parameter in &call.callee.type_parameters {
                    if let Some(argument) = call.type_argument(parameter.index) {
                        d.printer
                            .println(&render::render_type_argument(&parameter.name, argument))?;
                    }
                }
                if let Some(receiver) = call.dispatch_receiver.as_deref() {
                    d.dump_labeled(receiver.into(), "$this")?;
                }
                if let Some(receiver) = call.extension_receiver.as_deref() {
                    d.dump_labeled(receiver.into(), "$receiver")?;
                }
                for parameter in &call.callee.value_parameters {
                    if let Some(argument) = call.value_argument(parameter.index) {
                        d.dump_labeled(argument.into(), &parameter.name)?;
                    }
                }
                Ok(())
            }),
            IrNode::GetField(get) => self.dump_labeled_with(node, label, |d| {
                if let Some(receiver) = get.receiver.as_deref() {
                    d.dump_labeled(receiver.into(), "receiver")?;
                }
                Ok(())
            }),
            IrNode::SetField(set) => self.dump_labeled_with(node, label, |d| {
                if let Some(receiver) = set.receiver.as_deref() {
                    d.dump_labeled(receiver.into(), "receiver")?;
                }
                d.dump_labeled((&*set.value).into(), "value")
            }),
            IrNode::When(when) => self.dump_labeled_with(node, label, |d| {
                for branch in &when.branches {
                    d.dump_labeled(branch.into(), "")?;
                }
                Ok(())
            }),
            IrNode::Branch(branch) => self.dump_labeled_with(node, label, |d| {
                d.dump_labeled((&branch.condition).into(), "if")?;
                d.dump_labeled((&branch.result).into(), "then")
            }),
            IrNode::WhileLoop(lp) => self.dump_labeled_with(node, label, |d| {
                d.dump_labeled((&*lp.condition).into(), "condition")?;
                if let Some(body) = lp.body.as_deref() {
                    d.dump_labeled(body.into(), "body")?;
                }
                Ok(())
            }),
            // Body first: a do-while executes before it tests.
            IrNode::DoWhileLoop(lp) => self.dump_labeled_with(node, label, |d| {
                if let Some(body) = lp.body.as_deref() {
                    d.dump_labeled(body.into(), "body")?;
                }
                d.dump_labeled((&*lp.condition).into(), "condition")
            }),
            IrNode::Try(try_expr) => self.dump_labeled_with(node, label, |d| {
                d.dump_labeled((&*try_expr.try_result).into(), "try")?;
                for catch in &try_expr.catches {
                    d.dump_labeled(catch.into(), "")?;
                }
                if let Some(finally) = try_expr.finally.as_deref() {
                    d.dump_labeled(finally.into(), "finally")?;
                }
                Ok(())
            }),
            IrNode::ErrorCall(call) => self.dump_labeled_with(node, label, |d| {
                if let Some(receiver) = call.explicit_receiver.as_deref() {
                    d.dump_labeled(receiver.into(), "receiver")?;
                }
                for argument in &call.arguments {
                    d.dump_labeled(argument.into(), "")?;
                }
                Ok(())
            }),
            IrNode::Class(_)
            | IrNode::Property(_)
            | IrNode::Field(_)
            | IrNode::Variable(_)
            | IrNode::ExpressionBody(_)
            | IrNode::BlockBody(_)
            | IrNode::Block(_)
            | IrNode::Const(_)
            | IrNode::GetValue(_)
            | IrNode::SetVariable(_)
            | IrNode::GetObjectValue(_)
            | IrNode::GetEnumValue(_)
            | IrNode::TypeOperator(_)
            | IrNode::Return(_)
            | IrNode::Throw(_)
            | IrNode::StringConcatenation(_)
            | IrNode::Break(_)
            | IrNode::Continue(_)
            | IrNode::Catch(_)
            | IrNode::ErrorExpression(_) => self.dump_labeled_subtree(node, label),
        }
    }

    fn dump_labeled_with<F>(&mut self, node: IrNode<'_>, label: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.printer.println(&with_label(render(node), label))?;
        self.indented(body)
    }

    fn dump_labeled_subtree(&mut self, node: IrNode<'_>, label: &str) -> fmt::Result {
        self.dump_labeled_with(node, label, |d| {
            for child in node.children() {
                d.dump_labeled(child, "")?;
            }
            Ok(())
        })
    }

    fn indented<F>(&mut self, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.printer.depth += 1;
        let result = body(self);
        self.printer.depth -= 1;
        result
    }
}

fn with_label(line: String, label: &str) -> String {
    if label.is_empty() {
        line
    } else {
        format!("{label}: {line}")
    }
}
