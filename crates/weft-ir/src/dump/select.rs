//! Dumps restricted to one source line.
//!
//! Used by tooling that maps an editor position back to IR: only the
//! *maximal* subtrees whose root starts on the requested line are dumped.
//! Once an element matches, its descendants are not examined, even if some of
//! them start on the same line.

use std::fmt::{self, Write};

use weft_common::FileEntry;

use super::TreeDumper;
use crate::ir::{IrFile, IrNode};

/// Dump every maximal subtree of `file` starting on the 1-based `line`,
/// concatenated in document order. Returns an empty string when nothing
/// starts on that line.
pub fn dump_trees_from_line(file: &IrFile, entry: &FileEntry, line: u32) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = dump_trees_from_line_to(file, entry, line, &mut out);
    out
}

/// [`dump_trees_from_line`] writing into an arbitrary sink.
pub fn dump_trees_from_line_to<W: Write>(
    file: &IrFile,
    entry: &FileEntry,
    line: u32,
    out: &mut W,
) -> fmt::Result {
    LineSelector {
        entry,
        line,
        dumper: TreeDumper::new(out),
    }
    .visit(IrNode::File(file))
}

impl IrFile {
    /// Line-scoped dump using the file's own position map entry.
    pub fn dump_trees_from_line(&self, line: u32) -> String {
        dump_trees_from_line(self, &self.entry, line)
    }
}

struct LineSelector<'e, 'w, W: Write> {
    entry: &'e FileEntry,
    line: u32,
    dumper: TreeDumper<'w, W>,
}

impl<W: Write> LineSelector<'_, '_, W> {
    fn visit(&mut self, node: IrNode<'_>) -> fmt::Result {
        if self.entry.line_number(node.start_offset()) == Some(self.line) {
            return self.dumper.dump_labeled(node, "");
        }
        for child in node.children() {
            self.visit(child)?;
        }
        Ok(())
    }
}
