use serde::Serialize;

/// Byte-offset range of an IR element in its owning file. Start is
/// inclusive, end is exclusive.
///
/// Elements produced by upstream phases carry the offsets of the source
/// construct they were built from. Elements the backend invents on its own
/// carry [`Span::SYNTHETIC`], which never maps to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Offset pair used for compiler-generated elements.
    pub const SYNTHETIC: Span = Span {
        start: u32::MAX,
        end: u32::MAX,
    };

    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start ({start}) must be <= end ({end})");
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether this span was produced by the compiler rather than the source.
    pub fn is_synthetic(&self) -> bool {
        self.start == u32::MAX
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Line start positions of one source text, for offset-to-line lookup.
///
/// Built once per file; lookups are a binary search over `line_starts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the start of each line. The first entry is always 0.
    line_starts: Vec<u32>,
    /// Total length of the indexed text in bytes.
    len: u32,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, byte)| byte == b'\n')
                .map(|(i, _)| (i + 1) as u32),
        );
        Self {
            line_starts,
            len: source.len() as u32,
        }
    }

    /// Convert a byte offset to a 1-based `(line, column)` pair.
    ///
    /// Returns `None` when the offset lies past the end of the text. An offset
    /// equal to the text length is accepted so that end-of-file positions
    /// resolve to the last line.
    pub fn line_col(&self, offset: u32) -> Option<(u32, u32)> {
        if offset > self.len {
            return None;
        }
        // partition_point yields the first line start > offset.
        let line_idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line = line_idx as u32 + 1;
        let col = offset - self.line_starts[line_idx] + 1;
        Some((line, col))
    }

    /// 1-based line containing `offset`, if the offset is inside the text.
    pub fn line(&self, offset: u32) -> Option<u32> {
        self.line_col(offset).map(|(line, _)| line)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Length in bytes of the text this index was built from.
    pub fn text_len(&self) -> u32 {
        self.len
    }
}
