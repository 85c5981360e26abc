//! Source files and their position maps.
//!
//! Provides [`FileId`], [`SourceFile`], [`FileEntry`] and [`SourceManager`].
//! A [`FileEntry`] is what IR files carry around: it knows its display name
//! and can turn an offset into a line number. Whether the entry is backed by
//! a real source file is answered by the [`SourceManager`] that issued it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::span::LineIndex;

/// Index of a source file within one [`SourceManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(pub u32);

/// A source file registered with the compiler.
#[derive(Debug)]
pub struct SourceFile {
    pub id: FileId,
    /// Path as given to the compiler, e.g. `"src/app/main.kt"`.
    pub path: PathBuf,
    /// Fully qualified package the file declares; empty for the root package.
    pub package: String,
    /// Facade class name requested by a file-level naming annotation.
    pub facade_name: Option<String>,
    lines: Arc<LineIndex>,
}

impl SourceFile {
    /// File name without directories, e.g. `"main.kt"`.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("")
    }

    /// File name without directories or extension, e.g. `"main"`.
    pub fn file_stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("")
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.lines
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FileOrigin {
    Source(FileId),
    Synthetic,
}

/// Position map entry for one file.
///
/// Cheap to clone; the line index is shared with the [`SourceFile`] it was
/// created for.
#[derive(Debug, Clone)]
pub struct FileEntry {
    name: String,
    origin: FileOrigin,
    lines: Arc<LineIndex>,
}

impl FileEntry {
    /// Display name of the file (its path for source-backed entries).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based line number of `offset`.
    ///
    /// Returns `None` for offsets outside the file text, which includes the
    /// offsets of synthetic elements.
    pub fn line_number(&self, offset: u32) -> Option<u32> {
        self.lines.line(offset)
    }

    /// Whether this entry was created without a backing source file.
    pub fn is_synthetic(&self) -> bool {
        self.origin == FileOrigin::Synthetic
    }
}

impl fmt::Display for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.origin {
            FileOrigin::Source(id) => write!(f, "{} (file #{})", self.name, id.0),
            FileOrigin::Synthetic => write!(f, "{} (synthetic)", self.name),
        }
    }
}

/// Registry of the source files taking part in one compilation.
///
/// Files are stored in registration order and identified by [`FileId`].
#[derive(Debug, Default)]
pub struct SourceManager {
    files: Vec<Arc<SourceFile>>,
    path_to_id: FxHashMap<PathBuf, FileId>,
}

impl SourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source file and return its position map entry.
    ///
    /// Registering the same path twice yields two independent files; the path
    /// lookup then resolves to the later one.
    pub fn add_file(
        &mut self,
        path: impl Into<PathBuf>,
        package: impl Into<String>,
        text: &str,
        facade_name: Option<String>,
    ) -> FileEntry {
        let id = FileId(self.files.len() as u32);
        let path = path.into();
        let lines = Arc::new(LineIndex::new(text));
        self.path_to_id.insert(path.clone(), id);
        self.files.push(Arc::new(SourceFile {
            id,
            path: path.clone(),
            package: package.into(),
            facade_name,
            lines: Arc::clone(&lines),
        }));
        FileEntry {
            name: path.to_string_lossy().into_owned(),
            origin: FileOrigin::Source(id),
            lines,
        }
    }

    /// Create an entry that is not backed by any registered file, for IR the
    /// compiler builds from scratch.
    pub fn synthetic_entry(name: impl Into<String>, text: &str) -> FileEntry {
        FileEntry {
            name: name.into(),
            origin: FileOrigin::Synthetic,
            lines: Arc::new(LineIndex::new(text)),
        }
    }

    /// Resolve an entry to the file it was created for.
    ///
    /// Returns `None` for synthetic entries and for entries issued by a
    /// different manager.
    pub fn source_file(&self, entry: &FileEntry) -> Option<Arc<SourceFile>> {
        let FileOrigin::Source(id) = entry.origin else {
            return None;
        };
        let file = self.files.get(id.0 as usize)?;
        Arc::ptr_eq(&file.lines, &entry.lines).then(|| Arc::clone(file))
    }

    /// Entry for a previously registered path.
    pub fn entry_for_path(&self, path: &Path) -> Option<FileEntry> {
        let id = *self.path_to_id.get(path)?;
        let file = &self.files[id.0 as usize];
        Some(FileEntry {
            name: file.path.to_string_lossy().into_owned(),
            origin: FileOrigin::Source(id),
            lines: Arc::clone(&file.lines),
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_maps_offsets_to_lines() {
        let mut sources = SourceManager::new();
        let entry = sources.add_file("app/main.kt", "app", "fun a()\n\nfun b()\n", None);
        assert_eq!(entry.line_number(0), Some(1));
        assert_eq!(entry.line_number(9), Some(3));
        assert_eq!(entry.line_number(100), None);
        assert!(!entry.is_synthetic());
    }

    #[test]
    fn resolves_own_entries() {
        let mut sources = SourceManager::new();
        let entry = sources.add_file("app/main.kt", "app", "", Some("MainFacade".into()));
        let file = sources.source_file(&entry).unwrap();
        assert_eq!(file.file_name(), "main.kt");
        assert_eq!(file.file_stem(), "main");
        assert_eq!(file.package, "app");
        assert_eq!(file.facade_name.as_deref(), Some("MainFacade"));
    }

    #[test]
    fn synthetic_entries_do_not_resolve() {
        let sources = SourceManager::new();
        let entry = SourceManager::synthetic_entry("<generated>", "");
        assert!(entry.is_synthetic());
        assert!(sources.source_file(&entry).is_none());
        assert_eq!(entry.to_string(), "<generated> (synthetic)");
    }

    #[test]
    fn entries_from_another_manager_are_stale() {
        let mut first = SourceManager::new();
        let mut second = SourceManager::new();
        let entry = first.add_file("a.kt", "", "", None);
        second.add_file("b.kt", "", "", None);
        assert!(second.source_file(&entry).is_none());
        assert!(first.source_file(&entry).is_some());
    }

    #[test]
    fn path_lookup() {
        let mut sources = SourceManager::new();
        sources.add_file("a.kt", "", "x\ny", None);
        let entry = sources.entry_for_path(Path::new("a.kt")).unwrap();
        assert_eq!(entry.line_number(2), Some(2));
        assert!(sources.source_file(&entry).is_some());
        assert!(sources.entry_for_path(Path::new("b.kt")).is_none());
        assert_eq!(sources.len(), 1);
    }
}
