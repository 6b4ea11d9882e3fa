use std::path::{Path, PathBuf};

/// What kind of filesystem object an entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    File,
    /// Sockets, fifos, device nodes, dangling symlinks.
    Other,
}

/// A single filesystem entry: a path, its name and its kind.
///
/// Nothing beyond what the operating system already exposes is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    /// Full path to the file or directory
    pub path: PathBuf,

    /// Entry name (last component of path)
    pub name: String,

    pub kind: EntryKind,
}

impl FsEntry {
    /// Create an entry with a known kind.
    pub fn new(path: PathBuf, kind: EntryKind) -> Self {
        let name = entry_name(&path);
        Self { path, name, kind }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::new(path.into(), EntryKind::Directory)
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path.into(), EntryKind::File)
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Hidden in the Unix sense: the name starts with a dot.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// The display name of a path: its last component, or the whole path for
/// roots like `/`.
pub fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
