use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{MarknavError, Result};

use super::entry::{EntryKind, FsEntry};
use super::filter::EntryFilter;
use super::options::ListOptions;

/// A filtered directory and everything visible below it.
#[derive(Debug, Clone)]
pub struct TreeListing {
    pub entry: FsEntry,

    /// Visible children (empty for files and for directories past the depth limit)
    pub children: Vec<TreeListing>,

    /// Error message if this directory couldn't be read
    pub error: Option<String>,
}

/// List the immediate children of `dir`.
///
/// Fails if `dir` itself can't be read. Children whose kind can't be
/// determined (dangling links, permission problems on the child) come back
/// as `EntryKind::Other` instead of failing the whole listing.
pub fn read_entries(dir: &Path, options: &ListOptions) -> Result<Vec<FsEntry>> {
    let metadata = fs::metadata(dir).map_err(|e| MarknavError::io(dir, e))?;
    if !metadata.is_dir() {
        return Err(MarknavError::NotADirectory(dir.to_path_buf()));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(options.follow_symlinks);

    let mut entries = Vec::new();

    for result in walker {
        match result {
            Ok(e) => {
                let kind = if e.file_type().is_dir() {
                    EntryKind::Directory
                } else if e.file_type().is_file() {
                    EntryKind::File
                } else {
                    EntryKind::Other
                };
                entries.push(FsEntry::new(e.into_path(), kind));
            }
            Err(err) if err.depth() == 0 => {
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                return Err(MarknavError::io(dir, source));
            }
            Err(err) => {
                tracing::debug!(error = %err, "Unreadable directory entry");
                if let Some(path) = err.path() {
                    entries.push(FsEntry::new(path.to_path_buf(), EntryKind::Other));
                }
            }
        }
    }

    sort_entries(&mut entries, options.dirs_first);
    Ok(entries)
}

/// List the children of `dir` that pass `filter`, in display order.
pub fn read_visible_entries(
    dir: &Path,
    filter: &dyn EntryFilter,
    options: &ListOptions,
) -> Result<Vec<FsEntry>> {
    read_entries(dir, options).map(|entries| filter.filter(entries))
}

/// Sort entries by name, case-insensitively, optionally directories first.
pub fn sort_entries(entries: &mut [FsEntry], dirs_first: bool) {
    entries.sort_by(|a, b| {
        if dirs_first {
            let dir_cmp = b.is_dir().cmp(&a.is_dir());
            if dir_cmp != Ordering::Equal {
                return dir_cmp;
            }
        }
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Build a filtered tree below `root`, honouring `options.max_depth`.
///
/// Unreadable subdirectories are kept with their error recorded; only a
/// failure to read `root` itself is returned as an error. A directory that
/// resolves to one of its own ancestors (a symlink loop) is recorded as an
/// error and not descended into.
pub fn list_tree(
    root: &Path,
    filter: &dyn EntryFilter,
    options: &ListOptions,
) -> Result<TreeListing> {
    let children = read_visible_entries(root, filter, options)?;
    let mut listing = TreeListing {
        entry: FsEntry::directory(root),
        children: Vec::new(),
        error: None,
    };
    let mut ancestors = vec![canonical(root)];
    listing.children = children
        .into_iter()
        .map(|child| list_child(child, filter, options, 1, &mut ancestors))
        .collect();
    Ok(listing)
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn list_child(
    entry: FsEntry,
    filter: &dyn EntryFilter,
    options: &ListOptions,
    depth: usize,
    ancestors: &mut Vec<PathBuf>,
) -> TreeListing {
    let mut listing = TreeListing {
        entry,
        children: Vec::new(),
        error: None,
    };

    if !listing.entry.is_dir() {
        return listing;
    }

    if let Some(max_depth) = options.max_depth {
        if depth >= max_depth {
            return listing;
        }
    }

    let resolved = canonical(&listing.entry.path);
    if ancestors.contains(&resolved) {
        tracing::debug!(path = %listing.entry.path.display(), target = %resolved.display(), "Filesystem loop");
        listing.error = Some(format!("Filesystem loop back to '{}'", resolved.display()));
        return listing;
    }

    match read_visible_entries(&listing.entry.path, filter, options) {
        Ok(children) => {
            ancestors.push(resolved);
            listing.children = children
                .into_iter()
                .map(|child| list_child(child, filter, options, depth + 1, ancestors))
                .collect();
            ancestors.pop();
        }
        Err(err) => {
            tracing::warn!(path = %listing.entry.path.display(), error = %err, "Cannot list directory");
            listing.error = Some(err.to_string());
        }
    }

    listing
}
