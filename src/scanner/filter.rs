//! Visibility rules for directory entries.

use crate::markdown::MarkdownExtensions;

use super::entry::FsEntry;

/// Decides whether an entry shows up in a directory tree.
pub trait EntryFilter: std::fmt::Debug {
    fn is_visible(&self, entry: &FsEntry) -> bool;

    /// Keep the visible entries, preserving their relative order.
    fn filter(&self, entries: Vec<FsEntry>) -> Vec<FsEntry> {
        entries
            .into_iter()
            .filter(|entry| self.is_visible(entry))
            .collect()
    }
}

/// The Markdown viewer's filter.
///
/// Shows every directory that isn't hidden, and every file that looks like
/// it could be a Markdown document. Only directories are hidden by a
/// leading dot; files are judged by the Markdown check alone.
#[derive(Debug, Clone, Default)]
pub struct MarkdownFilter {
    extensions: MarkdownExtensions,
}

impl MarkdownFilter {
    pub fn new(extensions: MarkdownExtensions) -> Self {
        Self { extensions }
    }

    pub fn extensions(&self) -> &MarkdownExtensions {
        &self.extensions
    }
}

impl EntryFilter for MarkdownFilter {
    fn is_visible(&self, entry: &FsEntry) -> bool {
        (entry.is_dir() && !entry.is_hidden())
            || (entry.is_file() && self.extensions.matches(&entry.path))
    }
}

/// Shows everything except hidden entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowAll;

impl EntryFilter for ShowAll {
    fn is_visible(&self, entry: &FsEntry) -> bool {
        !entry.is_hidden()
    }
}

/// Filter `entries` with the default Markdown rules.
pub fn filter_entries(entries: Vec<FsEntry>) -> Vec<FsEntry> {
    MarkdownFilter::default().filter(entries)
}
