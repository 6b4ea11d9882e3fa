//! The local files navigation pane.

use std::path::{Path, PathBuf};

use crate::config::{default_root, Config};
use crate::error::{MarknavError, Result};
use crate::location::{Goto, Location};
use crate::scanner::{EntryFilter, ListOptions, MarkdownFilter};
use crate::tui::event::{EventResult, PaneMessage};

use super::tree::{DirectoryTree, TreeEvent};

/// Local file picking navigation pane.
///
/// Hosts exactly one filtered [`DirectoryTree`] and turns file selections in
/// it into [`PaneMessage::Goto`] requests for the containing application.
#[derive(Debug)]
pub struct LocalFiles {
    tree: DirectoryTree,
}

impl LocalFiles {
    pub const TITLE: &'static str = "Local";

    /// Create the pane rooted at `$HOME`, or `.` when that isn't set.
    pub fn new() -> Self {
        Self::with_root(default_root())
    }

    /// Create the pane rooted at `root` with the default Markdown filter.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::with_filter(root, Box::new(MarkdownFilter::default()), ListOptions::default())
    }

    pub fn with_filter(
        root: impl Into<PathBuf>,
        filter: Box<dyn EntryFilter>,
        options: ListOptions,
    ) -> Self {
        Self {
            tree: DirectoryTree::new(root, filter, options),
        }
    }

    /// Create the pane from configuration, optionally overriding its root.
    pub fn from_config(config: &Config, root: Option<PathBuf>) -> Self {
        let root = root.unwrap_or_else(|| config.browse_root());
        Self::with_filter(
            root,
            Box::new(MarkdownFilter::new(config.markdown_extensions())),
            config.list_options(),
        )
    }

    pub fn title(&self) -> &'static str {
        Self::TITLE
    }

    /// The currently mounted tree.
    pub fn tree(&self) -> &DirectoryTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DirectoryTree {
        &mut self.tree
    }

    pub fn root(&self) -> &Path {
        self.tree.root()
    }

    /// Change the filesystem view to the given directory.
    ///
    /// The tree is re-rooted in place, so it is mounted before and after
    /// the call. Paths that aren't directories are rejected and the old
    /// root stays.
    pub fn chdir(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let metadata = std::fs::metadata(&path).map_err(|e| MarknavError::io(&path, e))?;
        if !metadata.is_dir() {
            return Err(MarknavError::NotADirectory(path));
        }

        tracing::debug!(from = %self.tree.root().display(), to = %path.display(), "Changing directory");
        self.tree.set_root(path);
        Ok(())
    }

    /// Re-root at the parent of the current root.
    ///
    /// The root is kept as it was given (symlinks and all) when it has a
    /// plain last component; `.`, `..` and friends are resolved first.
    pub fn chdir_parent(&mut self) -> Result<()> {
        match parent_of(self.tree.root()) {
            Some(parent) => self.chdir(parent),
            None => Ok(()),
        }
    }

    /// Focus the directory tree.
    pub fn set_focus_within(&mut self) {
        self.tree.focus();
    }

    pub fn blur(&mut self) {
        self.tree.blur();
    }

    pub fn has_focus(&self) -> bool {
        self.tree.is_focused()
    }

    /// Handle an event coming out of the hosted tree.
    ///
    /// A file selection from the mounted tree is stopped here and becomes a
    /// single `Goto` for that file. Anything else, including events from a
    /// tree generation that has since been re-rooted, is left to bubble.
    pub fn handle_tree_event(&self, event: &TreeEvent) -> (EventResult, Option<PaneMessage>) {
        if event.tree() != self.tree.id() {
            tracing::debug!(tree = %event.tree(), current = %self.tree.id(), "Dropping event from stale tree");
            return (EventResult::Ignored, None);
        }

        match event {
            TreeEvent::FileSelected { path, .. } => {
                tracing::info!(path = %path.display(), "File selected");
                let goto = Goto::new(Location::Local(path.clone()));
                (EventResult::Handled, Some(PaneMessage::Goto(goto)))
            }
            TreeEvent::DirectoryToggled { .. } => (EventResult::Ignored, None),
        }
    }
}

impl Default for LocalFiles {
    fn default() -> Self {
        Self::new()
    }
}

fn parent_of(root: &Path) -> Option<PathBuf> {
    if root.file_name().is_some() {
        if let Some(parent) = root.parent().filter(|p| !p.as_os_str().is_empty()) {
            return Some(parent.to_path_buf());
        }
    }
    let resolved = std::fs::canonicalize(root)
        .or_else(|_| std::path::absolute(root))
        .unwrap_or_else(|_| root.to_path_buf());
    resolved.parent().map(Path::to_path_buf)
}
