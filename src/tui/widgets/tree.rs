//! Directory tree widget.
//!
//! The tree starts with just the root node expanded. Directories are only
//! read when they are expanded, and every listing goes through the tree's
//! [`EntryFilter`]. Unlike a widget that has to be thrown away to show a
//! different directory, [`DirectoryTree::set_root`] re-roots in place, so
//! there is never a moment with no tree to focus or send events to.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph, Widget},
};

use crate::scanner::{read_visible_entries, EntryFilter, FsEntry, ListOptions};
use crate::tui::theme::Palette;

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one generation of a tree.
///
/// Every tree gets a fresh id on construction and again on every re-root,
/// so events can be matched against the tree that is mounted right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(u64);

impl TreeId {
    fn next() -> Self {
        TreeId(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tree#{}", self.0)
    }
}

/// Unique identifier for a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// State of a tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeState {
    /// Directory not yet expanded
    Collapsed,
    /// Directory expanded, children loaded
    Expanded,
    /// Failed to load (with error message)
    Error(String),
    /// File (leaf node, cannot be expanded)
    Leaf,
}

/// A node in the tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: NodeId,
    pub entry: FsEntry,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub state: NodeState,
    /// Depth in the tree (0 = root).
    pub depth: usize,
}

impl TreeNode {
    fn new(id: NodeId, entry: FsEntry, parent: Option<NodeId>, depth: usize) -> Self {
        let state = if entry.is_dir() {
            NodeState::Collapsed
        } else {
            NodeState::Leaf
        };
        Self {
            id,
            entry,
            parent,
            children: Vec::new(),
            state,
            depth,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.entry.is_dir()
    }

    pub fn is_expanded(&self) -> bool {
        self.state == NodeState::Expanded
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            NodeState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Something that happened inside a tree, reported to whoever hosts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    /// A file row was activated.
    FileSelected { tree: TreeId, path: PathBuf },
    /// A directory row was activated and flipped between open and closed.
    DirectoryToggled {
        tree: TreeId,
        path: PathBuf,
        expanded: bool,
    },
}

impl TreeEvent {
    /// The tree generation that produced this event.
    pub fn tree(&self) -> TreeId {
        match self {
            TreeEvent::FileSelected { tree, .. } | TreeEvent::DirectoryToggled { tree, .. } => {
                *tree
            }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            TreeEvent::FileSelected { path, .. } | TreeEvent::DirectoryToggled { path, .. } => path,
        }
    }
}

/// A filtered, lazily-loaded directory tree with a cursor.
#[derive(Debug)]
pub struct DirectoryTree {
    id: TreeId,
    root: PathBuf,
    nodes: HashMap<NodeId, TreeNode>,
    root_id: NodeId,
    next_id: usize,
    /// Flattened visible nodes, in display order.
    visible: Vec<NodeId>,
    cursor: usize,
    focused: bool,
    filter: Box<dyn EntryFilter>,
    options: ListOptions,
}

impl DirectoryTree {
    /// Create a tree rooted at `root`, with the root expanded.
    ///
    /// A root that can't be read still produces a tree; its root node is in
    /// the `Error` state.
    pub fn new(root: impl Into<PathBuf>, filter: Box<dyn EntryFilter>, options: ListOptions) -> Self {
        let mut tree = Self {
            id: TreeId::next(),
            root: PathBuf::new(),
            nodes: HashMap::new(),
            root_id: NodeId(0),
            next_id: 0,
            visible: Vec::new(),
            cursor: 0,
            focused: false,
            filter,
            options,
        };
        tree.mount_root(root.into());
        tree
    }

    /// Re-root the tree at `root`, discarding everything loaded so far.
    ///
    /// The tree gets a new [`TreeId`]; focus is kept.
    pub fn set_root(&mut self, root: impl Into<PathBuf>) {
        self.id = TreeId::next();
        self.mount_root(root.into());
    }

    fn mount_root(&mut self, root: PathBuf) {
        tracing::debug!(root = %root.display(), tree = %self.id, "Mounting tree root");

        self.nodes.clear();
        self.next_id = 0;
        self.cursor = 0;

        let root_id = self.add_node(FsEntry::directory(root.clone()), None, 0);
        self.root_id = root_id;
        self.root = root;
        self.expand_node(root_id);
    }

    pub fn id(&self) -> TreeId {
        self.id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn root_node(&self) -> Option<&TreeNode> {
        self.nodes.get(&self.root_id)
    }

    pub fn filter(&self) -> &dyn EntryFilter {
        self.filter.as_ref()
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    /// Visible nodes in display order.
    pub fn visible_nodes(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.visible.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_node(&self) -> Option<&TreeNode> {
        self.visible
            .get(self.cursor)
            .and_then(|id| self.nodes.get(id))
    }

    pub fn cursor_path(&self) -> Option<&Path> {
        self.cursor_node().map(|node| node.entry.path.as_path())
    }

    /// Move the cursor by `delta` rows, clamped to the visible rows.
    pub fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            self.cursor = 0;
            return;
        }
        let max = self.visible.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    pub fn cursor_to_first(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_to_last(&mut self) {
        self.cursor = self.visible.len().saturating_sub(1);
    }

    /// Put the cursor on `path` if it's visible. Returns whether it was found.
    pub fn select_path(&mut self, path: &Path) -> bool {
        match self
            .visible
            .iter()
            .position(|id| self.nodes.get(id).is_some_and(|n| n.entry.path == path))
        {
            Some(index) => {
                self.cursor = index;
                true
            }
            None => false,
        }
    }

    /// Expand the directory under the cursor.
    pub fn expand(&mut self) {
        if let Some(&id) = self.visible.get(self.cursor) {
            if self.nodes.get(&id).is_some_and(|n| !n.is_expanded()) {
                self.expand_node(id);
            }
        }
    }

    /// Collapse the directory under the cursor, or jump to its parent if it
    /// isn't an open directory.
    pub fn collapse(&mut self) {
        let Some(&id) = self.visible.get(self.cursor) else {
            return;
        };
        let Some(node) = self.nodes.get(&id) else {
            return;
        };

        if node.is_expanded() {
            self.collapse_node(id);
        } else if let Some(parent) = node.parent {
            if let Some(index) = self.visible.iter().position(|&v| v == parent) {
                self.cursor = index;
            }
        }
    }

    /// Flip the directory under the cursor between open and closed.
    pub fn toggle(&mut self) -> Option<bool> {
        let id = *self.visible.get(self.cursor)?;
        let node = self.nodes.get(&id)?;
        if !node.is_dir() {
            return None;
        }
        if node.is_expanded() {
            self.collapse_node(id);
            Some(false)
        } else {
            self.expand_node(id);
            Some(self.nodes.get(&id).is_some_and(|n| n.is_expanded()))
        }
    }

    /// Activate the row under the cursor.
    ///
    /// Files produce [`TreeEvent::FileSelected`]; directories are toggled
    /// and produce [`TreeEvent::DirectoryToggled`].
    pub fn select(&mut self) -> Option<TreeEvent> {
        let node = self.cursor_node()?;
        let path = node.entry.path.clone();

        if node.is_dir() {
            let expanded = self.toggle()?;
            return Some(TreeEvent::DirectoryToggled {
                tree: self.id,
                path,
                expanded,
            });
        }

        if node.entry.is_file() {
            return Some(TreeEvent::FileSelected {
                tree: self.id,
                path,
            });
        }

        None
    }

    /// Re-read every open directory, keeping what was open and where the
    /// cursor was.
    pub fn reload(&mut self) {
        let expanded: HashSet<PathBuf> = self
            .nodes
            .values()
            .filter(|n| n.is_expanded())
            .map(|n| n.entry.path.clone())
            .collect();
        let cursor_path = self.cursor_path().map(Path::to_path_buf);

        let root = self.root.clone();
        self.mount_root(root);

        let mut i = 0;
        while i < self.visible.len() {
            let id = self.visible[i];
            let reopen = self.nodes.get(&id).is_some_and(|n| {
                n.state == NodeState::Collapsed && expanded.contains(&n.entry.path)
            });
            if reopen {
                self.expand_node(id);
            }
            i += 1;
        }

        if let Some(path) = cursor_path {
            if !self.select_path(&path) {
                self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));
            }
        }
    }

    /// Load a directory's children and open it.
    ///
    /// Listing errors are kept on the node and logged; they never escape.
    fn expand_node(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        if !node.is_dir() || node.is_expanded() {
            return;
        }
        let path = node.entry.path.clone();
        let depth = node.depth;

        match read_visible_entries(&path, self.filter.as_ref(), &self.options) {
            Ok(entries) => {
                let children: Vec<NodeId> = entries
                    .into_iter()
                    .map(|entry| self.add_node(entry, Some(id), depth + 1))
                    .collect();
                if let Some(node) = self.nodes.get_mut(&id) {
                    node.children = children;
                    node.state = NodeState::Expanded;
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Cannot read directory");
                if let Some(node) = self.nodes.get_mut(&id) {
                    node.children.clear();
                    node.state = NodeState::Error(err.to_string());
                }
            }
        }

        self.rebuild_visible();
    }

    /// Close a directory, dropping its loaded children.
    fn collapse_node(&mut self, id: NodeId) {
        let children = match self.nodes.get_mut(&id) {
            Some(node) if node.is_dir() => {
                node.state = NodeState::Collapsed;
                std::mem::take(&mut node.children)
            }
            _ => return,
        };
        for child in children {
            self.remove_node_recursive(child);
        }
        self.rebuild_visible();
    }

    fn add_node(&mut self, entry: FsEntry, parent: Option<NodeId>, depth: usize) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, TreeNode::new(id, entry, parent, depth));
        id
    }

    fn remove_node_recursive(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children {
                self.remove_node_recursive(child);
            }
        }
    }

    fn rebuild_visible(&mut self) {
        let mut visible = Vec::with_capacity(self.visible.len());
        self.collect_visible(self.root_id, &mut visible);

        // Keep the cursor on the same node when rows shift around it
        let current = self.visible.get(self.cursor).copied();
        self.visible = visible;
        self.cursor = current
            .and_then(|id| self.visible.iter().position(|&v| v == id))
            .unwrap_or_else(|| self.cursor.min(self.visible.len().saturating_sub(1)));
    }

    fn collect_visible(&self, id: NodeId, visible: &mut Vec<NodeId>) {
        visible.push(id);
        if let Some(node) = self.nodes.get(&id) {
            if node.is_expanded() {
                for &child in &node.children {
                    self.collect_visible(child, visible);
                }
            }
        }
    }
}

/// Renders a [`DirectoryTree`] into a block.
pub struct TreeView<'a> {
    tree: &'a DirectoryTree,
    block: Option<Block<'a>>,
    show_icons: bool,
    palette: Palette,
}

impl<'a> TreeView<'a> {
    pub fn new(tree: &'a DirectoryTree) -> Self {
        Self {
            tree,
            block: None,
            show_icons: true,
            palette: Palette::default(),
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn show_icons(mut self, show: bool) -> Self {
        self.show_icons = show;
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    fn row_line(&self, node: &TreeNode, is_cursor: bool) -> Line<'a> {
        let indent = "  ".repeat(node.depth);

        let icon = if !self.show_icons {
            ""
        } else {
            match &node.state {
                NodeState::Expanded => "▼ ",
                NodeState::Collapsed => "► ",
                NodeState::Error(_) => "✗ ",
                NodeState::Leaf => "  ",
            }
        };

        let name = if node.depth == 0 {
            node.entry.path.display().to_string()
        } else if node.is_dir() {
            format!("{}/", node.entry.name)
        } else {
            node.entry.name.clone()
        };

        let name_style = if node.error().is_some() {
            self.palette.error
        } else if node.is_dir() {
            self.palette.directory
        } else {
            self.palette.text
        };

        let mut spans = vec![Span::styled(format!("{}{}", indent, icon), name_style)];
        spans.push(Span::styled(name, name_style));

        if let Some(message) = node.error() {
            spans.push(Span::styled(
                format!("  {}", message),
                self.palette.muted,
            ));
        }

        let mut line = Line::from(spans);
        if is_cursor {
            line = if self.tree.is_focused() {
                line.style(self.palette.cursor)
            } else {
                line.style(Style::default().add_modifier(Modifier::UNDERLINED))
            };
        }
        line
    }
}

impl Widget for TreeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        let visible_height = inner.height as usize;
        let total = self.tree.visible_len();
        let scroll_offset = calculate_scroll_offset(self.tree.cursor(), visible_height, total);

        for (i, node) in self
            .tree
            .visible_nodes()
            .skip(scroll_offset)
            .take(visible_height)
            .enumerate()
        {
            let is_cursor = scroll_offset + i == self.tree.cursor();
            let row = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
            Paragraph::new(self.row_line(node, is_cursor)).render(row, buf);
        }
    }
}

/// First row to draw so the cursor stays visible with a little context.
pub fn calculate_scroll_offset(selected: usize, visible_height: usize, total: usize) -> usize {
    if total <= visible_height {
        return 0;
    }

    let padding = 3.min(visible_height / 4);

    if selected < padding {
        0
    } else if selected >= total - padding {
        total.saturating_sub(visible_height)
    } else {
        selected.saturating_sub(padding)
    }
}
