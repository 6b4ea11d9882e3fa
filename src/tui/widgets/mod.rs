//! Widgets hosted by the TUI.

pub mod local_files;
pub mod tree;

pub use local_files::LocalFiles;
pub use tree::{DirectoryTree, TreeEvent, TreeId, TreeView};
