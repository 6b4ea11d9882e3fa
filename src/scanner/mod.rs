mod entry;
mod filter;
mod formatter;
mod options;
mod walker;

pub use entry::{entry_name, EntryKind, FsEntry};
pub use filter::{filter_entries, EntryFilter, MarkdownFilter, ShowAll};
pub use formatter::{count_files, format_listing};
pub use options::ListOptions;
pub use walker::{list_tree, read_entries, read_visible_entries, sort_entries, TreeListing};
