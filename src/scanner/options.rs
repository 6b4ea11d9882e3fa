/// Configuration options for directory listing operations.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Maximum depth to recurse for whole-tree listings (None = unlimited)
    pub max_depth: Option<usize>,

    /// Put directories before files
    pub dirs_first: bool,

    /// Follow symbolic links when deciding an entry's kind
    pub follow_symlinks: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            dirs_first: true,
            follow_symlinks: true,
        }
    }
}

impl ListOptions {
    /// Create a new ListOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum recursion depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set whether directories are listed before files
    pub fn with_dirs_first(mut self, enabled: bool) -> Self {
        self.dirs_first = enabled;
        self
    }

    /// Set whether to follow symbolic links
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}
