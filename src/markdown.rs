//! Heuristics for deciding whether a resource looks like a Markdown document.

use std::path::Path;

/// Extensions treated as Markdown when nothing else is configured.
pub const DEFAULT_MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// The set of file extensions considered to be Markdown.
///
/// Extensions are stored without a leading dot and compared ASCII
/// case-insensitively, so `README.MD` and `notes.Markdown` both match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownExtensions {
    extensions: Vec<String>,
}

impl Default for MarkdownExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_MARKDOWN_EXTENSIONS.iter().copied())
    }
}

impl MarkdownExtensions {
    /// Build an extension set, normalising away leading dots and case.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    /// The normalised extensions.
    pub fn as_slice(&self) -> &[String] {
        &self.extensions
    }

    /// Check a bare extension (no dot).
    pub fn matches_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Does the final component of `path` carry one of our extensions?
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.matches_extension(ext))
    }
}

/// Does `path` look like it could be a Markdown document?
///
/// Uses the default extension set. Only the name is inspected; the file is
/// never opened.
pub fn maybe_markdown(path: &Path) -> bool {
    MarkdownExtensions::default().matches(path)
}
