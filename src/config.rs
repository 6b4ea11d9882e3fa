use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::markdown::{MarkdownExtensions, DEFAULT_MARKDOWN_EXTENSIONS};
use crate::scanner::ListOptions;

/// Environment variable read for the default browse root.
pub const HOME_ENV: &str = "HOME";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browse: BrowseConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// Starting directory (unset = $HOME, then the current directory)
    pub root: Option<PathBuf>,
    /// File extensions treated as Markdown
    pub markdown_extensions: Vec<String>,
    /// List directories before files
    pub dirs_first: bool,
    /// Treat symlinks to directories as directories
    pub follow_symlinks: bool,
}

/// Which palette the TUI draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Dark or light, guessed from the terminal
    #[default]
    Auto,
    Dark,
    Light,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub color_scheme: ColorScheme,
    /// Show expand/collapse markers in the tree
    pub show_icons: bool,
    /// Write logs here while the TUI owns the terminal
    pub log_file: Option<PathBuf>,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            root: None,
            markdown_extensions: DEFAULT_MARKDOWN_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            dirs_first: true,
            follow_symlinks: true,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Auto,
            show_icons: true,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file at the default location yields the defaults; an
    /// explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !explicit && !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ParseError {
                path: path.clone(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/marknav/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("marknav").join("config.toml"))
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.markdown_extensions().as_slice().is_empty() {
            return Err(ConfigError::Invalid(
                "browse.markdown_extensions must contain at least one extension".into(),
            ));
        }
        if let Some(ext) = self
            .browse
            .markdown_extensions
            .iter()
            .find(|ext| ext.contains('/') || ext.contains(char::is_whitespace))
        {
            return Err(ConfigError::Invalid(format!(
                "invalid markdown extension '{}'",
                ext
            )));
        }
        Ok(())
    }

    pub fn markdown_extensions(&self) -> MarkdownExtensions {
        MarkdownExtensions::new(&self.browse.markdown_extensions)
    }

    pub fn list_options(&self) -> ListOptions {
        ListOptions::new()
            .with_dirs_first(self.browse.dirs_first)
            .with_follow_symlinks(self.browse.follow_symlinks)
    }

    /// The directory to start browsing in.
    ///
    /// The configured root wins, then `$HOME`, then the current directory.
    pub fn browse_root(&self) -> PathBuf {
        self.browse.root.clone().unwrap_or_else(default_root)
    }
}

/// The user's home directory if `$HOME` is set and non-empty, else `.`.
pub fn default_root() -> PathBuf {
    root_from_home(std::env::var_os(HOME_ENV))
}

fn root_from_home(home: Option<std::ffi::OsString>) -> PathBuf {
    match home {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => PathBuf::from("."),
    }
}
