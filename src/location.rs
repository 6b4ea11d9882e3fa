//! Locations the viewer can be asked to display.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use url::Url;

use crate::error::MarknavError;

/// Something the viewer can go to: a file on disk or a remote resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A path on the local filesystem.
    Local(PathBuf),
    /// A remote resource, e.g. a raw Markdown file served over HTTP.
    Remote(Url),
}

impl Location {
    /// The local path, if this is a local location.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Location::Local(path) => Some(path),
            Location::Remote(_) => None,
        }
    }

    /// The URL, if this is a remote location.
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Location::Local(_) => None,
            Location::Remote(url) => Some(url),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Remote(_))
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Location::Local(path)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Location::Local(path.to_path_buf())
    }
}

impl From<Url> for Location {
    fn from(url: Url) -> Self {
        Location::Remote(url)
    }
}

impl FromStr for Location {
    type Err = MarknavError;

    /// `http://` and `https://` strings become remote locations, everything
    /// else is taken as a local path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MarknavError::InvalidLocation("empty location".to_string()));
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(trimmed)
                .map_err(|e| MarknavError::InvalidLocation(format!("{}: {}", trimmed, e)))?;
            return Ok(Location::Remote(url));
        }

        Ok(Location::Local(PathBuf::from(trimmed)))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Local(path) => write!(f, "{}", path.display()),
            Location::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Request that the viewer goes to a given location.
///
/// Carries exactly one location and is consumed once by whoever handles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goto {
    location: Location,
}

impl Goto {
    pub fn new(location: impl Into<Location>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// The location to go to.
    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn into_location(self) -> Location {
        self.location
    }
}
