//! Application state for the TUI.

use std::path::PathBuf;

use crate::config::default_root;
use crate::location::{Goto, Location};

use super::theme::Palette;
use super::widgets::tree::TreeEvent;
use super::widgets::LocalFiles;

/// The current UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation mode.
    Normal,
    /// Typing a directory to re-root the pane at.
    Chdir,
    /// Help overlay mode.
    Help,
}

/// Which area receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The navigation pane.
    Navigation,
    /// The location panel.
    Viewer,
}

/// Main application state for the TUI.
pub struct App {
    /// The local files navigation pane.
    pub pane: LocalFiles,

    /// Current UI mode.
    pub mode: Mode,

    /// Area with keyboard focus.
    pub focus: Focus,

    /// Directory prompt input.
    pub chdir_input: String,

    /// The location the viewer was last asked to go to.
    pub location: Option<Location>,

    /// Quit as soon as a location has been picked.
    pub exit_on_goto: bool,

    /// Draw expand/collapse markers.
    pub show_icons: bool,

    pub palette: Palette,

    /// Application should quit.
    pub should_quit: bool,

    /// Status message to display.
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App around a navigation pane, which gets the focus.
    pub fn new(pane: LocalFiles) -> Self {
        let mut app = Self {
            pane,
            mode: Mode::Normal,
            focus: Focus::Navigation,
            chdir_input: String::new(),
            location: None,
            exit_on_goto: false,
            show_icons: true,
            palette: Palette::default(),
            should_quit: false,
            status_message: None,
        };
        app.set_focus(Focus::Navigation);
        app
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        match focus {
            Focus::Navigation => self.pane.set_focus_within(),
            Focus::Viewer => self.pane.blur(),
        }
    }

    pub fn cycle_focus(&mut self) {
        let next = match self.focus {
            Focus::Navigation => Focus::Viewer,
            Focus::Viewer => Focus::Navigation,
        };
        self.set_focus(next);
    }

    /// React to a navigation request from the pane.
    pub fn go_to(&mut self, goto: Goto) {
        let location = goto.into_location();
        tracing::info!(%location, "Navigation requested");
        self.status_message = Some(format!("Opened {}", location));
        self.location = Some(location);
        if self.exit_on_goto {
            self.should_quit = true;
        }
    }

    /// Tree events the pane left alone.
    pub fn on_tree_event(&mut self, event: &TreeEvent) {
        if let TreeEvent::DirectoryToggled { path, expanded, .. } = event {
            tracing::trace!(path = %path.display(), expanded, "Directory toggled");
            self.status_message = None;
        }
    }

    /// Re-root the pane, reporting the outcome in the status line.
    pub fn chdir(&mut self, path: PathBuf) {
        match self.pane.chdir(path) {
            Ok(()) => {
                self.status_message = Some(format!("Browsing {}", self.pane.root().display()));
                if self.focus == Focus::Navigation {
                    self.pane.set_focus_within();
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Cannot change directory");
                self.status_message = Some(err.to_string());
            }
        }
    }

    pub fn chdir_home(&mut self) {
        self.chdir(default_root());
    }

    pub fn chdir_parent(&mut self) {
        if let Err(err) = self.pane.chdir_parent() {
            tracing::warn!(error = %err, "Cannot change to parent directory");
            self.status_message = Some(err.to_string());
        } else {
            self.status_message = Some(format!("Browsing {}", self.pane.root().display()));
        }
    }

    /// Re-root at the directory under the cursor.
    pub fn chdir_into_cursor(&mut self) {
        let target = self
            .pane
            .tree()
            .cursor_node()
            .filter(|node| node.is_dir() && node.depth > 0)
            .map(|node| node.entry.path.clone());
        if let Some(path) = target {
            self.chdir(path);
        }
    }

    /// Apply whatever is in the prompt. A URL is opened as a remote
    /// document, anything else re-roots the pane.
    pub fn apply_chdir_input(&mut self) {
        let input = std::mem::take(&mut self.chdir_input);
        let input = input.trim();
        if input.is_empty() {
            return;
        }
        match input.parse::<Location>() {
            Ok(Location::Remote(url)) => self.go_to(Goto::new(url)),
            Ok(Location::Local(_)) => self.chdir(expand_home(input)),
            Err(err) => {
                tracing::warn!(error = %err, "Cannot open location");
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Expand a leading `~` in the prompt.
    pub fn complete_chdir_input(&mut self) {
        if self.chdir_input.starts_with('~') {
            self.chdir_input = expand_home(&self.chdir_input).display().to_string();
        }
    }

    pub fn reload(&mut self) {
        self.pane.tree_mut().reload();
        self.status_message = Some("Reloaded".to_string());
    }
}

/// Replace a leading `~` with the home directory.
pub fn expand_home(input: &str) -> PathBuf {
    if input == "~" {
        return default_root();
    }
    match input.strip_prefix("~/") {
        Some(rest) => default_root().join(rest),
        None => PathBuf::from(input),
    }
}
