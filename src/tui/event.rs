//! Event handling for the TUI.
//!
//! Every event kind is a variant of [`AppEvent`] and has exactly one
//! handler. The [`Router`] drains a queue of events and sends each to its
//! handler; handlers post follow-up events (a key press becomes a tree
//! event, a tree event becomes a pane message) until the queue is empty.

use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::location::Goto;

use super::app::{App, Focus, Mode};
use super::widgets::tree::TreeEvent;

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: isize = 20;

/// Whether a handler consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Stop here, nothing further up sees it.
    Handled,
    /// Keep bubbling to the host.
    Ignored,
}

impl EventResult {
    pub fn is_handled(self) -> bool {
        self == EventResult::Handled
    }
}

/// Messages a navigation pane sends up to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneMessage {
    /// The user wants to view this location now.
    Goto(Goto),
}

/// Everything the application reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Tree(TreeEvent),
    Pane(PaneMessage),
    Resize(u16, u16),
}

impl AppEvent {
    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppEvent::Key(_) => "key",
            AppEvent::Tree(_) => "tree",
            AppEvent::Pane(_) => "pane",
            AppEvent::Resize(..) => "resize",
        }
    }
}

/// What one [`Router::dispatch`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatched {
    /// Events routed, follow-ups included
    pub routed: usize,
    /// Events no handler claimed, which fell through to the application
    pub bubbled: usize,
}

/// Central event router.
#[derive(Debug, Default)]
pub struct Router {
    queue: VecDeque<AppEvent>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next dispatch.
    pub fn post(&mut self, event: AppEvent) {
        self.queue.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Route queued events, including any they produce, until none are left.
    pub fn dispatch(&mut self, app: &mut App) -> Dispatched {
        let mut dispatched = Dispatched::default();
        while let Some(event) = self.queue.pop_front() {
            let kind = event.kind();
            if !self.route(app, event).is_handled() {
                tracing::trace!(event = kind, "Event fell through to the application");
                dispatched.bubbled += 1;
            }
            dispatched.routed += 1;
        }
        dispatched
    }

    fn route(&mut self, app: &mut App, event: AppEvent) -> EventResult {
        match event {
            AppEvent::Key(key) => {
                if let Some(follow_up) = translate_key(app, key) {
                    self.post(follow_up);
                }
                EventResult::Handled
            }
            AppEvent::Tree(tree_event) => {
                let (result, message) = app.pane.handle_tree_event(&tree_event);
                if let Some(message) = message {
                    self.post(AppEvent::Pane(message));
                }
                if !result.is_handled() {
                    app.on_tree_event(&tree_event);
                }
                result
            }
            AppEvent::Pane(PaneMessage::Goto(goto)) => {
                app.go_to(goto);
                EventResult::Handled
            }
            AppEvent::Resize(width, height) => {
                tracing::trace!(width, height, "Terminal resized");
                EventResult::Handled
            }
        }
    }
}

/// Poll for terminal events with a timeout and route them.
///
/// Returns `Ok(true)` if an event was handled, `Ok(false)` if timeout expired.
pub fn handle_events(app: &mut App, router: &mut Router, timeout: Duration) -> std::io::Result<bool> {
    if event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                router.post(AppEvent::Key(key));
            }
            Event::Resize(width, height) => {
                router.post(AppEvent::Resize(width, height));
            }
            _ => return Ok(false),
        }
        router.dispatch(app);
        return Ok(true);
    }
    Ok(false)
}

/// Handle a single key event, routing everything it sets off.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    let mut router = Router::new();
    router.post(AppEvent::Key(key));
    router.dispatch(app);
}

/// Apply a key to the app. Returns a follow-up event when the key produced
/// one (activating a tree row).
fn translate_key(app: &mut App, key: KeyEvent) -> Option<AppEvent> {
    // Global keys (work in any mode)
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }

    match app.mode {
        Mode::Normal => match app.focus {
            Focus::Navigation => handle_navigation_keys(app, key),
            Focus::Viewer => {
                handle_viewer_keys(app, key);
                None
            }
        },
        Mode::Chdir => {
            handle_chdir_mode(app, key);
            None
        }
        Mode::Help => {
            handle_help_mode(app, key);
            None
        }
    }
}

fn handle_navigation_keys(app: &mut App, key: KeyEvent) -> Option<AppEvent> {
    let tree = app.pane.tree_mut();
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => tree.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => tree.move_cursor(1),
        KeyCode::Home | KeyCode::Char('g') => tree.cursor_to_first(),
        KeyCode::End | KeyCode::Char('G') => tree.cursor_to_last(),
        KeyCode::PageUp => tree.move_cursor(-PAGE_SIZE),
        KeyCode::PageDown => tree.move_cursor(PAGE_SIZE),

        // Expand/Collapse
        KeyCode::Right | KeyCode::Char('l') => tree.expand(),
        KeyCode::Left | KeyCode::Char('h') => tree.collapse(),

        // Select
        KeyCode::Enter | KeyCode::Char(' ') => {
            return tree.select().map(AppEvent::Tree);
        }

        // Re-rooting
        KeyCode::Backspace | KeyCode::Char('-') => app.chdir_parent(),
        KeyCode::Char('~') => app.chdir_home(),
        KeyCode::Char('.') => app.chdir_into_cursor(),
        KeyCode::Char('c') => {
            app.mode = Mode::Chdir;
            app.chdir_input = app.pane.root().display().to_string();
        }
        KeyCode::Char('r') => app.reload(),

        // Focus
        KeyCode::Tab | KeyCode::BackTab => app.cycle_focus(),

        // Help
        KeyCode::Char('?') => {
            app.mode = Mode::Help;
        }

        _ => {}
    }
    None
}

fn handle_viewer_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Tab | KeyCode::BackTab => app.cycle_focus(),
        KeyCode::Char('?') => {
            app.mode = Mode::Help;
        }
        _ => {}
    }
}

fn handle_chdir_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            app.chdir_input.clear();
        }
        KeyCode::Enter => {
            app.mode = Mode::Normal;
            app.apply_chdir_input();
        }
        KeyCode::Backspace => {
            app.chdir_input.pop();
        }
        KeyCode::Tab => {
            app.complete_chdir_input();
        }
        KeyCode::Char(c) => {
            app.chdir_input.push(c);
        }
        _ => {}
    }
}

fn handle_help_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use crate::tui::widgets::LocalFiles;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_in(temp: &TempDir) -> App {
        App::new(LocalFiles::with_root(temp.path()))
    }

    #[test]
    fn test_quit_on_q() {
        let temp = tempdir().unwrap();
        let mut app = app_in(&temp);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_on_ctrl_c_in_any_mode() {
        let temp = tempdir().unwrap();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        for mode in [Mode::Normal, Mode::Chdir, Mode::Help] {
            let mut app = app_in(&temp);
            app.mode = mode;
            handle_key_event(&mut app, ctrl_c);
            assert!(app.should_quit, "Ctrl-C ignored in {:?}", mode);
        }
    }

    #[test]
    fn test_enter_on_file_goes_to_it() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("notes.md"), "# Notes").unwrap();
        let mut app = app_in(&temp);

        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Enter));

        assert_eq!(
            app.location,
            Some(Location::Local(temp.path().join("notes.md")))
        );
    }

    #[test]
    fn test_router_counts_follow_up_events() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("notes.md"), "# Notes").unwrap();
        let mut app = app_in(&temp);
        app.pane.tree_mut().move_cursor(1);

        let mut router = Router::new();
        router.post(AppEvent::Key(key(KeyCode::Enter)));
        // key -> tree event -> pane message
        let dispatched = router.dispatch(&mut app);
        assert_eq!(dispatched.routed, 3);
        assert_eq!(dispatched.bubbled, 0);
        assert!(router.is_empty());
    }

    #[test]
    fn test_router_reports_bubbled_tree_events() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        let mut app = app_in(&temp);
        app.pane.tree_mut().move_cursor(1);

        let mut router = Router::new();
        router.post(AppEvent::Key(key(KeyCode::Enter)));
        // key -> directory toggle, which the pane leaves to the application
        assert_eq!(
            router.dispatch(&mut app),
            Dispatched {
                routed: 2,
                bubbled: 1
            }
        );
    }

    #[test]
    fn test_enter_on_directory_does_not_navigate() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        let mut app = app_in(&temp);

        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Enter));

        assert!(app.location.is_none());
        assert!(app.pane.tree().cursor_node().unwrap().is_expanded());
    }

    #[test]
    fn test_chdir_mode_typing() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        let mut app = app_in(&temp);

        handle_key_event(&mut app, key(KeyCode::Char('c')));
        assert_eq!(app.mode, Mode::Chdir);
        assert_eq!(app.chdir_input, temp.path().display().to_string());

        for c in "/sub".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        handle_key_event(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.pane.root(), temp.path().join("sub"));
    }

    #[test]
    fn test_chdir_mode_escape_cancels() {
        let temp = tempdir().unwrap();
        let mut app = app_in(&temp);

        handle_key_event(&mut app, key(KeyCode::Char('c')));
        handle_key_event(&mut app, key(KeyCode::Backspace));
        handle_key_event(&mut app, key(KeyCode::Esc));

        assert_eq!(app.mode, Mode::Normal);
        assert!(app.chdir_input.is_empty());
        assert_eq!(app.pane.root(), temp.path());
    }

    #[test]
    fn test_tab_moves_focus() {
        let temp = tempdir().unwrap();
        let mut app = app_in(&temp);
        assert_eq!(app.focus, Focus::Navigation);
        assert!(app.pane.has_focus());

        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Viewer);
        assert!(!app.pane.has_focus());

        // Tree keys do nothing while the viewer has focus
        handle_key_event(&mut app, key(KeyCode::Down));
        assert_eq!(app.pane.tree().cursor(), 0);

        handle_key_event(&mut app, key(KeyCode::Tab));
        assert!(app.pane.has_focus());
    }

    #[test]
    fn test_help_mode_round_trip() {
        let temp = tempdir().unwrap();
        let mut app = app_in(&temp);

        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.mode, Mode::Help);
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_event_result() {
        assert!(EventResult::Handled.is_handled());
        assert!(!EventResult::Ignored.is_handled());
    }
}
