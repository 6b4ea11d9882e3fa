//! Integration tests for the TUI module.
//!
//! These tests drive the app with simulated key input, verifying behavior
//! without requiring an actual terminal.

use std::fs;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use marknav::location::Location;
use marknav::tui::app::{Focus, Mode};
use marknav::tui::event::handle_key_event;
use marknav::tui::widgets::LocalFiles;
use marknav::tui::App;
use tempfile::tempdir;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

/// root/
///   guides/intro.md
///   notes.md
///   todo.txt
///   .drafts/secret.md
fn sample_tree(root: &Path) {
    fs::create_dir(root.join("guides")).unwrap();
    fs::write(root.join("guides/intro.md"), "# Intro").unwrap();
    fs::write(root.join("notes.md"), "# Notes").unwrap();
    fs::write(root.join("todo.txt"), "milk").unwrap();
    fs::create_dir(root.join(".drafts")).unwrap();
    fs::write(root.join(".drafts/secret.md"), "shh").unwrap();
}

fn visible_names(app: &App) -> Vec<String> {
    app.pane
        .tree()
        .visible_nodes()
        .skip(1)
        .map(|node| node.entry.name.clone())
        .collect()
}

#[test]
fn test_only_markdown_and_directories_visible() {
    let temp = tempdir().unwrap();
    sample_tree(temp.path());

    let app = App::new(LocalFiles::with_root(temp.path()));

    assert_eq!(visible_names(&app), vec!["guides", "notes.md"]);
}

#[test]
fn test_navigation_keys() {
    let temp = tempdir().unwrap();
    sample_tree(temp.path());
    let mut app = App::new(LocalFiles::with_root(temp.path()));

    assert_eq!(app.pane.tree().cursor(), 0);

    handle_key_event(&mut app, key(KeyCode::Down));
    assert_eq!(app.pane.tree().cursor(), 1);

    handle_key_event(&mut app, key_char('G'));
    assert_eq!(app.pane.tree().cursor(), 2);

    // Clamped at the bottom
    handle_key_event(&mut app, key_char('j'));
    assert_eq!(app.pane.tree().cursor(), 2);

    handle_key_event(&mut app, key_char('g'));
    assert_eq!(app.pane.tree().cursor(), 0);
}

#[test]
fn test_expand_and_collapse_directory() {
    let temp = tempdir().unwrap();
    sample_tree(temp.path());
    let mut app = App::new(LocalFiles::with_root(temp.path()));

    handle_key_event(&mut app, key(KeyCode::Down));
    handle_key_event(&mut app, key(KeyCode::Right));
    assert_eq!(visible_names(&app), vec!["guides", "intro.md", "notes.md"]);

    handle_key_event(&mut app, key(KeyCode::Left));
    assert_eq!(visible_names(&app), vec!["guides", "notes.md"]);
}

#[test]
fn test_enter_on_directory_does_not_navigate() {
    let temp = tempdir().unwrap();
    sample_tree(temp.path());
    let mut app = App::new(LocalFiles::with_root(temp.path()));

    handle_key_event(&mut app, key(KeyCode::Down));
    handle_key_event(&mut app, key(KeyCode::Enter));

    assert!(app.location.is_none());
    assert!(app.pane.tree().cursor_node().unwrap().is_expanded());
}

#[test]
fn test_selecting_file_requests_navigation() {
    let temp = tempdir().unwrap();
    sample_tree(temp.path());
    let mut app = App::new(LocalFiles::with_root(temp.path()));

    handle_key_event(&mut app, key(KeyCode::Down));
    handle_key_event(&mut app, key(KeyCode::Down));
    handle_key_event(&mut app, key(KeyCode::Enter));

    assert_eq!(
        app.location,
        Some(Location::Local(temp.path().join("notes.md")))
    );
    assert!(!app.should_quit);
}

#[test]
fn test_pick_mode_quits_after_selection() {
    let temp = tempdir().unwrap();
    sample_tree(temp.path());
    let mut app = App::new(LocalFiles::with_root(temp.path()));
    app.exit_on_goto = true;

    handle_key_event(&mut app, key_char('G'));
    handle_key_event(&mut app, key(KeyCode::Enter));

    assert!(app.should_quit);
    assert_eq!(
        app.location,
        Some(Location::Local(temp.path().join("notes.md")))
    );
}

#[test]
fn test_chdir_prompt_reroots_tree() {
    let temp = tempdir().unwrap();
    sample_tree(temp.path());
    let mut app = App::new(LocalFiles::with_root(temp.path()));
    let old_tree = app.pane.tree().id();

    handle_key_event(&mut app, key_char('c'));
    assert_eq!(app.mode, Mode::Chdir);
    assert_eq!(app.chdir_input, temp.path().display().to_string());

    for c in "/guides".chars() {
        handle_key_event(&mut app, key_char(c));
    }
    handle_key_event(&mut app, key(KeyCode::Enter));

    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.pane.root(), temp.path().join("guides"));
    assert_ne!(app.pane.tree().id(), old_tree);
    assert_eq!(visible_names(&app), vec!["intro.md"]);
    // Focus moves to the new tree
    assert!(app.pane.has_focus());
}

#[test]
fn test_chdir_to_missing_directory_keeps_tree() {
    let temp = tempdir().unwrap();
    sample_tree(temp.path());
    let mut app = App::new(LocalFiles::with_root(temp.path()));
    let old_tree = app.pane.tree().id();

    handle_key_event(&mut app, key_char('c'));
    for c in "/missing".chars() {
        handle_key_event(&mut app, key_char(c));
    }
    handle_key_event(&mut app, key(KeyCode::Enter));

    assert_eq!(app.pane.root(), temp.path());
    assert_eq!(app.pane.tree().id(), old_tree);
    assert!(app.status_message.is_some());
}

#[test]
fn test_chdir_cancel() {
    let temp = tempdir().unwrap();
    let mut app = App::new(LocalFiles::with_root(temp.path()));

    handle_key_event(&mut app, key_char('c'));
    handle_key_event(&mut app, key(KeyCode::Backspace));
    handle_key_event(&mut app, key(KeyCode::Esc));

    assert_eq!(app.mode, Mode::Normal);
    assert!(app.chdir_input.is_empty());
    assert_eq!(app.pane.root(), temp.path());
}

#[test]
fn test_enter_directory_under_cursor_and_back() {
    let temp = tempdir().unwrap();
    sample_tree(temp.path());
    let mut app = App::new(LocalFiles::with_root(temp.path()));

    handle_key_event(&mut app, key(KeyCode::Down));
    handle_key_event(&mut app, key_char('.'));
    assert_eq!(app.pane.root(), temp.path().join("guides"));

    handle_key_event(&mut app, key(KeyCode::Backspace));
    assert_eq!(app.pane.root(), temp.path());
}

#[test]
fn test_reload_picks_up_new_files() {
    let temp = tempdir().unwrap();
    sample_tree(temp.path());
    let mut app = App::new(LocalFiles::with_root(temp.path()));

    fs::write(temp.path().join("added.md"), "").unwrap();
    handle_key_event(&mut app, key_char('r'));

    assert_eq!(visible_names(&app), vec!["guides", "added.md", "notes.md"]);
}

#[test]
fn test_focus_cycles_between_areas() {
    let temp = tempdir().unwrap();
    sample_tree(temp.path());
    let mut app = App::new(LocalFiles::with_root(temp.path()));
    assert!(app.pane.has_focus());

    handle_key_event(&mut app, key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Viewer);
    assert!(!app.pane.has_focus());

    // Tree keys are ignored while the viewer has focus
    handle_key_event(&mut app, key(KeyCode::Down));
    assert_eq!(app.pane.tree().cursor(), 0);

    handle_key_event(&mut app, key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Navigation);
    assert!(app.pane.has_focus());
}

#[test]
fn test_help_mode() {
    let temp = tempdir().unwrap();
    let mut app = App::new(LocalFiles::with_root(temp.path()));

    handle_key_event(&mut app, key_char('?'));
    assert_eq!(app.mode, Mode::Help);

    handle_key_event(&mut app, key(KeyCode::Esc));
    assert_eq!(app.mode, Mode::Normal);
    assert!(!app.should_quit);
}

#[test]
fn test_quit() {
    let temp = tempdir().unwrap();
    let mut app = App::new(LocalFiles::with_root(temp.path()));

    handle_key_event(&mut app, key_char('q'));
    assert!(app.should_quit);
}

#[test]
fn test_dot_named_markdown_file_is_visible() {
    let temp = tempdir().unwrap();
    sample_tree(temp.path());
    fs::write(temp.path().join(".scratch.md"), "").unwrap();
    fs::write(temp.path().join(".env"), "KEY=1").unwrap();

    let app = App::new(LocalFiles::with_root(temp.path()));

    assert_eq!(visible_names(&app), vec!["guides", ".scratch.md", "notes.md"]);
}

#[test]
fn test_prompt_opens_url() {
    let temp = tempdir().unwrap();
    let mut app = App::new(LocalFiles::with_root(temp.path()));
    app.exit_on_goto = true;

    handle_key_event(&mut app, key_char('c'));
    app.chdir_input.clear();
    for c in "https://example.com/guide.md".chars() {
        handle_key_event(&mut app, key_char(c));
    }
    handle_key_event(&mut app, key(KeyCode::Enter));

    assert_eq!(
        app.location.map(|l| l.to_string()),
        Some("https://example.com/guide.md".to_string())
    );
    assert!(app.should_quit);
}
