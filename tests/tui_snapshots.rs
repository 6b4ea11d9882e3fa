//! Snapshot tests for TUI rendering.
//!
//! These tests render the UI to a test buffer and compare against saved snapshots.
//! Any visual change requires explicit approval with `cargo insta review`.
//!
//! The pane is rooted at a directory that doesn't exist so the output
//! doesn't depend on the machine running the tests.

use insta::assert_snapshot;
use marknav::location::Goto;
use marknav::tui::ui::render;
use marknav::tui::widgets::{LocalFiles, TreeView};
use marknav::tui::App;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::path::PathBuf;

const MISSING_ROOT: &str = "/nonexistent/marknav-docs";

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut output = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            output.push_str(buffer[(x, y)].symbol());
        }
        output.push('\n');
    }
    output
}

/// Render the app to a string for snapshot comparison.
fn render_to_string(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal.draw(|frame| render(app, frame)).unwrap();

    buffer_to_string(terminal.backend().buffer())
}

#[test]
fn test_missing_root() {
    let app = App::new(LocalFiles::with_root(MISSING_ROOT));
    let output = render_to_string(&app, 80, 24);
    assert_snapshot!(output);
}

#[test]
fn test_picked_location() {
    let mut app = App::new(LocalFiles::with_root(MISSING_ROOT));
    app.go_to(Goto::new(PathBuf::from("/docs/readme.md")));
    let output = render_to_string(&app, 80, 24);
    assert_snapshot!(output);
}

#[test]
fn test_tree_view_error_root() {
    let pane = LocalFiles::with_root(MISSING_ROOT);
    let backend = TestBackend::new(40, 4);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal
        .draw(|frame| frame.render_widget(TreeView::new(pane.tree()), frame.area()))
        .unwrap();

    let output = buffer_to_string(terminal.backend().buffer());
    assert_snapshot!(output);
}
