//! UI rendering for the TUI.

use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::{App, Focus, Mode};
use super::widgets::tree::TreeView;

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Body
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);
    render_body(app, frame, chunks[1]);
    render_footer(app, frame, chunks[2]);

    // Render overlays based on mode
    match app.mode {
        Mode::Chdir => render_chdir_overlay(app, frame),
        Mode::Help => render_help_overlay(app, frame),
        Mode::Normal => {}
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Marknav ")
        .borders(Borders::ALL)
        .border_style(app.palette.accent);

    let paragraph = Paragraph::new(format!(" {}", app.pane.root().display()))
        .block(block)
        .style(app.palette.text);

    frame.render_widget(paragraph, area);
}

fn render_body(app: &App, frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_pane(app, frame, columns[0]);
    render_location(app, frame, columns[1]);
}

fn focus_border(app: &App, focused: bool) -> Style {
    if focused {
        app.palette.focused_border
    } else {
        app.palette.border
    }
}

fn render_pane(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", app.pane.title()))
        .borders(Borders::ALL)
        .border_style(focus_border(app, app.focus == Focus::Navigation));

    let view = TreeView::new(app.pane.tree())
        .block(block)
        .show_icons(app.show_icons)
        .palette(app.palette);

    frame.render_widget(view, area);
}

fn render_location(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Location ")
        .borders(Borders::ALL)
        .border_style(focus_border(app, app.focus == Focus::Viewer));

    let paragraph = match &app.location {
        Some(location) => {
            let kind = if location.is_remote() { "Remote" } else { "Local file" };
            Paragraph::new(vec![
                Line::from(Span::styled(kind, app.palette.muted)),
                Line::from(Span::styled(
                    location.to_string(),
                    app.palette.text.add_modifier(Modifier::BOLD),
                )),
            ])
            .wrap(Wrap { trim: false })
        }
        None => Paragraph::new("Select a Markdown document to view")
            .alignment(Alignment::Center)
            .style(app.palette.muted),
    };

    frame.render_widget(paragraph.block(block), area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.mode {
        Mode::Normal => match app.focus {
            Focus::Navigation => {
                "[↑↓] Move  [←→] Fold  [Enter] Open  [Bksp] Up  [Tab] Focus  [?] Help  [q] Quit"
            }
            Focus::Viewer => "[Tab] Focus tree  [?] Help  [q] Quit",
        },
        Mode::Chdir => "[Enter] Open  [Tab] Expand ~  [Esc] Cancel",
        Mode::Help => "[Esc] Close",
    };

    // Show status message if present, otherwise hints
    let text = app.status_message.as_deref().unwrap_or(hints);

    let paragraph = Paragraph::new(text)
        .style(app.palette.muted)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_chdir_overlay(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Position at bottom, above footer
    let prompt_area = Rect {
        x: 2,
        y: area.height.saturating_sub(6),
        width: area.width.saturating_sub(4).min(70),
        height: 3,
    };

    frame.render_widget(Clear, prompt_area);

    let block = Block::default()
        .title(" Open directory or URL ")
        .borders(Borders::ALL)
        .border_style(app.palette.focused_border);

    let paragraph = Paragraph::new(app.chdir_input.as_str())
        .block(block)
        .style(app.palette.text);

    frame.render_widget(paragraph, prompt_area);

    let cursor_x = prompt_area.x + 1 + app.chdir_input.chars().count() as u16;
    frame.set_cursor_position(Position::new(
        cursor_x.min(prompt_area.right().saturating_sub(2)),
        prompt_area.y + 1,
    ));
}

fn render_help_overlay(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let help_width = 60u16.min(area.width.saturating_sub(8));
    let help_height = 24u16.min(area.height.saturating_sub(4));
    let help_area = Rect {
        x: (area.width.saturating_sub(help_width)) / 2,
        y: (area.height.saturating_sub(help_height)) / 2,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let help_text = r#"
 NAVIGATION
 ─────────────────────────────────
 ↑/k        Move up
 ↓/j        Move down
 →/l        Expand directory
 ←/h        Collapse / Go to parent
 Enter      Open file / Toggle directory
 g/G        Go to top / bottom

 DIRECTORIES
 ─────────────────────────────────
 Bksp/-     Browse parent directory
 .          Browse directory under cursor
 ~          Browse home directory
 c          Type a directory or URL to open
 r          Reload

 VIEW
 ─────────────────────────────────
 Tab        Switch focus
 ?          Toggle this help
 q/Esc      Quit
"#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.palette.accent);

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(app.palette.text);

    frame.render_widget(paragraph, help_area);
}
