//! Color palettes for the TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ColorScheme;

/// Terminal background hint set by many terminal emulators, `fg;bg`.
pub const COLORFGBG_ENV: &str = "COLORFGBG";

/// Styles for every part of the UI that is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Header border and overlay borders
    pub accent: Style,
    pub text: Style,
    /// Hints, placeholders and secondary labels
    pub muted: Style,
    pub border: Style,
    pub focused_border: Style,
    pub directory: Style,
    pub error: Style,
    /// The cursor row while the tree has focus
    pub cursor: Style,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            accent: Style::default().fg(Color::Cyan),
            text: Style::default().fg(Color::White),
            muted: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            focused_border: Style::default().fg(Color::Yellow),
            directory: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),
            cursor: Style::default().bg(Color::DarkGray),
        }
    }

    pub fn light() -> Self {
        Self {
            accent: Style::default().fg(Color::Blue),
            text: Style::default().fg(Color::Black),
            muted: Style::default().fg(Color::Gray),
            border: Style::default().fg(Color::DarkGray),
            focused_border: Style::default().fg(Color::Magenta),
            directory: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),
            cursor: Style::default().bg(Color::Gray),
        }
    }

    /// No colors at all; the cursor row is shown reversed.
    pub fn plain() -> Self {
        Self {
            accent: Style::default(),
            text: Style::default(),
            muted: Style::default(),
            border: Style::default(),
            focused_border: Style::default(),
            directory: Style::default(),
            error: Style::default(),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// The palette for a configured scheme. `Auto` looks at `$COLORFGBG`.
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        let scheme = match scheme {
            ColorScheme::Auto => {
                detect_scheme(std::env::var(COLORFGBG_ENV).ok().as_deref())
            }
            other => other,
        };
        match scheme {
            ColorScheme::Light => Self::light(),
            ColorScheme::None => Self::plain(),
            ColorScheme::Dark | ColorScheme::Auto => Self::dark(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

/// Pick dark or light from a `COLORFGBG` value such as `15;0`.
///
/// The last field is the background's ANSI color index; white and light
/// gray backgrounds (7 and 9 to 15) mean a light terminal. Anything
/// unparseable falls back to dark.
pub fn detect_scheme(colorfgbg: Option<&str>) -> ColorScheme {
    let background = colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        Some(7) | Some(9..=15) => ColorScheme::Light,
        _ => ColorScheme::Dark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_scheme() {
        assert_eq!(detect_scheme(Some("15;0")), ColorScheme::Dark);
        assert_eq!(detect_scheme(Some("0;15")), ColorScheme::Light);
        assert_eq!(detect_scheme(Some("0;default;7")), ColorScheme::Light);
        assert_eq!(detect_scheme(Some("garbage")), ColorScheme::Dark);
        assert_eq!(detect_scheme(None), ColorScheme::Dark);
    }

    #[test]
    fn test_schemes_differ() {
        assert_ne!(Palette::dark(), Palette::light());
        assert_ne!(
            Palette::for_scheme(ColorScheme::Dark),
            Palette::for_scheme(ColorScheme::Light)
        );
        assert_eq!(Palette::for_scheme(ColorScheme::None), Palette::plain());
    }

    #[test]
    fn test_plain_has_no_colors() {
        let plain = Palette::plain();
        assert_eq!(plain.text, Style::default());
        assert_eq!(plain.directory.fg, None);
        assert!(plain.cursor.add_modifier.contains(Modifier::REVERSED));
    }
}
