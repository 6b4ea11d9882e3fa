//! Browse command implementation

use crate::cli::BrowseArgs;
use crate::config::{ColorScheme, Config};
use crate::error::{MarknavError, Result};
use crate::location::Location;
use crate::tui::theme::Palette;
use crate::tui::widgets::LocalFiles;
use crate::tui::{self, App};

/// Run the browse command. Returns the picked location, if any.
pub fn run(args: BrowseArgs, config: &Config) -> Result<Option<Location>> {
    let app = build_app(&args, config)?;
    tracing::info!(root = %app.pane.root().display(), pick = args.pick, "Starting browser");
    tui::run(app)
}

/// Set up the application the way the command line asked for.
pub fn build_app(args: &BrowseArgs, config: &Config) -> Result<App> {
    if let Some(path) = &args.path {
        if !path.is_dir() {
            return Err(MarknavError::NotADirectory(path.clone()));
        }
    }

    let pane = LocalFiles::from_config(config, args.path.clone());
    let mut app = App::new(pane);
    app.exit_on_goto = args.pick;
    app.show_icons = config.tui.show_icons;
    let scheme = if args.no_color {
        ColorScheme::None
    } else {
        config.tui.color_scheme
    };
    app.palette = Palette::for_scheme(scheme);
    Ok(app)
}
