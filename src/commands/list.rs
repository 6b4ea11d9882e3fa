//! List command implementation

use crate::cli::ListArgs;
use crate::config::Config;
use crate::error::Result;
use crate::scanner::{count_files, format_listing, list_tree, EntryFilter, MarkdownFilter, ShowAll};

/// Run the list command
pub fn run(args: ListArgs, config: &Config) -> Result<()> {
    println!("{}", render(&args, config)?);
    Ok(())
}

/// Build the text the list command prints.
pub fn render(args: &ListArgs, config: &Config) -> Result<String> {
    let filter: Box<dyn EntryFilter> = if args.all {
        Box::new(ShowAll)
    } else {
        Box::new(MarkdownFilter::new(config.markdown_extensions()))
    };

    let mut options = config.list_options();
    if let Some(depth) = args.max_depth {
        options = options.with_max_depth(depth);
    }

    tracing::info!(path = %args.path.display(), "Listing directory");

    let listing = list_tree(&args.path, filter.as_ref(), &options)?;
    let files = count_files(&listing);

    let mut output = format_listing(&listing);
    output.push('\n');
    output.push_str(&format!(
        "{} {}",
        files,
        if files == 1 { "document" } else { "documents" }
    ));
    Ok(output)
}
