use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Marknav - browse the filesystem and pick a Markdown document
#[derive(Parser, Debug)]
#[command(name = "marknav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH", env = "MARKNAV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse for a Markdown document interactively
    Browse(BrowseArgs),

    /// Print the Markdown-filtered directory tree
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Starting directory (default: $HOME, then the current directory)
    pub path: Option<PathBuf>,

    /// Exit after the first file is picked and print its location
    #[arg(short, long)]
    pub pick: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directory to list
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Maximum depth to descend
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Show every non-hidden file, not just Markdown
    #[arg(short, long)]
    pub all: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Validates the CLI definition is correct
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_browse_command() {
        let cli = Cli::parse_from(["marknav", "browse", "/docs", "--pick"]);
        match cli.command {
            Command::Browse(args) => {
                assert_eq!(args.path, Some(PathBuf::from("/docs")));
                assert!(args.pick);
                assert!(!args.no_color);
            }
            _ => panic!("Expected Browse command"),
        }
    }

    #[test]
    fn parse_browse_without_path() {
        let cli = Cli::parse_from(["marknav", "browse"]);
        match cli.command {
            Command::Browse(args) => assert!(args.path.is_none()),
            _ => panic!("Expected Browse command"),
        }
    }

    #[test]
    fn parse_list_with_options() {
        let cli = Cli::parse_from(["marknav", "list", "--max-depth", "2", "--all", "/notes"]);
        match cli.command {
            Command::List(args) => {
                assert_eq!(args.path, PathBuf::from("/notes"));
                assert_eq!(args.max_depth, Some(2));
                assert!(args.all);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn global_verbose_flag() {
        let cli = Cli::parse_from(["marknav", "-vvv", "list"]);
        assert_eq!(cli.verbose, 3);
    }
}
