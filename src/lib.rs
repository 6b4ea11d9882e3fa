//! Marknav - a terminal navigation pane for picking Markdown documents
//!
//! This crate provides:
//! - A visibility filter that shows directories and Markdown-looking files
//! - A lazily-loaded directory tree widget that can be re-rooted in place
//! - The local files navigation pane, which turns file selections into
//!   navigation requests
//! - A small TUI host and command line around the pane

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod location;
pub mod markdown;
pub mod scanner;
pub mod tui;

// Re-export commonly used types
pub use config::Config;
pub use error::{MarknavError, Result};
pub use location::{Goto, Location};
pub use markdown::maybe_markdown;
