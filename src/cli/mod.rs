//! CLI module
//!
//! Command-line interface for the forum export.
//!
//! # Commands
//!
//! - `check` - Test connection to the API
//! - `categories` - List categories
//! - `posts` - Print post details per category
//! - `export` - Write one CSV file per category

mod commands;
mod runner;

pub use commands::{Cli, Commands, FormatArg, TextFormatArg};
pub use runner::Runner;
