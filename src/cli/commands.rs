//! CLI commands and argument parsing

use crate::config::{DOMAIN_ENV, TOKEN_ENV};
use crate::decode::DecoderFormat;
use crate::forum::TextFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// List forum categories and posts and export them to CSV
#[derive(Parser, Debug)]
#[command(name = "forumbee-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API token
    #[arg(long, global = true, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// Forum domain (e.g. community.example.com)
    #[arg(long, global = true, env = DOMAIN_ENV)]
    pub domain: Option<String>,

    /// Configuration file (YAML or JSON) with `token` and `domain`
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Test connection to the API
    Check,

    /// List categories
    Categories {
        /// Response format requested from the API
        #[arg(long, default_value = "csv")]
        format: FormatArg,

        /// Fields to request (comma-separated)
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<String>>,
    },

    /// Print post details for every category
    Posts {
        /// Only this category key
        #[arg(long)]
        category: Option<String>,
    },

    /// Export the posts of every category to one CSV file each
    Export {
        /// Directory receiving the CSV files
        #[arg(short, long, default_value = "./outputs")]
        output_dir: PathBuf,

        /// How the server renders post text
        #[arg(long, default_value = "plain-truncate-100")]
        text_format: TextFormatArg,
    },
}

/// Response format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    /// Header row plus delimited rows
    Csv,
    /// Object holding a named array
    Json,
}

impl From<FormatArg> for DecoderFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => DecoderFormat::Csv,
            FormatArg::Json => DecoderFormat::Json,
        }
    }
}

/// Post text rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TextFormatArg {
    /// Plain text cut at 100 characters
    #[value(name = "plain-truncate-100")]
    PlainTruncate100,
    /// Full plain text
    Plain,
    /// HTML
    Html,
}

impl From<TextFormatArg> for TextFormat {
    fn from(arg: TextFormatArg) -> Self {
        match arg {
            TextFormatArg::PlainTruncate100 => TextFormat::PlainTruncate100,
            TextFormatArg::Plain => TextFormat::Plain,
            TextFormatArg::Html => TextFormat::Html,
        }
    }
}
