// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # forumbee-export
//!
//! Lists the categories and posts of a Forumbee forum over its REST API and
//! exports them as one CSV file per category.
//!
//! ## Features
//!
//! - **Offset Pagination**: `limit`/`offset` listings fetched to exhaustion
//! - **Two Wire Formats**: CSV tables and JSON objects decode to the same records
//! - **Partial Results**: records fetched before a failure are kept with the cause
//! - **CSV Export**: timestamped, sanitized file names per category
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use forumbee_export::config::ApiConfig;
//! use forumbee_export::forum::{CategoryQuery, ForumClient, PostQuery};
//!
//! #[tokio::main]
//! async fn main() -> forumbee_export::Result<()> {
//!     let config = ApiConfig::new("token", "community.example.com")?;
//!     let client = ForumClient::new(&config)?;
//!
//!     let (categories, _) = client.categories(&CategoryQuery::new()).await?;
//!     for category in categories {
//!         if let Some(key) = category.key {
//!             let posts = client.list_posts(&PostQuery::text(key)).await?;
//!             println!("{} posts", posts.records().len());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       CLI (check/categories/posts/export)       │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ForumClient: list_categories · list_posts · check_connection   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │  Config  │   Auth    │    Fetcher    │  Decode   │   Output    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Host     │ Bearer    │ limit/offset  │ CSV       │ CSV files   │
//! │ Layers   │           │ Partial       │ JSON      │ Console     │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// API token and host configuration
pub mod config;

/// Bearer authentication
pub mod auth;

/// HTTP client
pub mod http;

/// Response decoders (CSV, JSON)
pub mod decode;

/// Offset pagination
pub mod pagination;

/// Paginated listing fetcher
pub mod engine;

/// Forum endpoints
pub mod forum;

/// CSV export and console rendering
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use engine::{FetchOutcome, ListingFetcher};
pub use forum::ForumClient;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
