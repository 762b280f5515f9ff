//! Forum API module
//!
//! Typed entry points for the forum's listing endpoints. Every listing,
//! categories included, goes through the same paginated fetcher.

mod client;
mod types;

pub use client::ForumClient;
pub use types::{
    Category, CategoryQuery, PostQuery, TextFormat, CATEGORY_FIELDS, POST_DETAIL_FIELDS,
    POST_TEXT_FIELDS,
};
