//! Pagination module
//!
//! Supports: Offset (limit/offset), Single page
//!
//! # Overview
//!
//! Listing endpoints are paged with a `limit`/`offset` pair. A page that
//! holds fewer records than the requested limit is the last one; there is
//! no total-count or next-cursor field to consult. When the dataset size is
//! an exact multiple of the page size this costs one trailing request that
//! returns zero records.

mod strategies;
mod types;

pub use strategies::{OffsetPaginator, SinglePagePaginator};
pub use types::{
    ListingQuery, NextPage, PageSize, PaginationState, Paginator, LIMIT_PARAM, OFFSET_PARAM,
    OUTPUT_PARAM,
};
