//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use crate::error::{Error, Result};
use std::fmt;
use tracing::warn;

/// Query parameter carrying the page size
pub const LIMIT_PARAM: &str = "limit";

/// Query parameter carrying the record offset
pub const OFFSET_PARAM: &str = "offset";

/// Query parameter selecting the response format
pub const OUTPUT_PARAM: &str = "output";

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available with these parameters
    Continue {
        /// Query parameters to add/replace
        query_params: Vec<(String, String)>,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with query parameters
    pub fn with_params(params: Vec<(String, String)>) -> Self {
        Self::Continue {
            query_params: params,
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Records requested per call; positive and capped at the server ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageSize(u32);

impl PageSize {
    /// Largest `limit` the API accepts
    pub const MAX: PageSize = PageSize(1000);

    /// Create a page size. Zero is rejected; values above [`PageSize::MAX`]
    /// are clamped to it.
    pub fn new(size: u32) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfigValue {
                field: LIMIT_PARAM.to_string(),
                message: "page size must be positive".to_string(),
            });
        }

        if size > Self::MAX.0 {
            warn!(
                "Page size {size} exceeds the API maximum, using {}",
                Self::MAX.0
            );
            return Ok(Self::MAX);
        }

        Ok(Self(size))
    }

    /// The size as an integer
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::MAX
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One logical listing request: an endpoint and its filters, projection and
/// sort. The pagination parameters belong to the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    endpoint: String,
    params: Vec<(String, String)>,
}

impl ListingQuery {
    /// Create a query for an endpoint path such as `posts`
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: Vec::new(),
        }
    }

    /// Add a query parameter; a repeated key replaces the earlier value
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.params.push((key, value)),
        }
        self
    }

    /// Add a parameter only when a value is given
    #[must_use]
    pub fn param_opt(self, key: impl Into<String>, value: Option<impl fmt::Display>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// The endpoint path
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The caller's parameters, in insertion order
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Value of a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check the query before any request is made
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim_matches('/').trim().is_empty() {
            return Err(Error::InvalidConfigValue {
                field: "endpoint".to_string(),
                message: "endpoint must not be empty".to_string(),
            });
        }

        for reserved in [LIMIT_PARAM, OFFSET_PARAM] {
            if self.get(reserved).is_some() {
                return Err(Error::InvalidConfigValue {
                    field: reserved.to_string(),
                    message: "pagination parameters are set by the fetcher".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Offset of the next request
    pub offset: u64,
    /// Pages decoded so far
    pub pages: usize,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Add offset
    pub fn add_offset(&mut self, amount: u32) {
        self.offset += u64::from(amount);
    }

    /// Record a decoded page
    pub fn add_page(&mut self, records: usize) {
        self.pages += 1;
        self.total_fetched += records as u64;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Query parameters for the first request
    fn initial_params(&self, state: &PaginationState) -> Vec<(String, String)>;

    /// Account for a decoded page and decide whether another call is needed
    fn process_page(&self, records_count: usize, state: &mut PaginationState) -> NextPage;
}
