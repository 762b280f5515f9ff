//! Engine types
//!
//! Result types for the listing fetcher.

use crate::error::{Error, Result};
use crate::types::Record;

/// Statistics from one listing fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// HTTP requests issued, including a failed one
    pub requests: usize,
    /// Pages successfully decoded
    pub pages_fetched: usize,
    /// Records accumulated
    pub records_fetched: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl FetchStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a request
    pub fn add_request(&mut self) {
        self.requests += 1;
    }

    /// Count a decoded page
    pub fn add_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.records_fetched += records;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Every record of one logical query, in fetch (= server sort) order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Concatenated records of all pages
    pub records: Vec<Record>,
    /// How the listing was obtained
    pub stats: FetchStats,
}

impl Listing {
    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records were returned
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Outcome of a paginated fetch
///
/// A failure on any page ends the loop. Records decoded before the failure
/// are kept (`Partial`); if the first page fails there is nothing to keep
/// (`Failed`).
#[derive(Debug)]
pub enum FetchOutcome {
    /// The terminal page was reached
    Complete(Listing),
    /// Some pages were fetched, then a request or decode failed
    Partial {
        /// Records fetched before the failure
        listing: Listing,
        /// Why pagination stopped
        cause: Error,
    },
    /// The first page failed
    Failed {
        /// Why pagination stopped
        cause: Error,
        /// Requests made (normally one)
        stats: FetchStats,
    },
}

impl FetchOutcome {
    /// Whether all pages were fetched
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Whether some but not all pages were fetched
    pub fn is_partial(&self) -> bool {
        matches!(self, Self::Partial { .. })
    }

    /// Whether nothing was fetched
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Records fetched, possibly none
    pub fn records(&self) -> &[Record] {
        match self {
            Self::Complete(listing) | Self::Partial { listing, .. } => &listing.records,
            Self::Failed { .. } => &[],
        }
    }

    /// Why pagination stopped early, if it did
    pub fn cause(&self) -> Option<&Error> {
        match self {
            Self::Complete(_) => None,
            Self::Partial { cause, .. } | Self::Failed { cause, .. } => Some(cause),
        }
    }

    /// Fetch statistics
    pub fn stats(&self) -> &FetchStats {
        match self {
            Self::Complete(listing) | Self::Partial { listing, .. } => &listing.stats,
            Self::Failed { stats, .. } => stats,
        }
    }

    /// Split into the records fetched and the failure, if any
    pub fn into_parts(self) -> (Vec<Record>, Option<Error>) {
        match self {
            Self::Complete(listing) => (listing.records, None),
            Self::Partial { listing, cause } => (listing.records, Some(cause)),
            Self::Failed { cause, .. } => (Vec::new(), Some(cause)),
        }
    }

    /// Records fetched, dropping the failure
    pub fn into_records(self) -> Vec<Record> {
        self.into_parts().0
    }

    /// Strict view: only a complete listing is `Ok`
    pub fn into_result(self) -> Result<Listing> {
        match self {
            Self::Complete(listing) => Ok(listing),
            Self::Partial { cause, .. } | Self::Failed { cause, .. } => Err(cause),
        }
    }
}
