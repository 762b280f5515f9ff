//! Pagination strategy implementations

use super::types::{NextPage, PageSize, PaginationState, Paginator, LIMIT_PARAM, OFFSET_PARAM};

fn limit_offset(limit: PageSize, offset: u64) -> Vec<(String, String)> {
    vec![
        (LIMIT_PARAM.to_string(), limit.to_string()),
        (OFFSET_PARAM.to_string(), offset.to_string()),
    ]
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination: `?limit=1000&offset=2000`
///
/// A page holding fewer records than the limit ends the listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetPaginator {
    /// Number of records per page
    pub page_size: PageSize,
}

impl OffsetPaginator {
    /// Create a new offset paginator
    pub fn new(page_size: PageSize) -> Self {
        Self { page_size }
    }
}

impl Paginator for OffsetPaginator {
    fn initial_params(&self, state: &PaginationState) -> Vec<(String, String)> {
        limit_offset(self.page_size, state.offset)
    }

    fn process_page(&self, records_count: usize, state: &mut PaginationState) -> NextPage {
        state.add_page(records_count);

        if records_count < self.page_size.get() as usize {
            state.mark_done();
            return NextPage::Done;
        }

        state.add_offset(self.page_size.get());
        NextPage::with_params(limit_offset(self.page_size, state.offset))
    }
}

// ============================================================================
// Single Page
// ============================================================================

/// One request at offset 0; for callers that only want the first page
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePagePaginator {
    /// Number of records requested
    pub page_size: PageSize,
}

impl SinglePagePaginator {
    /// Create a new single page paginator
    pub fn new(page_size: PageSize) -> Self {
        Self { page_size }
    }
}

impl Paginator for SinglePagePaginator {
    fn initial_params(&self, state: &PaginationState) -> Vec<(String, String)> {
        limit_offset(self.page_size, state.offset)
    }

    fn process_page(&self, records_count: usize, state: &mut PaginationState) -> NextPage {
        state.add_page(records_count);
        state.mark_done();
        NextPage::Done
    }
}
