//! Execution engine module
//!
//! The paginated listing fetcher: one GET per page, sequentially, until a
//! short page or a failure.
//!
//! # Overview
//!
//! The engine module provides:
//! - `ListingFetcher` - Runs the pagination loop for a listing query
//! - `FetchOutcome` - Complete, partial or failed result of that loop
//! - `FetchStats` - Request, page and record counts

mod types;

pub use types::{FetchOutcome, FetchStats, Listing};

use crate::decode::RecordDecoder;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{
    ListingQuery, NextPage, OffsetPaginator, PageSize, PaginationState, Paginator,
    SinglePagePaginator, OUTPUT_PARAM,
};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Fetches listing endpoints page by page
#[derive(Debug)]
pub struct ListingFetcher {
    /// HTTP client
    client: HttpClient,
}

impl ListingFetcher {
    /// Create a new fetcher
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Get the HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Fetch every page of `query`, `page_size` records at a time
    pub async fn fetch_all(
        &self,
        query: &ListingQuery,
        page_size: PageSize,
        decoder: &dyn RecordDecoder,
    ) -> Result<FetchOutcome> {
        self.fetch_with(query, &OffsetPaginator::new(page_size), decoder)
            .await
    }

    /// Fetch only the first page of `query`
    pub async fn fetch_one(
        &self,
        query: &ListingQuery,
        page_size: PageSize,
        decoder: &dyn RecordDecoder,
    ) -> Result<FetchOutcome> {
        self.fetch_with(query, &SinglePagePaginator::new(page_size), decoder)
            .await
    }

    /// Run the pagination loop with an explicit strategy.
    ///
    /// Returns `Err` only for an invalid query, before any request is made.
    /// Transport, status and decode failures end the loop and are reported
    /// inside the [`FetchOutcome`] together with the records gathered so far.
    pub async fn fetch_with(
        &self,
        query: &ListingQuery,
        paginator: &dyn Paginator,
        decoder: &dyn RecordDecoder,
    ) -> Result<FetchOutcome> {
        query.validate()?;
        if let Some(output) = query.get(OUTPUT_PARAM) {
            if !output.eq_ignore_ascii_case(decoder.format().as_str()) {
                return Err(Error::InvalidConfigValue {
                    field: OUTPUT_PARAM.to_string(),
                    message: format!(
                        "query asks for '{output}' but the decoder reads '{}'",
                        decoder.format()
                    ),
                });
            }
        }

        let start = Instant::now();
        let endpoint = query.endpoint();
        let mut stats = FetchStats::new();
        let mut records = Vec::new();
        let mut state = PaginationState::new();
        let mut page_params = paginator.initial_params(&state);

        loop {
            let mut req_config = RequestConfig::new();
            for (key, value) in query.params() {
                req_config = req_config.query(key, value);
            }
            if query.get(OUTPUT_PARAM).is_none() {
                req_config = req_config.query(OUTPUT_PARAM, decoder.format().as_str());
            }
            for (key, value) in &page_params {
                req_config = req_config.query(key, value);
            }

            stats.add_request();
            let offset = state.offset;

            let page = match self.client.get_text(endpoint, req_config).await {
                Ok(body) => decoder.decode(&body),
                Err(e) => Err(e),
            };

            let page = match page {
                Ok(page) => page,
                Err(cause) => {
                    log_failure(endpoint, offset, &cause);
                    stats.set_duration(elapsed_ms(start));
                    return Ok(if stats.pages_fetched == 0 {
                        FetchOutcome::Failed { cause, stats }
                    } else {
                        FetchOutcome::Partial {
                            listing: Listing { records, stats },
                            cause,
                        }
                    });
                }
            };

            let record_count = page.len();
            stats.add_page(record_count);
            debug!("Fetched {record_count} records from {endpoint} (offset: {offset})");
            records.extend(page.into_records());

            match paginator.process_page(record_count, &mut state) {
                NextPage::Continue { query_params } => page_params = query_params,
                NextPage::Done => break,
            }
        }

        stats.set_duration(elapsed_ms(start));
        info!(
            "Fetched {} records from {endpoint} in {} requests",
            records.len(),
            stats.requests
        );

        Ok(FetchOutcome::Complete(Listing { records, stats }))
    }
}

fn log_failure(endpoint: &str, offset: u64, cause: &Error) {
    match cause {
        Error::HttpStatus { status, body } => {
            warn!("HTTP error {status} fetching {endpoint} at offset {offset}: {body}");
        }
        e if e.is_transport() => {
            warn!("Request error fetching {endpoint} at offset {offset}: {e}");
        }
        e => {
            error!("Unexpected error fetching {endpoint} at offset {offset}: {e}");
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
