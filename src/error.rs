//! Fatal crawl failures.

use std::time::Duration;
use thiserror::Error;

/// Errors that abort a whole crawl. Nothing is written when one of these occurs.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The listing cards never rendered within the wait bound.
    #[error("listing page {url} did not render its cards within {}s", .timeout.as_secs())]
    ListingUnavailable { url: String, timeout: Duration },

    /// The crawl finished without a single record.
    #[error("no brawler records were collected")]
    EmptyDataset,
}
