//! Driving port for the price search use-case.
//!
//! Inbound adapters (HTTP handlers) depend on this trait rather than on the
//! concrete service so they can be exercised with doubles.

use async_trait::async_trait;

use crate::domain::{PriceSummary, SearchError, SearchQuery};

/// Domain use-case port for summarising marketplace prices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSummaryQuery: Send + Sync {
    /// Search the marketplace and aggregate the returned prices.
    async fn summarise(&self, query: &SearchQuery) -> Result<PriceSummary, SearchError>;
}
