//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! the domain's driving port and can be tested with doubles.

use std::sync::Arc;

use crate::domain::ports::PriceSummaryQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Price search use-case.
    pub price_summary: Arc<dyn PriceSummaryQuery>,
}

impl HttpState {
    /// Construct state around a use-case implementation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use price_search::domain::PriceSummaryService;
    /// use price_search::domain::ports::FixtureMarketplaceSearch;
    /// use price_search::inbound::http::state::HttpState;
    ///
    /// let service = PriceSummaryService::new(Arc::new(FixtureMarketplaceSearch::default()));
    /// let state = HttpState::new(Arc::new(service));
    /// let _port = state.price_summary.clone();
    /// ```
    pub fn new(price_summary: Arc<dyn PriceSummaryQuery>) -> Self {
        Self { price_summary }
    }
}
