//! Price search use-case.
//!
//! Runs one request through the pipeline: query the marketplace, reject an
//! empty result set, then aggregate. Validation happens before this service
//! is reached (a [`SearchQuery`] is already valid by construction).

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use super::ports::{MarketplaceSearch, MarketplaceSearchError, PriceSummaryQuery};
use super::price_summary::{AggregationError, currencies_are_uniform};
use super::{Item, PriceSummary, SearchError, SearchQuery};

/// What to do when the marketplace cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpstreamFailurePolicy {
    /// Treat the failure as a search with no matches.
    #[default]
    TreatAsEmpty,
    /// Report [`SearchError::UpstreamUnavailable`].
    Surface,
}

/// [`PriceSummaryQuery`] implementation backed by a [`MarketplaceSearch`] port.
#[derive(Clone)]
pub struct PriceSummaryService {
    source: Arc<dyn MarketplaceSearch>,
    upstream_failure: UpstreamFailurePolicy,
}

impl PriceSummaryService {
    /// Create a service using the compatible [`UpstreamFailurePolicy::TreatAsEmpty`].
    pub fn new(source: Arc<dyn MarketplaceSearch>) -> Self {
        Self::with_policy(source, UpstreamFailurePolicy::default())
    }

    /// Create a service with an explicit upstream failure policy.
    pub fn with_policy(
        source: Arc<dyn MarketplaceSearch>,
        upstream_failure: UpstreamFailurePolicy,
    ) -> Self {
        Self {
            source,
            upstream_failure,
        }
    }

    fn recover(&self, failure: MarketplaceSearchError) -> Result<Vec<Item>, SearchError> {
        match (&failure, self.upstream_failure) {
            (MarketplaceSearchError::Transport { .. }, UpstreamFailurePolicy::TreatAsEmpty) => {
                warn!(error = %failure, "marketplace unreachable; treating as no matches");
                Ok(Vec::new())
            }
            (MarketplaceSearchError::Transport { .. }, UpstreamFailurePolicy::Surface) => {
                warn!(error = %failure, "marketplace unreachable");
                Err(SearchError::UpstreamUnavailable)
            }
            (MarketplaceSearchError::Rejected { .. } | MarketplaceSearchError::Decode { .. }, _) => {
                error!(error = %failure, "marketplace response unusable");
                Err(SearchError::MalformedUpstreamResponse)
            }
        }
    }
}

#[async_trait]
impl PriceSummaryQuery for PriceSummaryService {
    async fn summarise(&self, query: &SearchQuery) -> Result<PriceSummary, SearchError> {
        let items = match self.source.find_items(query).await {
            Ok(items) => items,
            Err(failure) => self.recover(failure)?,
        };

        if items.is_empty() {
            return Err(SearchError::EmptyResultSet);
        }
        if !currencies_are_uniform(&items) {
            warn!(
                item_count = items.len(),
                "result set mixes currencies; average uses the last item's currency"
            );
        }

        let summary = PriceSummary::from_items(&items).map_err(|failure| match failure {
            AggregationError::Empty => SearchError::EmptyResultSet,
            AggregationError::Overflow => {
                error!(error = %failure, "price aggregation failed");
                SearchError::MalformedUpstreamResponse
            }
        })?;
        debug!(
            item_count = items.len(),
            average = %summary.average_price.amount(),
            "price summary computed"
        );
        Ok(summary)
    }
}
