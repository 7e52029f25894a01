//! Driven port for keyword searches against the external marketplace.
//!
//! The domain owns the request shape (`SearchQuery`) and the item contract
//! so the request pipeline stays adapter-agnostic. Adapters report what went
//! wrong; the policy for each failure lives in the domain service.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Item, SearchQuery};

/// Errors surfaced while calling the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketplaceSearchError {
    /// No usable response was obtained (I/O failure, timeout, non-2xx status).
    #[error("marketplace transport failed: {message}")]
    Transport {
        /// Transport diagnostic.
        message: String,
    },
    /// The marketplace answered but reported that the call failed.
    #[error("marketplace rejected request: {message}")]
    Rejected {
        /// First error message reported by the marketplace.
        message: String,
    },
    /// The response body did not match the expected schema.
    #[error("marketplace response decode failed: {message}")]
    Decode {
        /// Decoder diagnostic.
        message: String,
    },
}

impl MarketplaceSearchError {
    /// Convenience constructor for [`MarketplaceSearchError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`MarketplaceSearchError::Rejected`].
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`MarketplaceSearchError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for fetching one page of items matching a keyword search.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketplaceSearch: Send + Sync {
    /// Return up to `query.max_results()` items from the first result page.
    ///
    /// An empty vector means the marketplace found nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use price_search::domain::SearchQuery;
    /// use price_search::domain::ports::{FixtureMarketplaceSearch, MarketplaceSearch};
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let source = FixtureMarketplaceSearch::default();
    /// let query = SearchQuery::new("lego", 10).expect("valid query");
    /// let items = source.find_items(&query).await.expect("fixture never fails");
    /// assert!(items.is_empty());
    /// # });
    /// ```
    async fn find_items(&self, query: &SearchQuery) -> Result<Vec<Item>, MarketplaceSearchError>;
}

/// Fixture implementation returning a fixed item list.
///
/// The list is truncated to the query's `max_results`, mirroring the
/// marketplace's `entriesPerPage` cap.
#[derive(Debug, Clone, Default)]
pub struct FixtureMarketplaceSearch {
    items: Vec<Item>,
}

impl FixtureMarketplaceSearch {
    /// Serve `items` for every query.
    pub fn with_items(items: Vec<Item>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl MarketplaceSearch for FixtureMarketplaceSearch {
    async fn find_items(&self, query: &SearchQuery) -> Result<Vec<Item>, MarketplaceSearchError> {
        let limit = usize::try_from(query.max_results()).unwrap_or(usize::MAX);
        Ok(self.items.iter().take(limit).cloned().collect())
    }
}
