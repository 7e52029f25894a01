//! Domain ports and supporting types for the hexagonal boundary.

mod marketplace_search;
mod price_summary_query;

#[cfg(test)]
pub use marketplace_search::MockMarketplaceSearch;
pub use marketplace_search::{
    FixtureMarketplaceSearch, MarketplaceSearch, MarketplaceSearchError,
};
#[cfg(test)]
pub use price_summary_query::MockPriceSummaryQuery;
pub use price_summary_query::PriceSummaryQuery;
