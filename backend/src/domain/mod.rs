//! Domain primitives and the price search use-case.
//!
//! Purpose: hold the transport-agnostic request pipeline. Inbound adapters
//! build a [`SearchQuery`], call the [`ports::PriceSummaryQuery`] port, and
//! render either a [`PriceSummary`] or a [`SearchError`]. Outbound adapters
//! implement [`ports::MarketplaceSearch`].
//!
//! Public surface:
//! - `SearchQuery` — validated keyword search with a bounded item count.
//! - `Item`, `Price`, `Category` — marketplace listing records.
//! - `PriceSummary` — average price and highest-priced item.
//! - `PriceSummaryService` — use-case implementation over the marketplace port.
//! - `SearchError`, `ErrorCode` — failure taxonomy.
//! - `TraceId` — request correlation identifier.

pub mod error;
pub mod item;
pub mod ports;
pub mod price_summary;
pub mod price_summary_service;
pub mod search_query;
pub mod trace_id;

pub use self::error::{ErrorCode, SearchError};
pub use self::item::{Category, Item, Price};
pub use self::price_summary::{AggregationError, PriceSummary};
pub use self::price_summary_service::{PriceSummaryService, UpstreamFailurePolicy};
pub use self::search_query::{MAX_RESULTS, MIN_RESULTS, SearchQuery};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
