//! Marketplace Finding service outbound adapter.
//!
//! This module provides a thin HTTP implementation of the
//! `MarketplaceSearch` port.

mod dto;
mod http_source;

pub use http_source::{FindingConfig, FindingHttpSource};
