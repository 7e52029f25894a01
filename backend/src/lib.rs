//! Marketplace price search service.
//!
//! `GET /search` runs one keyword search against the marketplace Finding API
//! and reports the average price of the returned listings together with the
//! most expensive one. The crate follows a ports-and-adapters layout:
//! [`domain`] holds validation, aggregation and the port traits,
//! [`outbound`] talks to the marketplace, and [`inbound`] serves HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
