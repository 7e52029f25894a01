//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the price search endpoint, the health probes, and
//! the response payload schemas. The document backs Swagger UI in debug
//! builds.

use utoipa::OpenApi;

use crate::inbound::http::ErrorResponse;
use crate::inbound::http::search::{
    ItemBody, PriceBody, PriceSummaryResponse, SearchResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Price search API",
        description = "Average price and most expensive listing for a marketplace keyword search."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::search::search,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(SearchResponse, PriceSummaryResponse, ItemBody, PriceBody, ErrorResponse)),
    tags(
        (name = "search", description = "Marketplace price aggregation"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
