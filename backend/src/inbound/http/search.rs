//! Price search endpoint.
//!
//! ```text
//! GET /search?searchString={keywords}&numItems={1..=100}
//! ```
//!
//! Both the success and the failure payload are served with status 200.

use actix_web::{HttpRequest, HttpResponse, get, web};
use rust_decimal::Decimal;
use serde::Serialize;
use url::form_urlencoded;
use utoipa::{IntoParams, ToSchema};

use crate::domain::search_query::{NUM_ITEMS_PARAM, SEARCH_STRING_PARAM};
use crate::domain::{Item, Price, PriceSummary, SearchQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;

/// Raw query parameters. Validation happens in [`SearchQuery::from_raw`].
#[derive(Debug, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct SearchParams {
    /// Keywords to search for.
    #[param(example = "harry potter")]
    pub search_string: Option<String>,
    /// Number of items to aggregate, between 1 and 100.
    #[param(value_type = Option<u32>, example = 20)]
    pub num_items: Option<String>,
}

impl SearchParams {
    /// Collect the known parameters from a raw query string.
    ///
    /// A repeated key keeps its first value and unknown keys are ignored, so
    /// no query string is ever rejected here.
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                SEARCH_STRING_PARAM => &mut params.search_string,
                NUM_ITEMS_PARAM => &mut params.num_items,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

/// Monetary amount rendered as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceBody {
    /// Decimal amount.
    #[schema(value_type = String, example = "20.00")]
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[schema(example = "USD")]
    pub currency_id: String,
}

impl From<Price> for PriceBody {
    fn from(price: Price) -> Self {
        Self {
            amount: price.amount(),
            currency_id: price.currency_id().to_owned(),
        }
    }
}

/// Flattened listing returned for the most expensive item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    /// Marketplace listing identifier.
    #[schema(example = "110554872319")]
    pub item_id: String,
    /// Listing title.
    pub title: String,
    /// Primary category identifier.
    pub primary_category_id: String,
    /// Primary category name.
    pub primary_category_name: String,
    /// Converted current price.
    pub price: PriceBody,
}

impl From<Item> for ItemBody {
    fn from(item: Item) -> Self {
        Self {
            item_id: item.item_id,
            title: item.title,
            primary_category_id: item.primary_category.id,
            primary_category_name: item.primary_category.name,
            price: PriceBody::from(item.price),
        }
    }
}

/// Successful search payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummaryResponse {
    /// Mean price of the returned items, two fraction digits.
    pub average_price: PriceBody,
    /// First item carrying the highest price.
    pub item_with_highest_price: ItemBody,
}

impl From<PriceSummary> for PriceSummaryResponse {
    fn from(summary: PriceSummary) -> Self {
        Self {
            average_price: PriceBody::from(summary.average_price),
            item_with_highest_price: ItemBody::from(summary.highest_priced_item),
        }
    }
}

/// Body of every `/search` response: exactly one of the two shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum SearchResponse {
    /// Aggregated prices.
    Summary(PriceSummaryResponse),
    /// Validation, empty-result, or upstream failure.
    Failure(ErrorResponse),
}

/// Search the marketplace and summarise prices.
#[utoipa::path(
    get,
    path = "/search",
    description = "Average price and most expensive item for a keyword search. Failures are reported in the body, never through the status code.",
    params(SearchParams),
    responses(
        (status = 200, description = "Price summary or error payload", body = SearchResponse)
    ),
    tags = ["search"],
    operation_id = "searchPrices"
)]
#[get("/search")]
pub async fn search(state: web::Data<HttpState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let SearchParams {
        search_string,
        num_items,
    } = SearchParams::from_query_string(req.query_string());
    let query = SearchQuery::from_raw(search_string.as_deref(), num_items.as_deref())?;
    let summary = state.price_summary.summarise(&query).await?;
    Ok(HttpResponse::Ok().json(SearchResponse::Summary(PriceSummaryResponse::from(summary))))
}
