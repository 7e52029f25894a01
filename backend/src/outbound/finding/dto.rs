//! DTOs for the marketplace Finding service JSON protocol.
//!
//! Requests use namespace marker keys (`jsonns.*`, `tns.*`). Responses wrap
//! every singleton in a one-element array; the decoder tolerates absent
//! arrays and reports which field was missing instead of indexing blindly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ports::MarketplaceSearchError;
use crate::domain::{Category, Item, Price, SearchQuery};

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
const TNS_NAMESPACE: &str = "http://www.ebay.com/marketplace/search/v1/services";

/// Listing types included in every search.
pub(super) const LISTING_TYPES: [&str; 3] = ["AuctionWithBIN", "FixedPrice", "StoreInventory"];
const ACK_FAILURE: &str = "Failure";

#[derive(Debug, Serialize)]
pub(super) struct FindItemsRequestDto<'a> {
    #[serde(rename = "jsonns.xsi")]
    xsi: &'static str,
    #[serde(rename = "jsonns.xs")]
    xs: &'static str,
    #[serde(rename = "jsonns.tns")]
    tns: &'static str,
    #[serde(rename = "tns.findItemsByKeywordsRequest")]
    request: FindItemsByKeywordsDto<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FindItemsByKeywordsDto<'a> {
    keywords: &'a str,
    item_filter: [ItemFilterDto; 1],
    pagination_input: PaginationInputDto,
}

#[derive(Debug, Serialize)]
struct ItemFilterDto {
    name: &'static str,
    value: [&'static str; 3],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaginationInputDto {
    entries_per_page: u32,
    page_number: u32,
}

impl<'a> FindItemsRequestDto<'a> {
    pub(super) fn for_query(query: &'a SearchQuery) -> Self {
        Self {
            xsi: XSI_NAMESPACE,
            xs: XS_NAMESPACE,
            tns: TNS_NAMESPACE,
            request: FindItemsByKeywordsDto {
                keywords: query.search_term(),
                item_filter: [ItemFilterDto {
                    name: "ListingType",
                    value: LISTING_TYPES,
                }],
                pagination_input: PaginationInputDto {
                    entries_per_page: query.max_results(),
                    page_number: 1,
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct FindingResponseDto {
    #[serde(default, rename = "findItemsByKeywordsResponse")]
    response: Vec<FindItemsResponseDto>,
    /// Service-level failures (bad credentials, quota) arrive without the
    /// operation envelope.
    #[serde(default, rename = "errorMessage")]
    error_message: Vec<ErrorMessageDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindItemsResponseDto {
    #[serde(default)]
    ack: Vec<String>,
    #[serde(default)]
    error_message: Vec<ErrorMessageDto>,
    #[serde(default)]
    search_result: Vec<SearchResultDto>,
}

#[derive(Debug, Deserialize)]
struct ErrorMessageDto {
    #[serde(default)]
    error: Vec<UpstreamErrorDto>,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorDto {
    #[serde(default)]
    message: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResultDto {
    #[serde(default)]
    item: Vec<ItemDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemDto {
    #[serde(default)]
    item_id: Vec<String>,
    #[serde(default)]
    title: Vec<String>,
    #[serde(default)]
    primary_category: Vec<CategoryDto>,
    #[serde(default)]
    selling_status: Vec<SellingStatusDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryDto {
    #[serde(default)]
    category_id: Vec<String>,
    #[serde(default)]
    category_name: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SellingStatusDto {
    #[serde(default)]
    converted_current_price: Vec<AmountDto>,
}

#[derive(Debug, Deserialize)]
struct AmountDto {
    #[serde(rename = "@currencyId")]
    currency_id: String,
    #[serde(rename = "__value__")]
    value: String,
}

impl FindingResponseDto {
    pub(super) fn into_domain_items(self) -> Result<Vec<Item>, MarketplaceSearchError> {
        if self.response.is_empty() && has_error(&self.error_message) {
            return Err(MarketplaceSearchError::rejected(first_error_message(
                self.error_message,
            )));
        }
        let response = first(self.response, "findItemsByKeywordsResponse")?;
        if response.ack.iter().any(|ack| ack == ACK_FAILURE) {
            return Err(MarketplaceSearchError::rejected(first_error_message(
                response.error_message,
            )));
        }

        let search_result = first(response.search_result, "searchResult")?;
        search_result
            .item
            .into_iter()
            .enumerate()
            .map(|(index, item)| item.into_domain_item(index))
            .collect()
    }
}

impl ItemDto {
    fn into_domain_item(self, index: usize) -> Result<Item, MarketplaceSearchError> {
        let at = |field: &str| format!("item[{index}].{field}");
        let item_id = first(self.item_id, &at("itemId"))?;
        let title = first(self.title, &at("title"))?;
        let category = first(self.primary_category, &at("primaryCategory"))?;
        let selling_status = first(self.selling_status, &at("sellingStatus"))?;
        let price = first(
            selling_status.converted_current_price,
            &at("sellingStatus.convertedCurrentPrice"),
        )?;

        let amount = price.value.trim().parse::<Decimal>().map_err(|error| {
            MarketplaceSearchError::decode(format!(
                "item {item_id} has unparseable price {:?}: {error}",
                price.value
            ))
        })?;

        Ok(Item {
            primary_category: Category {
                id: first(category.category_id, &at("primaryCategory.categoryId"))?,
                name: first(category.category_name, &at("primaryCategory.categoryName"))?,
            },
            price: Price::new(amount, price.currency_id),
            item_id,
            title,
        })
    }
}

fn first<T>(values: Vec<T>, field: &str) -> Result<T, MarketplaceSearchError> {
    values
        .into_iter()
        .next()
        .ok_or_else(|| MarketplaceSearchError::decode(format!("missing {field}")))
}

fn has_error(messages: &[ErrorMessageDto]) -> bool {
    messages.iter().any(|message| !message.error.is_empty())
}

fn first_error_message(messages: Vec<ErrorMessageDto>) -> String {
    messages
        .into_iter()
        .flat_map(|message| message.error)
        .flat_map(|error| error.message)
        .next()
        .unwrap_or_else(|| "no error message supplied".to_owned())
}

#[cfg(test)]
mod tests {
    //! Request body shape checks.

    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_uses_namespace_markers_and_fixed_filters() {
        let query = SearchQuery::new("harry potter", 25).expect("valid query");
        let body = serde_json::to_value(FindItemsRequestDto::for_query(&query)).expect("serialise");

        assert_eq!(
            body,
            json!({
                "jsonns.xsi": "http://www.w3.org/2001/XMLSchema-instance",
                "jsonns.xs": "http://www.w3.org/2001/XMLSchema",
                "jsonns.tns": "http://www.ebay.com/marketplace/search/v1/services",
                "tns.findItemsByKeywordsRequest": {
                    "keywords": "harry potter",
                    "itemFilter": [{
                        "name": "ListingType",
                        "value": ["AuctionWithBIN", "FixedPrice", "StoreInventory"]
                    }],
                    "paginationInput": {
                        "entriesPerPage": 25,
                        "pageNumber": 1
                    }
                }
            })
        );
    }
}
