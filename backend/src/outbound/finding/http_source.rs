//! Reqwest-backed marketplace search adapter.
//!
//! This adapter owns transport details only: request URL and body
//! serialisation, HTTP error mapping, and JSON decoding into domain items.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{FindItemsRequestDto, FindingResponseDto};
use crate::domain::ports::{MarketplaceSearch, MarketplaceSearchError};
use crate::domain::{Item, SearchQuery};

const OPERATION_NAME: &str = "findItemsByKeywords";
const DATA_FORMAT: &str = "JSON";

/// Connection settings for the Finding service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingConfig {
    /// Service endpoint, without query string.
    pub endpoint: Url,
    /// Application identifier sent as `SECURITY-APPNAME`.
    pub app_id: String,
    /// API version sent as `SERVICE-VERSION`.
    pub service_version: String,
    /// Optional marketplace site sent as `GLOBAL-ID`.
    pub global_id: Option<String>,
    /// Whole-request timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

/// Marketplace source that issues one HTTP POST per search.
pub struct FindingHttpSource {
    client: Client,
    request_url: Url,
}

impl FindingHttpSource {
    /// Build an adapter from connection settings.
    ///
    /// ```rust,ignore
    /// let source = FindingHttpSource::new(config)?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: FindingConfig) -> Result<Self, reqwest::Error> {
        let builder = Client::builder();
        let builder = match config.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        let client = builder.build()?;
        Ok(Self {
            client,
            request_url: build_request_url(&config),
        })
    }
}

#[async_trait]
impl MarketplaceSearch for FindingHttpSource {
    async fn find_items(&self, query: &SearchQuery) -> Result<Vec<Item>, MarketplaceSearchError> {
        debug!(
            keywords = query.search_term(),
            entries_per_page = query.max_results(),
            "querying marketplace"
        );
        let response = self
            .client
            .post(self.request_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&FindItemsRequestDto::for_query(query))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        let items = decode_response(status, body.as_ref())?;
        debug!(item_count = items.len(), "marketplace returned items");
        Ok(items)
    }
}

fn build_request_url(config: &FindingConfig) -> Url {
    let mut url = config.endpoint.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("OPERATION-NAME", OPERATION_NAME)
            .append_pair("SERVICE-VERSION", &config.service_version)
            .append_pair("SECURITY-APPNAME", &config.app_id)
            .append_pair("REQUEST-DATA-FORMAT", DATA_FORMAT)
            .append_pair("RESPONSE-DATA-FORMAT", DATA_FORMAT);
        if let Some(global_id) = &config.global_id {
            pairs.append_pair("GLOBAL-ID", global_id);
        }
    }
    url
}

/// Turn an HTTP reply into items.
///
/// Only a reply without a body is a transport failure. Any body is decoded
/// whatever the status: authentication and quota failures arrive as a 500
/// carrying an `errorMessage` envelope.
fn decode_response(status: StatusCode, body: &[u8]) -> Result<Vec<Item>, MarketplaceSearchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(MarketplaceSearchError::transport(format!(
            "status {}: {}",
            status.as_u16(),
            body_preview(body)
        )));
    }

    match parse_items(body) {
        Err(MarketplaceSearchError::Decode { message }) if !status.is_success() => {
            Err(MarketplaceSearchError::decode(format!(
                "status {}: {message}; body: {}",
                status.as_u16(),
                body_preview(body)
            )))
        }
        decoded => decoded,
    }
}

fn parse_items(body: &[u8]) -> Result<Vec<Item>, MarketplaceSearchError> {
    let decoded: FindingResponseDto = serde_json::from_slice(body).map_err(|error| {
        MarketplaceSearchError::decode(format!("invalid Finding JSON payload: {error}"))
    })?;
    decoded.into_domain_items()
}

fn map_transport_error(error: reqwest::Error) -> MarketplaceSearchError {
    if error.is_timeout() {
        MarketplaceSearchError::transport(format!("timed out: {error}"))
    } else {
        MarketplaceSearchError::transport(error.to_string())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let text = String::from_utf8_lossy(body);
    let compact = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.is_empty() {
        return "<empty body>".to_owned();
    }
    let mut preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        preview.push_str("...");
    }
    preview
}
