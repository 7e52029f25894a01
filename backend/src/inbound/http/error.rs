//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep [`SearchError`] HTTP-agnostic while letting Actix handlers
//! return it with `?`. Every failure is rendered as `200 {"error": message}`;
//! the payload shape alone tells clients the request failed.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::{SearchError, TraceId};
use crate::inbound::http::search::SearchResponse;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, SearchError>;

/// Error payload returned in place of a price summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable failure description.
    #[schema(example = "No items matched the given search string")]
    pub error: String,
}

impl From<&SearchError> for ErrorResponse {
    fn from(error: &SearchError) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

impl ResponseError for SearchError {
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = TraceId::current().map(|id| id.to_string());
        let trace_id = trace_id.as_deref().unwrap_or("-");
        if self.is_client_error() {
            info!(trace_id, code = self.code().as_str(), error = %self, "search request rejected");
        } else {
            warn!(trace_id, code = self.code().as_str(), error = %self, "search request failed");
        }
        HttpResponse::build(self.status_code())
            .json(SearchResponse::Failure(ErrorResponse::from(self)))
    }
}

#[cfg(test)]
mod tests;
