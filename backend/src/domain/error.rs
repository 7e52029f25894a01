//! Domain-level error types.
//!
//! These errors are transport agnostic. The `Display` text of each variant is
//! the exact client-facing message; inbound adapters decide how to frame it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable machine-readable error code describing the failure category.
///
/// Codes never reach clients (the wire shape is `{"error": message}`); they
/// exist so logs and metrics can group failures without matching on text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A required request parameter was absent or blank.
    MissingParameter,
    /// A request parameter was outside its permitted range.
    OutOfRange,
    /// The marketplace returned no items for the query.
    EmptyResultSet,
    /// The marketplace could not be reached.
    UpstreamUnavailable,
    /// The marketplace answered with a payload we could not interpret.
    MalformedUpstreamResponse,
}

impl ErrorCode {
    /// Return the snake_case label used in structured logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingParameter => "missing_parameter",
            Self::OutOfRange => "out_of_range",
            Self::EmptyResultSet => "empty_result_set",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::MalformedUpstreamResponse => "malformed_upstream_response",
        }
    }
}

/// Failure of one price search request.
///
/// # Examples
/// ```
/// use price_search::domain::{ErrorCode, SearchError};
///
/// let err = SearchError::missing_parameter("searchString");
/// assert_eq!(err.code(), ErrorCode::MissingParameter);
/// assert_eq!(err.to_string(), "Parameter \"searchString\" was not specified");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A required parameter was absent or blank.
    #[error("Parameter \"{name}\" was not specified")]
    MissingParameter {
        /// Wire name of the parameter.
        name: &'static str,
    },
    /// A parameter value fell outside `min..=max`.
    #[error("Parameter \"{name}\" must be between {min} and {max} (inclusive)")]
    OutOfRange {
        /// Wire name of the parameter.
        name: &'static str,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },
    /// The search produced no items.
    #[error("No items matched the given search string")]
    EmptyResultSet,
    /// The marketplace could not be reached.
    #[error("Marketplace search is currently unavailable")]
    UpstreamUnavailable,
    /// The marketplace response could not be used.
    #[error("Marketplace search returned an unexpected response")]
    MalformedUpstreamResponse,
}

impl SearchError {
    /// Convenience constructor for [`SearchError::MissingParameter`].
    pub fn missing_parameter(name: &'static str) -> Self {
        Self::MissingParameter { name }
    }

    /// Convenience constructor for [`SearchError::OutOfRange`].
    pub fn out_of_range(name: &'static str, min: u32, max: u32) -> Self {
        Self::OutOfRange { name, min, max }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingParameter { .. } => ErrorCode::MissingParameter,
            Self::OutOfRange { .. } => ErrorCode::OutOfRange,
            Self::EmptyResultSet => ErrorCode::EmptyResultSet,
            Self::UpstreamUnavailable => ErrorCode::UpstreamUnavailable,
            Self::MalformedUpstreamResponse => ErrorCode::MalformedUpstreamResponse,
        }
    }

    /// Whether the failure was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter { .. } | Self::OutOfRange { .. }
        )
    }
}
