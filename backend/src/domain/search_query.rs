//! Validated search request.
//!
//! Raw request parameters are untrusted strings. [`SearchQuery::from_raw`]
//! checks them in a fixed order (search term presence, item count presence,
//! item count range) and yields either an immutable query or the first
//! failure encountered.

use super::SearchError;

/// Wire name of the search term parameter.
pub const SEARCH_STRING_PARAM: &str = "searchString";
/// Wire name of the item count parameter.
pub const NUM_ITEMS_PARAM: &str = "numItems";
/// Smallest accepted item count.
pub const MIN_RESULTS: u32 = 1;
/// Largest accepted item count (one upstream page).
pub const MAX_RESULTS: u32 = 100;

/// Keyword search with a bounded result count.
///
/// ## Invariants
/// - `search_term` is non-empty once trimmed.
/// - `max_results` lies within `MIN_RESULTS..=MAX_RESULTS`.
///
/// # Examples
/// ```
/// use price_search::domain::SearchQuery;
///
/// let query = SearchQuery::from_raw(Some(" harry potter "), Some("25")).expect("valid");
/// assert_eq!(query.search_term(), "harry potter");
/// assert_eq!(query.max_results(), 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    search_term: String,
    max_results: u32,
}

impl SearchQuery {
    /// Build a query from already-typed values.
    ///
    /// # Errors
    /// Returns [`SearchError::MissingParameter`] for a blank term and
    /// [`SearchError::OutOfRange`] for an out-of-range count.
    pub fn new(search_term: &str, max_results: u32) -> Result<Self, SearchError> {
        let search_term = require_present(Some(search_term), SEARCH_STRING_PARAM)?;
        if !(MIN_RESULTS..=MAX_RESULTS).contains(&max_results) {
            return Err(num_items_out_of_range());
        }
        Ok(Self {
            search_term: search_term.to_owned(),
            max_results,
        })
    }

    /// Validate raw request parameters.
    ///
    /// Whitespace-only values count as absent. A count that is present but
    /// not an integer is reported as out of range.
    ///
    /// # Errors
    /// Returns the first validation failure, checking the search term first.
    pub fn from_raw(
        search_term: Option<&str>,
        max_results: Option<&str>,
    ) -> Result<Self, SearchError> {
        let search_term = require_present(search_term, SEARCH_STRING_PARAM)?;
        let raw_count = require_present(max_results, NUM_ITEMS_PARAM)?;
        let max_results = parse_count(raw_count)?;
        Self::new(search_term, max_results)
    }

    /// Trimmed keywords sent to the marketplace.
    pub fn search_term(&self) -> &str {
        self.search_term.as_str()
    }

    /// Number of items requested from the marketplace.
    pub fn max_results(&self) -> u32 {
        self.max_results
    }
}

fn require_present<'a>(
    value: Option<&'a str>,
    name: &'static str,
) -> Result<&'a str, SearchError> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or_else(|| SearchError::missing_parameter(name))
}

fn parse_count(raw: &str) -> Result<u32, SearchError> {
    let count = raw
        .parse::<i64>()
        .map_err(|_| num_items_out_of_range())?;
    u32::try_from(count).map_err(|_| num_items_out_of_range())
}

fn num_items_out_of_range() -> SearchError {
    SearchError::out_of_range(NUM_ITEMS_PARAM, MIN_RESULTS, MAX_RESULTS)
}
