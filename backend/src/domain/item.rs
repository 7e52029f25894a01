//! Marketplace listing records.
//!
//! Items live for the duration of one request. They are read-only copies of
//! what the marketplace returned; nothing here is persisted.

use rust_decimal::Decimal;

/// A monetary amount in one currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    amount: Decimal,
    currency_id: String,
}

impl Price {
    /// Create a price from an amount and an ISO 4217 currency code.
    pub fn new(amount: Decimal, currency_id: impl Into<String>) -> Self {
        Self {
            amount,
            currency_id: currency_id.into(),
        }
    }

    /// Decimal amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Currency code, for example `USD`.
    pub fn currency_id(&self) -> &str {
        self.currency_id.as_str()
    }
}

/// Primary marketplace category of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Marketplace category identifier.
    pub id: String,
    /// Human-readable category name.
    pub name: String,
}

/// One listing returned by a marketplace search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Marketplace listing identifier.
    pub item_id: String,
    /// Listing title.
    pub title: String,
    /// Primary category of the listing.
    pub primary_category: Category,
    /// Converted current price used for aggregation.
    pub price: Price,
}
