//! Price aggregation over one snapshot of marketplace items.
//!
//! Both reductions are pure linear scans over the same slice, so the
//! highest-priced item is always a member of the set that produced the
//! average.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use super::{Item, Price};

/// Fraction digits kept in the average price.
pub const AVERAGE_PRICE_SCALE: u32 = 2;

/// Errors raised while aggregating item prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AggregationError {
    /// No items were supplied.
    #[error("cannot aggregate an empty item list")]
    Empty,
    /// The price total exceeded the decimal range.
    #[error("price total overflowed")]
    Overflow,
}

/// Average price and most expensive item of a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSummary {
    /// Mean price rounded to two fraction digits.
    pub average_price: Price,
    /// First item carrying the maximum price.
    pub highest_priced_item: Item,
}

impl PriceSummary {
    /// Run both reductions over `items`.
    ///
    /// # Examples
    /// ```
    /// use price_search::domain::{Category, Item, Price, PriceSummary};
    /// use rust_decimal::Decimal;
    ///
    /// let item = |id: &str, cents: i64| Item {
    ///     item_id: id.to_owned(),
    ///     title: format!("Item {id}"),
    ///     primary_category: Category { id: "1".to_owned(), name: "Toys".to_owned() },
    ///     price: Price::new(Decimal::new(cents, 2), "USD"),
    /// };
    /// let summary = PriceSummary::from_items(&[item("a", 1000), item("b", 3000)])
    ///     .expect("non-empty");
    /// assert_eq!(summary.average_price.amount(), Decimal::new(2000, 2));
    /// assert_eq!(summary.highest_priced_item.item_id, "b");
    /// ```
    ///
    /// # Errors
    /// Returns [`AggregationError::Empty`] for an empty slice and
    /// [`AggregationError::Overflow`] when the total cannot be represented.
    pub fn from_items(items: &[Item]) -> Result<Self, AggregationError> {
        let average_price = average_price(items)?;
        let highest_priced_item = highest_priced_item(items)
            .cloned()
            .ok_or(AggregationError::Empty)?;
        Ok(Self {
            average_price,
            highest_priced_item,
        })
    }
}

/// Arithmetic mean of item prices, rounded half away from zero to two places.
///
/// The currency is taken from the last item visited; uniformity is not
/// enforced here (see [`currencies_are_uniform`]).
///
/// # Errors
/// Returns [`AggregationError::Empty`] for an empty slice and
/// [`AggregationError::Overflow`] when the total cannot be represented.
pub fn average_price(items: &[Item]) -> Result<Price, AggregationError> {
    let last = items.last().ok_or(AggregationError::Empty)?;
    let total = items
        .iter()
        .try_fold(Decimal::ZERO, |sum, item| {
            sum.checked_add(item.price.amount())
        })
        .ok_or(AggregationError::Overflow)?;
    let mean = total
        .checked_div(Decimal::from(items.len()))
        .ok_or(AggregationError::Overflow)?;

    let mut rounded =
        mean.round_dp_with_strategy(AVERAGE_PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(AVERAGE_PRICE_SCALE);
    Ok(Price::new(rounded, last.price.currency_id()))
}

/// Item with the greatest price; on ties the earliest item wins.
///
/// Returns `None` only for an empty slice.
pub fn highest_priced_item(items: &[Item]) -> Option<&Item> {
    items.iter().fold(None, |best: Option<&Item>, item| match best {
        Some(current) if item.price.amount() <= current.price.amount() => Some(current),
        _ => Some(item),
    })
}

/// Whether every item is priced in the same currency.
pub fn currencies_are_uniform(items: &[Item]) -> bool {
    items
        .windows(2)
        .all(|pair| pair[0].price.currency_id() == pair[1].price.currency_id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    fn item(id: &str, amount: Decimal, currency: &str) -> Item {
        Item {
            item_id: id.to_owned(),
            title: format!("Listing {id}"),
            primary_category: Category {
                id: "220".to_owned(),
                name: "Toys & Hobbies".to_owned(),
            },
            price: Price::new(amount, currency),
        }
    }

    #[fixture]
    fn ten_twenty_thirty() -> Vec<Item> {
        vec![
            item("a", dec!(10.00), "USD"),
            item("b", dec!(20.00), "USD"),
            item("c", dec!(30.00), "USD"),
        ]
    }

    #[rstest]
    fn averages_and_picks_the_maximum(ten_twenty_thirty: Vec<Item>) {
        let summary = PriceSummary::from_items(&ten_twenty_thirty).expect("non-empty");
        assert_eq!(summary.average_price.amount(), dec!(20.00));
        assert_eq!(summary.average_price.amount().to_string(), "20.00");
        assert_eq!(summary.highest_priced_item.item_id, "c");
    }

    #[test]
    fn single_item_is_its_own_average_and_maximum() {
        let only = item("solo", dec!(12.5), "GBP");
        let summary = PriceSummary::from_items(std::slice::from_ref(&only)).expect("non-empty");
        assert_eq!(summary.average_price.amount().to_string(), "12.50");
        assert_eq!(summary.average_price.currency_id(), "GBP");
        assert_eq!(summary.highest_priced_item, only);
    }

    #[test]
    fn ties_keep_the_first_item() {
        let items = vec![item("first", dec!(15.00), "USD"), item("second", dec!(15.00), "USD")];
        let highest = highest_priced_item(&items).expect("non-empty");
        assert_eq!(highest.item_id, "first");
    }

    #[test]
    fn negative_prices_still_yield_a_maximum() {
        let items = vec![item("a", dec!(-5), "USD"), item("b", dec!(-2), "USD")];
        let highest = highest_priced_item(&items).expect("non-empty");
        assert_eq!(highest.item_id, "b");
    }

    #[rstest]
    #[case::repeating_third(vec![dec!(100), dec!(0), dec!(0)], "33.33")]
    #[case::total_hundred_over_three(vec![dec!(50), dec!(25), dec!(25.00)], "33.33")]
    #[case::half_rounds_up(vec![dec!(0.005)], "0.01")]
    #[case::below_half_rounds_down(vec![dec!(0.004)], "0.00")]
    #[case::two_thirds(vec![dec!(1), dec!(1), dec!(0)], "0.67")]
    fn average_rounds_half_up_to_two_places(#[case] amounts: Vec<Decimal>, #[case] expected: &str) {
        let items: Vec<Item> = amounts
            .into_iter()
            .enumerate()
            .map(|(index, amount)| item(&index.to_string(), amount, "USD"))
            .collect();
        let average = average_price(&items).expect("non-empty");
        assert_eq!(average.amount().to_string(), expected);
    }

    #[test]
    fn average_currency_is_taken_from_the_last_item() {
        let items = vec![item("a", dec!(1), "USD"), item("b", dec!(3), "EUR")];
        let average = average_price(&items).expect("non-empty");
        assert_eq!(average.currency_id(), "EUR");
        assert!(!currencies_are_uniform(&items));
    }

    #[rstest]
    fn aggregation_is_repeatable(ten_twenty_thirty: Vec<Item>) {
        let first = PriceSummary::from_items(&ten_twenty_thirty).expect("non-empty");
        let second = PriceSummary::from_items(&ten_twenty_thirty).expect("non-empty");
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(PriceSummary::from_items(&[]), Err(AggregationError::Empty));
        assert!(highest_priced_item(&[]).is_none());
        assert!(currencies_are_uniform(&[]));
    }

    #[test]
    fn overflowing_totals_are_reported() {
        let items = vec![item("a", Decimal::MAX, "USD"), item("b", Decimal::MAX, "USD")];
        assert_eq!(average_price(&items), Err(AggregationError::Overflow));
    }
}
