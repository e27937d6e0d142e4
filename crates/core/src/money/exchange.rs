//! Conversion into the functional currency.

use rust_decimal::Decimal;

use super::rounding::round_money;

/// Converts a document-currency amount into the functional currency.
///
/// The rate expresses 1 unit of the document currency in functional units.
/// Documents already in the functional currency carry a rate of 1, which
/// makes this a plain rounding.
#[must_use]
pub fn to_functional(amount: Decimal, rate: Decimal) -> Decimal {
    round_money(amount * rate)
}
