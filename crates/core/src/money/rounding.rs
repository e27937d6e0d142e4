//! The single rounding policy.
//!
//! Banker's Rounding (round half to even) minimizes cumulative drift across
//! many postings. Every monetary figure in a journal is rounded with this
//! function, always to [`MONEY_DP`] places.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places every journal amount is stored with.
pub const MONEY_DP: u32 = 2;

/// Rounds a monetary value using Banker's Rounding.
///
/// - 2.345 rounds to 2.34 (to nearest even)
/// - 2.355 rounds to 2.36 (to nearest even)
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn midpoints_round_to_even() {
        assert_eq!(round_money(dec!(2.345)), dec!(2.34));
        assert_eq!(round_money(dec!(2.355)), dec!(2.36));
        assert_eq!(round_money(dec!(0.005)), dec!(0.00));
        assert_eq!(round_money(dec!(0.015)), dec!(0.02));
    }

    #[test]
    fn non_midpoints_round_nearest() {
        assert_eq!(round_money(dec!(47.619047)), dec!(47.62));
        assert_eq!(round_money(dec!(952.380952)), dec!(952.38));
    }

    #[test]
    fn already_rounded_values_are_unchanged() {
        assert_eq!(round_money(dec!(1000.00)), dec!(1000.00));
        assert_eq!(round_money(dec!(-33.33)), dec!(-33.33));
    }
}
