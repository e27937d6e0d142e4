//! Property-based tests for monetary arithmetic.
//!
//! - Property 1: Rounding Stability
//! - Property 2: Inclusive Levy Decomposition

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::exchange::to_functional;
use super::rounding::round_money;
use super::vat::{inclusive_portion, net_of_inclusive, on_net};

/// Strategy to generate money-precision amounts (0.01 to 1,000,000.00).
fn money_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate levy rates between 0% and 50% with 2 decimals.
fn levy_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=5_000i64).prop_map(|bp| Decimal::new(bp, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 100.0000).
fn exchange_rate() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 1: Rounding Stability
    // =========================================================================

    /// Property 1.1: Rounding is idempotent.
    ///
    /// *For any* value, rounding twice SHALL equal rounding once.
    #[test]
    fn prop_rounding_idempotent(cents in 1i64..100_000_000i64, extra in 0u32..9999u32) {
        let noisy = Decimal::new(cents, 2) + Decimal::new(i64::from(extra), 6);
        prop_assert_eq!(round_money(round_money(noisy)), round_money(noisy));
    }

    /// Property 1.2: Money-precision values pass through unchanged.
    ///
    /// *For any* amount already at 2 decimal places, rounding SHALL be the
    /// identity.
    #[test]
    fn prop_money_precision_fixed_point(amount in money_amount()) {
        prop_assert_eq!(round_money(amount), amount);
    }

    /// Property 1.3: Conversion at rate 1 is the identity on money amounts.
    #[test]
    fn prop_unit_rate_identity(amount in money_amount()) {
        prop_assert_eq!(to_functional(amount, Decimal::ONE), amount);
    }

    /// Property 1.4: Converted amounts are positive for positive inputs.
    #[test]
    fn prop_conversion_sign_preserved(amount in money_amount(), rate in exchange_rate()) {
        prop_assert!(to_functional(amount, rate) >= Decimal::ZERO);
    }

    // =========================================================================
    // Property 2: Inclusive Levy Decomposition
    // =========================================================================

    /// Property 2.1: Net plus backed-out levy reconstructs the gross exactly.
    ///
    /// *For any* gross amount at money precision and any rate, the inclusive
    /// decomposition SHALL sum back to the gross to the cent. Posting legs
    /// built from this decomposition therefore balance without a plug line.
    #[test]
    fn prop_inclusive_decomposition_exact(gross in money_amount(), rate in levy_rate()) {
        let levy = inclusive_portion(gross, rate);
        let net = net_of_inclusive(gross, rate);
        prop_assert_eq!(net + levy, gross);
    }

    /// Property 2.2: The backed-out levy never exceeds the gross.
    #[test]
    fn prop_inclusive_portion_bounded(gross in money_amount(), rate in levy_rate()) {
        let levy = inclusive_portion(gross, rate);
        prop_assert!(levy >= Decimal::ZERO);
        prop_assert!(levy <= gross);
    }

    /// Property 2.3: An exclusive levy scales with the rate.
    ///
    /// *For any* net amount, a zero rate SHALL yield zero and a higher rate
    /// SHALL never yield a smaller levy.
    #[test]
    fn prop_exclusive_levy_monotone(net in money_amount(), rate in levy_rate()) {
        prop_assert_eq!(on_net(net, Decimal::ZERO), Decimal::ZERO);
        let low = on_net(net, rate);
        let high = on_net(net, rate + Decimal::ONE);
        prop_assert!(low <= high);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Specific example: the 5% inclusive split of a round thousand.
    #[test]
    fn test_thousand_at_five_percent() {
        assert_eq!(inclusive_portion(dec!(1000.00), dec!(5)), dec!(47.62));
        assert_eq!(net_of_inclusive(dec!(1000.00), dec!(5)), dec!(952.38));
    }

    /// Specific example: awkward gross that would drift with double rounding.
    #[test]
    fn test_awkward_gross_still_reconstructs() {
        let gross = dec!(0.03);
        let rate = dec!(5);
        assert_eq!(
            net_of_inclusive(gross, rate) + inclusive_portion(gross, rate),
            gross
        );
    }
}
