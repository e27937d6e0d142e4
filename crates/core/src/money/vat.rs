//! VAT and excise arithmetic.
//!
//! Rates are percentages (5 means 5%). Two charging styles exist:
//!
//! - inclusive: the document amount already contains the levy, so the levy
//!   is backed out of the gross figure
//! - exclusive: the levy is charged on top of the net figure
//!
//! `net_of_inclusive` is defined by subtraction rather than by a second
//! rounded division so that net plus levy reconstructs the gross amount
//! exactly. Journals balance to the cent because of this.

use rust_decimal::Decimal;

use super::rounding::round_money;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// The levy baked into a gross (inclusive) amount.
///
/// `gross * rate / (100 + rate)`, rounded once.
#[must_use]
pub fn inclusive_portion(gross: Decimal, rate_percent: Decimal) -> Decimal {
    if rate_percent.is_zero() {
        return Decimal::ZERO;
    }
    round_money(gross * rate_percent / (HUNDRED + rate_percent))
}

/// The levy charged on top of a net (exclusive) amount.
///
/// `net * rate / 100`, rounded once.
#[must_use]
pub fn on_net(net: Decimal, rate_percent: Decimal) -> Decimal {
    if rate_percent.is_zero() {
        return Decimal::ZERO;
    }
    round_money(net * rate_percent / HUNDRED)
}

/// The net remainder of a gross amount after backing out an inclusive levy.
///
/// Always satisfies `net_of_inclusive(g, r) + inclusive_portion(g, r) == g`
/// for gross amounts already at money precision.
#[must_use]
pub fn net_of_inclusive(gross: Decimal, rate_percent: Decimal) -> Decimal {
    gross - inclusive_portion(gross, rate_percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn backs_out_five_percent() {
        // 1000.00 gross at 5% inclusive
        assert_eq!(inclusive_portion(dec!(1000.00), dec!(5)), dec!(47.62));
        assert_eq!(net_of_inclusive(dec!(1000.00), dec!(5)), dec!(952.38));
    }

    #[test]
    fn net_plus_portion_reconstructs_gross() {
        let gross = dec!(200.00);
        let rate = dec!(5);
        assert_eq!(
            net_of_inclusive(gross, rate) + inclusive_portion(gross, rate),
            gross
        );
        assert_eq!(inclusive_portion(gross, rate), dec!(9.52));
    }

    #[test]
    fn charges_on_top_of_net() {
        assert_eq!(on_net(dec!(952.38), dec!(5)), dec!(47.62));
        assert_eq!(on_net(dec!(100.00), dec!(5)), dec!(5.00));
    }

    #[test]
    fn zero_rate_yields_zero_levy() {
        assert_eq!(inclusive_portion(dec!(1000.00), Decimal::ZERO), dec!(0));
        assert_eq!(on_net(dec!(1000.00), Decimal::ZERO), dec!(0));
        assert_eq!(net_of_inclusive(dec!(1000.00), Decimal::ZERO), dec!(1000.00));
    }
}
