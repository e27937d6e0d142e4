//! Property-based tests for journal validation rules.
//!
//! - Property 1: Balance Integrity
//! - Property 2: Mirror Symmetry
//! - Property 3: Order Independence

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use folio_shared::types::AccountId;

use super::line::{JournalLine, Side};
use super::validation::{JournalValidationError, validate_lines};

/// Strategy to generate a valid positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a side.
fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Debit), Just(Side::Credit)]
}

/// Helper to create a line on the given side.
fn make_line(side: Side, amount: Decimal) -> JournalLine {
    JournalLine {
        account_id: AccountId::new(),
        side,
        amount,
        exchange_rate: Decimal::ONE,
        posting_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        memo: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 1: Balance Integrity
    // =========================================================================

    /// Property 1.1: Balanced line sets are accepted.
    ///
    /// *For any* set of positive debit amounts with a single credit equal to
    /// their sum, validation SHALL accept the set.
    #[test]
    fn prop_balanced_set_accepted(
        amounts in prop::collection::vec(positive_amount(), 1..8),
    ) {
        let total: Decimal = amounts.iter().sum();
        let mut lines: Vec<JournalLine> = amounts
            .into_iter()
            .map(|a| make_line(Side::Debit, a))
            .collect();
        lines.push(make_line(Side::Credit, total));

        let result = validate_lines(&lines);
        prop_assert!(result.is_ok(), "balanced set should be accepted, got: {:?}", result);
    }

    /// Property 1.2: Unbalanced line sets are rejected with both totals.
    ///
    /// *For any* pair of unequal positive amounts on opposite sides,
    /// validation SHALL fail with `Unbalanced` carrying both sums.
    #[test]
    fn prop_unbalanced_set_rejected(
        debit in positive_amount(),
        credit in positive_amount(),
    ) {
        prop_assume!(debit != credit);

        let lines = vec![
            make_line(Side::Debit, debit),
            make_line(Side::Credit, credit),
        ];

        prop_assert!(
            matches!(
                validate_lines(&lines),
                Err(JournalValidationError::Unbalanced { debits, credits })
                    if debits == debit && credits == credit
            ),
            "unbalanced set should be rejected with both totals"
        );
    }

    /// Property 1.3: Perturbing one leg of a balanced set breaks it.
    ///
    /// *For any* balanced set, adding a positive delta to a debit leg SHALL
    /// make validation fail.
    #[test]
    fn prop_perturbation_breaks_balance(
        amount in positive_amount(),
        delta in positive_amount(),
    ) {
        let lines = vec![
            make_line(Side::Debit, amount + delta),
            make_line(Side::Credit, amount),
        ];

        prop_assert!(
            matches!(
                validate_lines(&lines),
                Err(JournalValidationError::Unbalanced { .. })
            ),
            "perturbed set should be rejected as unbalanced"
        );
    }

    /// Property 1.4: Zero and negative amounts are rejected.
    ///
    /// *For any* line set containing a non-positive amount, validation SHALL
    /// fail with `InvalidAmount` regardless of the rest of the set.
    #[test]
    fn prop_non_positive_amount_rejected(
        side in side_strategy(),
        bad_cents in -100_000i64..=0i64,
        other_amount in positive_amount(),
    ) {
        let bad = Decimal::new(bad_cents, 2);
        let lines = vec![
            make_line(side, bad),
            make_line(side.flipped(), other_amount),
        ];

        let result = validate_lines(&lines);
        prop_assert!(
            matches!(result, Err(JournalValidationError::InvalidAmount(_))),
            "non-positive amount should be rejected, got: {:?}",
            result
        );
    }

    // =========================================================================
    // Property 2: Mirror Symmetry
    // =========================================================================

    /// Property 2.1: Mirroring every line preserves validity.
    ///
    /// *For any* balanced set, the set with every side flipped SHALL also
    /// validate. This is what makes reversal journals derivable from the
    /// original lines alone.
    #[test]
    fn prop_mirror_preserves_validity(
        amounts in prop::collection::vec(positive_amount(), 1..6),
    ) {
        let total: Decimal = amounts.iter().sum();
        let mut lines: Vec<JournalLine> = amounts
            .into_iter()
            .map(|a| make_line(Side::Debit, a))
            .collect();
        lines.push(make_line(Side::Credit, total));

        let mirrored: Vec<JournalLine> = lines.iter().map(JournalLine::mirrored).collect();

        prop_assert!(validate_lines(&lines).is_ok());
        prop_assert!(validate_lines(&mirrored).is_ok());
    }

    /// Property 2.2: Mirroring twice is the identity.
    #[test]
    fn prop_double_mirror_is_identity(
        side in side_strategy(),
        amount in positive_amount(),
    ) {
        let line = make_line(side, amount);
        prop_assert_eq!(line.mirrored().mirrored(), line);
    }

    // =========================================================================
    // Property 3: Order Independence
    // =========================================================================

    /// Property 3.1: Line order does not change the verdict.
    ///
    /// *For any* line set, validation SHALL reach the same accept/reject
    /// verdict for the set and for the set reversed.
    #[test]
    fn prop_line_order_irrelevant(
        pairs in prop::collection::vec((side_strategy(), positive_amount()), 2..8),
    ) {
        let lines: Vec<JournalLine> = pairs
            .into_iter()
            .map(|(side, amount)| make_line(side, amount))
            .collect();
        let mut reversed = lines.clone();
        reversed.reverse();

        prop_assert_eq!(
            validate_lines(&lines).is_ok(),
            validate_lines(&reversed).is_ok()
        );
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Specific example: the smallest valid journal (2 lines).
    #[test]
    fn test_minimum_valid_journal() {
        let lines = vec![
            make_line(Side::Debit, dec!(1.00)),
            make_line(Side::Credit, dec!(1.00)),
        ];
        assert!(validate_lines(&lines).is_ok());
    }

    /// Specific example: a 1-cent mismatch is caught.
    #[test]
    fn test_one_cent_mismatch_rejected() {
        let lines = vec![
            make_line(Side::Debit, dec!(1000.00)),
            make_line(Side::Credit, dec!(999.99)),
        ];
        assert!(matches!(
            validate_lines(&lines),
            Err(JournalValidationError::Unbalanced { .. })
        ));
    }
}
