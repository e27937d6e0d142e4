//! Property-based tests for the posting strategies.
//!
//! - Property 1: Every Derived Journal Balances
//! - Property 2: Notes Mirror Invoices
//! - Property 3: Line Amounts Are Positive

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use folio_shared::types::{AccountId, DocumentId, UserId};

use crate::document::kind::Direction;
use crate::document::status::DocumentStatus;
use crate::posting::service::PostingService;
use crate::posting::types::{
    ChartRoles, ExpenseDocument, ExpensePayment, SourceDocument, TradeDocument, TradeLine,
};

fn roles() -> ChartRoles {
    ChartRoles {
        accounts_receivable: AccountId::new(),
        accounts_payable: AccountId::new(),
        output_vat: AccountId::new(),
        input_vat: AccountId::new(),
        excise_duty: AccountId::new(),
        sales_discount: AccountId::new(),
        purchase_discount: AccountId::new(),
        inventory_asset: AccountId::new(),
        cost_of_goods_sold: AccountId::new(),
        petty_cash: AccountId::new(),
        vat_payable: AccountId::new(),
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
}

/// Strategy to generate unit prices (1.00 to 10,000.00). The floor keeps
/// every derived leg above zero after currency conversion.
fn unit_price() -> impl Strategy<Value = Decimal> {
    (100i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate VAT rates used in practice.
fn vat_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::ZERO),
        Just(Decimal::from(5)),
        Just(Decimal::from(15)),
        Just(Decimal::from(20)),
    ]
}

/// Strategy to generate exchange rates (0.50 to 100.00).
fn exchange_rate() -> impl Strategy<Value = Decimal> {
    (50i64..10_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy to generate a direction.
fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Sales), Just(Direction::Purchase)]
}

/// Strategy to generate one trading line. Discounts stay below the line
/// value, mirroring what document validation upstream enforces.
fn trade_line() -> impl Strategy<Value = TradeLine> {
    (
        1i64..100i64,
        unit_price(),
        vat_rate(),
        any::<bool>(),
        0i64..500i64,
    )
        .prop_map(|(qty, price, vat, inclusive, discount_cents)| {
            let quantity = Decimal::from(qty);
            let discount = Decimal::new(discount_cents, 2).min(quantity * price / Decimal::TWO);
            TradeLine {
                category_account_id: AccountId::new(),
                quantity,
                unit_price: price,
                discount,
                vat_rate: vat,
                vat_inclusive: inclusive,
                excise_amount: Decimal::ZERO,
                inventory: None,
            }
        })
}

fn trade_document(
    direction: Direction,
    rate: Decimal,
    reverse_charge: bool,
    lines: Vec<TradeLine>,
) -> TradeDocument {
    TradeDocument {
        id: DocumentId::new(),
        number: "DOC-1".into(),
        status: DocumentStatus::Pending,
        direction,
        party_account_id: AccountId::new(),
        issue_date: day(),
        exchange_rate: rate,
        reverse_charge,
        lines,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 1: Every Derived Journal Balances
    // =========================================================================

    /// Property 1.1: Invoice journals balance for any mix of VAT modes,
    /// discounts, directions, and exchange rates.
    #[test]
    fn prop_invoice_journals_balance(
        direction in direction(),
        rate in exchange_rate(),
        reverse_charge in any::<bool>(),
        lines in prop::collection::vec(trade_line(), 1..6),
    ) {
        let doc = trade_document(direction, rate, reverse_charge, lines);
        let plan = PostingService::derive(
            &SourceDocument::Invoice(doc),
            &roles(),
            UserId::new(),
        );

        prop_assert!(plan.is_ok(), "derivation failed: {:?}", plan.err());
        let totals = plan.unwrap().journal.totals();
        prop_assert!(totals.is_balanced(), "debits {} != credits {}", totals.debits, totals.credits);
    }

    /// Property 1.2: Expense journals balance across the whole settlement
    /// and VAT matrix.
    #[test]
    fn prop_expense_journals_balance(
        amount in unit_price(),
        vat in vat_rate(),
        inclusive in any::<bool>(),
        reverse_charge in any::<bool>(),
        rate in exchange_rate(),
        mode in 0u8..3u8,
    ) {
        let payment = match mode {
            0 => ExpensePayment::Bank { account_id: AccountId::new() },
            1 => ExpensePayment::Cash,
            _ => ExpensePayment::Credit { payee_account_id: AccountId::new() },
        };
        let doc = ExpenseDocument {
            id: DocumentId::new(),
            number: "EXP-1".into(),
            status: DocumentStatus::Draft,
            date: day(),
            exchange_rate: rate,
            amount,
            vat_rate: vat,
            vat_inclusive: inclusive,
            reverse_charge,
            category_account_id: AccountId::new(),
            payment,
        };

        let plan = PostingService::derive(&SourceDocument::Expense(doc), &roles(), UserId::new());

        prop_assert!(plan.is_ok(), "derivation failed: {:?}", plan.err());
        prop_assert!(plan.unwrap().journal.totals().is_balanced());
    }

    // =========================================================================
    // Property 2: Notes Mirror Invoices
    // =========================================================================

    /// Property 2.1: A credit note carries the same totals as the invoice
    /// posting of the same document, with the sides swapped.
    #[test]
    fn prop_notes_mirror_invoices(
        direction in direction(),
        rate in exchange_rate(),
        lines in prop::collection::vec(trade_line(), 1..5),
    ) {
        let roles = roles();
        let doc = trade_document(direction, rate, false, lines);

        let invoice = PostingService::derive(
            &SourceDocument::Invoice(doc.clone()),
            &roles,
            UserId::new(),
        ).unwrap().journal;
        let note = PostingService::derive(
            &SourceDocument::CreditNote(doc),
            &roles,
            UserId::new(),
        ).unwrap().journal;

        prop_assert_eq!(invoice.totals().debits, note.totals().credits);
        prop_assert_eq!(invoice.totals().credits, note.totals().debits);
        prop_assert_eq!(invoice.lines().len(), note.lines().len());
    }

    // =========================================================================
    // Property 3: Line Amounts Are Positive
    // =========================================================================

    /// Property 3.1: No strategy ever emits a zero or negative leg.
    #[test]
    fn prop_all_leg_amounts_positive(
        direction in direction(),
        rate in exchange_rate(),
        reverse_charge in any::<bool>(),
        lines in prop::collection::vec(trade_line(), 1..6),
    ) {
        let doc = trade_document(direction, rate, reverse_charge, lines);
        let journal = PostingService::derive(
            &SourceDocument::Invoice(doc),
            &roles(),
            UserId::new(),
        ).unwrap().journal;

        for line in journal.lines() {
            prop_assert!(line.amount > Decimal::ZERO);
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::ledger::journal::ReferenceType;

    #[test]
    fn mixed_vat_modes_in_one_document_balance() {
        let mut lines = vec![
            TradeLine {
                category_account_id: AccountId::new(),
                quantity: dec!(3),
                unit_price: dec!(199.99),
                discount: dec!(0),
                vat_rate: dec!(5),
                vat_inclusive: true,
                excise_amount: dec!(0),
                inventory: None,
            };
            2
        ];
        lines[1].vat_inclusive = false;
        lines[1].discount = dec!(25.00);
        let doc = trade_document(Direction::Purchase, dec!(3.6725), true, lines);

        let journal = PostingService::derive(&SourceDocument::Invoice(doc), &roles(), UserId::new())
            .unwrap()
            .journal;

        assert!(journal.totals().is_balanced());
        assert_eq!(journal.reference.reference_type, ReferenceType::Invoice);
    }

    #[test]
    fn reverse_charge_expense_carries_both_vat_legs() {
        let roles = roles();
        let doc = ExpenseDocument {
            id: DocumentId::new(),
            number: "EXP-7".into(),
            status: DocumentStatus::Draft,
            date: day(),
            exchange_rate: Decimal::ONE,
            amount: dec!(200.00),
            vat_rate: dec!(5),
            vat_inclusive: true,
            reverse_charge: true,
            category_account_id: AccountId::new(),
            payment: ExpensePayment::Bank {
                account_id: AccountId::new(),
            },
        };

        let journal = PostingService::derive(&SourceDocument::Expense(doc), &roles, UserId::new())
            .unwrap()
            .journal;

        let on = |account: AccountId| {
            journal
                .lines()
                .iter()
                .filter(|l| l.account_id == account)
                .map(|l| l.amount)
                .sum::<Decimal>()
        };
        assert_eq!(on(roles.input_vat), dec!(9.52));
        assert_eq!(on(roles.output_vat), dec!(9.52));
        assert!(journal.totals().is_balanced());
    }
}
