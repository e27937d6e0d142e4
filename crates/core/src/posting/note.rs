//! Credit and debit note posting strategies.
//!
//! A note unwinds part of an invoice, so its journal is the invoice journal
//! with every side flipped: a credit note on a customer invoice credits the
//! receivable and debits the income category back, and the cost pair
//! restocks the returned units. Stock moves the opposite way to the
//! amended invoice.

use folio_shared::types::UserId;

use crate::document::kind::DocumentKind;
use crate::document::status::DocumentStatus;
use crate::inventory::stock::{MovementFlow, posting_effects};
use crate::ledger::journal::{Journal, PostingReference, ReferenceType};
use crate::ledger::line::JournalLine;

use super::error::PostingError;
use super::invoice::trade_legs;
use super::types::{ChartRoles, PostingPlan, TradeDocument, journal_description};

/// Derives the posting plan for a credit note.
///
/// # Errors
///
/// Same failure modes as invoice derivation.
pub fn derive_credit_note(
    doc: &TradeDocument,
    roles: &ChartRoles,
    user: UserId,
) -> Result<PostingPlan, PostingError> {
    derive_note(doc, roles, DocumentKind::CreditNote, ReferenceType::CreditNote, user)
}

/// Derives the posting plan for a debit note.
///
/// # Errors
///
/// Same failure modes as invoice derivation.
pub fn derive_debit_note(
    doc: &TradeDocument,
    roles: &ChartRoles,
    user: UserId,
) -> Result<PostingPlan, PostingError> {
    derive_note(doc, roles, DocumentKind::DebitNote, ReferenceType::DebitNote, user)
}

fn derive_note(
    doc: &TradeDocument,
    roles: &ChartRoles,
    kind: DocumentKind,
    reference_type: ReferenceType,
    user: UserId,
) -> Result<PostingPlan, PostingError> {
    let lines: Vec<JournalLine> = trade_legs(doc, roles)?
        .iter()
        .map(JournalLine::mirrored)
        .collect();

    let journal = Journal::balanced(
        PostingReference::new(reference_type, doc.id),
        &doc.number,
        journal_description(kind, &doc.number),
        doc.issue_date,
        doc.issue_date,
        user,
        lines,
    )?;

    Ok(PostingPlan {
        journal,
        new_status: DocumentStatus::Posted,
        stock_effects: posting_effects(
            MovementFlow::for_note(doc.direction),
            &doc.tracked_lines(),
        ),
        settlement: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use folio_shared::types::{AccountId, DocumentId, ProductId};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::document::kind::Direction;
    use crate::ledger::line::Side;
    use crate::posting::types::{InventoryRef, TradeLine};

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

    fn doc(direction: Direction, inventory: Option<InventoryRef>) -> TradeDocument {
        TradeDocument {
            id: DocumentId::new(),
            number: "CN-009".into(),
            status: DocumentStatus::Pending,
            direction,
            party_account_id: AccountId::new(),
            issue_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            exchange_rate: Decimal::ONE,
            reverse_charge: false,
            lines: vec![TradeLine {
                category_account_id: AccountId::new(),
                quantity: dec!(4),
                unit_price: dec!(125.00),
                discount: dec!(0),
                vat_rate: dec!(5),
                vat_inclusive: true,
                excise_amount: dec!(0),
                inventory,
            }],
        }
    }

    fn amount_on(journal: &Journal, account: AccountId, side: Side) -> Decimal {
        journal
            .lines()
            .iter()
            .filter(|l| l.account_id == account && l.side == side)
            .map(|l| l.amount)
            .sum()
    }

    #[test]
    fn credit_note_mirrors_the_sales_invoice() {
        let roles = roles();
        let doc = doc(Direction::Sales, None);
        let category = doc.lines[0].category_account_id;

        let journal = derive_credit_note(&doc, &roles, folio_shared::types::UserId::new())
            .unwrap()
            .journal;

        // 500.00 gross, 5% inclusive: VAT 23.81, net 476.19, all sides
        // flipped relative to the invoice posting.
        assert_eq!(
            amount_on(&journal, doc.party_account_id, Side::Credit),
            dec!(500.00)
        );
        assert_eq!(amount_on(&journal, category, Side::Debit), dec!(476.19));
        assert_eq!(amount_on(&journal, roles.output_vat, Side::Debit), dec!(23.81));
        assert!(journal.totals().is_balanced());
        assert_eq!(
            journal.reference.reference_type,
            ReferenceType::CreditNote
        );
        assert_eq!(
            journal.description,
            "Journal Entry Against Credit Note Number CN-009"
        );
    }

    #[test]
    fn credit_note_restocks_returned_units() {
        let roles = roles();
        let doc = doc(
            Direction::Sales,
            Some(InventoryRef {
                product_id: ProductId::new(),
                unit_cost: dec!(80.00),
            }),
        );

        let plan = derive_credit_note(&doc, &roles, folio_shared::types::UserId::new()).unwrap();

        // The cost pair comes back mirrored: stock asset debited, cost of
        // goods sold credited.
        assert_eq!(
            amount_on(&plan.journal, roles.inventory_asset, Side::Debit),
            dec!(320.00)
        );
        assert_eq!(
            amount_on(&plan.journal, roles.cost_of_goods_sold, Side::Credit),
            dec!(320.00)
        );

        assert_eq!(plan.stock_effects.len(), 1);
        assert_eq!(plan.stock_effects[0].flow, MovementFlow::ReturnIn);
        assert_eq!(plan.stock_effects[0].stock_delta(), dec!(4));
    }

    #[test]
    fn debit_note_mirrors_the_purchase_invoice() {
        let roles = roles();
        let doc = doc(Direction::Purchase, None);
        let category = doc.lines[0].category_account_id;

        let plan = derive_debit_note(&doc, &roles, folio_shared::types::UserId::new()).unwrap();

        assert_eq!(
            amount_on(&plan.journal, doc.party_account_id, Side::Debit),
            dec!(500.00)
        );
        assert_eq!(amount_on(&plan.journal, category, Side::Credit), dec!(476.19));
        assert_eq!(
            amount_on(&plan.journal, roles.input_vat, Side::Credit),
            dec!(23.81)
        );
        assert_eq!(
            plan.journal.reference.reference_type,
            ReferenceType::DebitNote
        );
        assert!(plan.stock_effects.is_empty());
    }
}
