//! Strategy dispatch and the at-most-once guard.

use folio_shared::types::UserId;

use super::error::PostingError;
use super::types::{ChartRoles, PostingPlan, SourceDocument};
use super::{expense, invoice, note, opening_balance, reconcile, vat_payment};

/// Derives posting plans from document snapshots.
///
/// Stateless; the repository layer is responsible for loading the snapshot
/// under a row lock and applying the returned plan atomically, which is
/// what makes the status guard here race-free.
pub struct PostingService;

impl PostingService {
    /// Selects the strategy for the document's kind and derives its plan.
    ///
    /// # Errors
    ///
    /// `AlreadyPosted` when the document is at or beyond the posted state;
    /// otherwise whatever the selected strategy fails with.
    pub fn derive(
        document: &SourceDocument,
        roles: &ChartRoles,
        user: UserId,
    ) -> Result<PostingPlan, PostingError> {
        if !document.status().can_post() {
            return Err(PostingError::AlreadyPosted(document.id()));
        }

        match document {
            SourceDocument::Invoice(doc) => invoice::derive(doc, roles, user),
            SourceDocument::CreditNote(doc) => note::derive_credit_note(doc, roles, user),
            SourceDocument::DebitNote(doc) => note::derive_debit_note(doc, roles, user),
            SourceDocument::Expense(doc) => expense::derive(doc, roles, user),
            SourceDocument::Reconciliation(doc) => reconcile::derive(doc, roles, user),
            SourceDocument::VatPayment(doc) => vat_payment::derive(doc, roles, user),
            SourceDocument::OpeningBalance(doc) => opening_balance::derive(doc, roles, user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use folio_shared::types::{AccountId, DocumentId, UserId};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::document::kind::Direction;
    use crate::document::status::DocumentStatus;
    use crate::ledger::journal::ReferenceType;
    use crate::posting::types::{TradeDocument, TradeLine};

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

    fn invoice(status: DocumentStatus) -> SourceDocument {
        SourceDocument::Invoice(TradeDocument {
            id: DocumentId::new(),
            number: "INV-777".into(),
            status,
            direction: Direction::Sales,
            party_account_id: AccountId::new(),
            issue_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            exchange_rate: Decimal::ONE,
            reverse_charge: false,
            lines: vec![TradeLine {
                category_account_id: AccountId::new(),
                quantity: dec!(1),
                unit_price: dec!(100.00),
                discount: dec!(0),
                vat_rate: dec!(0),
                vat_inclusive: false,
                excise_amount: dec!(0),
                inventory: None,
            }],
        })
    }

    #[test]
    fn pending_documents_post() {
        let plan = PostingService::derive(&invoice(DocumentStatus::Pending), &roles(), UserId::new())
            .unwrap();
        assert_eq!(plan.new_status, DocumentStatus::Posted);
        assert_eq!(
            plan.journal.reference.reference_type,
            ReferenceType::Invoice
        );
    }

    #[test]
    fn posted_and_beyond_is_rejected() {
        for status in [
            DocumentStatus::Posted,
            DocumentStatus::PartiallyPaid,
            DocumentStatus::Paid,
        ] {
            let document = invoice(status);
            let err = PostingService::derive(&document, &roles(), UserId::new()).unwrap_err();
            assert_eq!(err, PostingError::AlreadyPosted(document.id()));
        }
    }
}
