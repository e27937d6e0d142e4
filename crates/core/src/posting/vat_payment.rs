//! VAT settlement posting strategy.
//!
//! Paying the authority debits the VAT payable control account and credits
//! the bank account the money left. A reclaim is the same journal with the
//! sides swapped. Settlements are always in the functional currency, so
//! the rate is fixed at 1.

use rust_decimal::Decimal;

use folio_shared::types::UserId;

use crate::document::kind::DocumentKind;
use crate::document::status::DocumentStatus;
use crate::ledger::journal::{Journal, PostingReference, ReferenceType};
use crate::ledger::line::JournalLine;
use crate::money::rounding::round_money;

use super::error::PostingError;
use super::types::{ChartRoles, PostingPlan, VatPaymentDocument, journal_description};

/// Derives the posting plan for a VAT settlement.
///
/// # Errors
///
/// Fails when the derived line set does not satisfy the double-entry rules,
/// for example on a zero settlement amount.
pub fn derive(
    doc: &VatPaymentDocument,
    _roles: &ChartRoles,
    user: UserId,
) -> Result<PostingPlan, PostingError> {
    let amount = round_money(doc.amount);
    let date = doc.date;

    let lines = if doc.reclaim {
        vec![
            JournalLine::debit(doc.deposit_account_id, amount, Decimal::ONE, date),
            JournalLine::credit(doc.vat_account_id, amount, Decimal::ONE, date),
        ]
    } else {
        vec![
            JournalLine::debit(doc.vat_account_id, amount, Decimal::ONE, date),
            JournalLine::credit(doc.deposit_account_id, amount, Decimal::ONE, date),
        ]
    };

    let journal = Journal::balanced(
        PostingReference::new(ReferenceType::VatPayment, doc.id),
        &doc.number,
        journal_description(DocumentKind::VatPayment, &doc.number),
        date,
        date,
        user,
        lines,
    )?;

    Ok(PostingPlan {
        journal,
        new_status: DocumentStatus::Posted,
        stock_effects: Vec::new(),
        settlement: None,
    })
}
