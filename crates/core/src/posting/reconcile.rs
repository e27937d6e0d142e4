//! Bank reconciliation posting strategy.
//!
//! Explaining a bank transaction books the money against what it was for.
//! The generic form posts the explained category against the bank's own
//! account, sides chosen by which way the money moved. The invoice forms
//! settle open invoices instead: a customer receipt debits the bank and
//! credits accounts receivable, a supplier payment debits accounts payable
//! and credits the bank. Both legs carry the transaction's due amount at
//! the stored exchange rate, dated on the bank transaction.

use rust_decimal::Decimal;

use folio_shared::types::UserId;

use crate::document::kind::DocumentKind;
use crate::document::status::DocumentStatus;
use crate::ledger::journal::{Journal, PostingReference, ReferenceType};
use crate::ledger::line::JournalLine;
use crate::money::exchange::to_functional;

use super::error::PostingError;
use super::types::{ChartRoles, PostingPlan, ReconciliationDocument, ReconciliationTarget,
    journal_description};

/// Derives the posting plan for a bank reconciliation.
///
/// # Errors
///
/// Fails when the stored exchange rate is unusable or the derived line set
/// does not satisfy the double-entry rules.
pub fn derive(
    doc: &ReconciliationDocument,
    roles: &ChartRoles,
    user: UserId,
) -> Result<PostingPlan, PostingError> {
    if doc.exchange_rate <= Decimal::ZERO {
        return Err(PostingError::MissingReferenceData(format!(
            "usable exchange rate for bank transaction {}",
            doc.number
        )));
    }

    let rate = doc.exchange_rate;
    let date = doc.transaction_date;
    let amount = to_functional(doc.amount, rate);

    let (reference_type, lines) = match doc.target {
        ReconciliationTarget::Category { account_id } => {
            // Money out of the bank lands in the explained category; money
            // in comes from it.
            let legs = if doc.is_debit_from_bank {
                vec![
                    JournalLine::debit(account_id, amount, rate, date),
                    JournalLine::credit(doc.bank_account_id, amount, rate, date),
                ]
            } else {
                vec![
                    JournalLine::debit(doc.bank_account_id, amount, rate, date),
                    JournalLine::credit(account_id, amount, rate, date),
                ]
            };
            (ReferenceType::TransactionReconsile, legs)
        }
        ReconciliationTarget::CustomerInvoice => (
            ReferenceType::TransactionReconsileInvoice,
            vec![
                JournalLine::debit(doc.bank_account_id, amount, rate, date),
                JournalLine::credit(roles.accounts_receivable, amount, rate, date),
            ],
        ),
        ReconciliationTarget::SupplierInvoice => (
            ReferenceType::TransactionReconsileInvoice,
            vec![
                JournalLine::debit(roles.accounts_payable, amount, rate, date),
                JournalLine::credit(doc.bank_account_id, amount, rate, date),
            ],
        ),
    };

    let journal = Journal::balanced(
        PostingReference::new(reference_type, doc.id),
        &doc.number,
        journal_description(DocumentKind::Reconciliation, &doc.number),
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
