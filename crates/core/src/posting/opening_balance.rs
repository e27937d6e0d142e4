//! Opening balance posting strategy.
//!
//! The account takes its balance on the natural side of its class: assets
//! and expenses debit, liabilities, equity, and income credit. A negative
//! balance flips both sides. The reciprocal leg goes to the configured
//! offset account. Opening balances are functional-currency figures, so
//! the rate is fixed at 1.

use rust_decimal::Decimal;

use folio_shared::types::UserId;

use crate::document::kind::DocumentKind;
use crate::document::status::DocumentStatus;
use crate::ledger::journal::{Journal, PostingReference, ReferenceType};
use crate::ledger::line::JournalLine;
use crate::money::rounding::round_money;

use super::error::PostingError;
use super::types::{ChartRoles, OpeningBalanceDocument, PostingPlan, journal_description};

/// Derives the posting plan for an opening balance.
///
/// # Errors
///
/// Fails when the derived line set does not satisfy the double-entry rules,
/// for example on a zero balance.
pub fn derive(
    doc: &OpeningBalanceDocument,
    _roles: &ChartRoles,
    user: UserId,
) -> Result<PostingPlan, PostingError> {
    let mut amount = round_money(doc.amount);
    let mut side = doc.account_class.natural_side();
    if amount < Decimal::ZERO {
        amount = -amount;
        side = side.flipped();
    }

    let date = doc.date;
    let lines = vec![
        JournalLine::on_side(side, doc.account_id, amount, Decimal::ONE, date),
        JournalLine::on_side(side.flipped(), doc.offset_account_id, amount, Decimal::ONE, date),
    ];

    let journal = Journal::balanced(
        PostingReference::new(ReferenceType::OpeningBalance, doc.id),
        &doc.number,
        journal_description(DocumentKind::OpeningBalance, &doc.number),
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
