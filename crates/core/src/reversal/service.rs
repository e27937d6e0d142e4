//! The reversal planner.
//!
//! Builds the full set of changes one reversal applies: the mirror journal,
//! the status the document winds back to, and the cascades that retire
//! whatever the posting created outside the ledger. The repository layer
//! executes the plan inside a single unit of work; a plan is never
//! half-applied.

use chrono::NaiveDate;

use folio_shared::types::UserId;

use crate::document::status::DocumentStatus;
use crate::inventory::stock::{MovementFlow, StockEffect, reversal_effects};
use crate::ledger::journal::Journal;
use crate::posting::error::PostingError;
use crate::posting::types::{ExpensePayment, SourceDocument};

use super::mirror::{PostedLine, mirror_journal};

/// Bank-side rows to remove when a posting is reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankCascade {
    /// Nothing on the bank side to undo.
    None,
    /// The posting settled an expense from bank or cash: delete the link
    /// row, delete the derived transaction's explanation, and soft-delete
    /// the transaction itself.
    RemoveSettlement,
    /// The posting explained a bank transaction: delete the explanation,
    /// reopen the transaction, and restore any due amount the explanation
    /// had settled on a linked invoice.
    Unexplain,
}

/// Everything the repository layer must apply atomically for one reversal.
///
/// The persisted lines the mirror cancels are flagged reversed in the same
/// unit, and the mirror itself is stored already flagged, so the document's
/// whole history drops out of active ledger views together and a repeat
/// reversal finds nothing left to cancel.
#[derive(Debug, Clone)]
pub struct ReversalPlan {
    /// The mirror journal cancelling the active lines.
    pub mirror: Journal,
    /// Status the document winds back to.
    pub reverted_status: DocumentStatus,
    /// True when the document's due amount returns to its full total.
    pub reset_due_amount: bool,
    /// True when the original lines are soft-deleted as well as flagged.
    /// Set for expenses only.
    pub mark_lines_deleted: bool,
    /// Inventory movements undoing what the posting applied.
    pub stock_effects: Vec<StockEffect>,
    /// Bank-side rows to remove.
    pub bank_cascade: BankCascade,
    /// Caller-supplied comment to append to the document's notes.
    pub notes_append: Option<String>,
}

/// Plans reversals of posted documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReversalService;

impl ReversalService {
    /// Builds the reversal plan for a document from its persisted lines.
    ///
    /// # Errors
    ///
    /// Returns [`PostingError::NotPosted`] when no lines were ever posted,
    /// [`PostingError::AlreadyReversed`] when all of them are flagged, and
    /// [`PostingError::Unbalanced`] when the active lines do not cancel
    /// cleanly, which means the stored history itself is damaged.
    pub fn plan(
        document: &SourceDocument,
        posted: &[PostedLine],
        reversal_date: NaiveDate,
        user: UserId,
        comment: Option<&str>,
    ) -> Result<ReversalPlan, PostingError> {
        let mirror = mirror_journal(document, posted, reversal_date, user)?;

        let stock_effects = match document {
            SourceDocument::Invoice(doc) => reversal_effects(
                MovementFlow::for_invoice(doc.direction),
                &doc.tracked_lines(),
            ),
            SourceDocument::CreditNote(doc) | SourceDocument::DebitNote(doc) => {
                reversal_effects(MovementFlow::for_note(doc.direction), &doc.tracked_lines())
            }
            _ => Vec::new(),
        };

        let bank_cascade = match document {
            SourceDocument::Expense(doc) => match doc.payment {
                ExpensePayment::Bank { .. } | ExpensePayment::Cash => BankCascade::RemoveSettlement,
                ExpensePayment::Credit { .. } => BankCascade::None,
            },
            SourceDocument::Reconciliation(_) => BankCascade::Unexplain,
            _ => BankCascade::None,
        };

        Ok(ReversalPlan {
            mirror,
            reverted_status: DocumentStatus::reverted_for(document.kind()),
            reset_due_amount: matches!(
                document,
                SourceDocument::Invoice(_)
                    | SourceDocument::CreditNote(_)
                    | SourceDocument::DebitNote(_)
            ),
            mark_lines_deleted: matches!(document, SourceDocument::Expense(_)),
            stock_effects,
            bank_cascade,
            notes_append: comment.map(str::to_owned),
        })
    }
}
