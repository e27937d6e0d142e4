//! Mirror journal construction.
//!
//! The mirror is built from the lines the original posting persisted, not
//! re-derived from the document. A document edited after posting would
//! derive different legs today; only the stored lines say what actually
//! hit the ledger, so only they can cancel it exactly.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use folio_shared::types::{AccountId, UserId};

use crate::ledger::journal::{Journal, PostingReference};
use crate::ledger::line::{JournalLine, Side};
use crate::posting::error::PostingError;
use crate::posting::types::{SourceDocument, reversal_description};

/// A persisted ledger line as the reversal planner sees it.
///
/// Loaded by the repository layer from every journal carrying the
/// document's reference, across the document's full posting history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostedLine {
    /// Account the line posted to.
    pub account_id: AccountId,
    /// Side the amount sits on.
    pub side: Side,
    /// Posted amount, functional currency. Always positive.
    pub amount: Decimal,
    /// Rate the posting applied.
    pub exchange_rate: Decimal,
    /// True when a previous reversal already flagged this line.
    pub reversed: bool,
}

/// Builds the mirror journal cancelling a document's active lines.
///
/// Lines already flagged reversed are left out; they were cancelled by an
/// earlier pass and mirroring them again would double the correction.
///
/// # Errors
///
/// Returns [`PostingError::NotPosted`] when the document has no persisted
/// lines at all, and [`PostingError::AlreadyReversed`] when lines exist
/// but every one of them is already flagged.
pub fn mirror_journal(
    document: &SourceDocument,
    posted: &[PostedLine],
    reversal_date: NaiveDate,
    user: UserId,
) -> Result<Journal, PostingError> {
    if posted.is_empty() {
        return Err(PostingError::NotPosted(document.id()));
    }

    let mirrored: Vec<JournalLine> = posted
        .iter()
        .filter(|line| !line.reversed)
        .map(|line| {
            JournalLine::on_side(
                line.side.flipped(),
                line.account_id,
                line.amount,
                line.exchange_rate,
                reversal_date,
            )
        })
        .collect();
    if mirrored.is_empty() {
        return Err(PostingError::AlreadyReversed(document.id()));
    }

    let journal = Journal::balanced(
        PostingReference::new(document.reference_type(), document.id()),
        document.number(),
        reversal_description(document.kind(), document.number()),
        reversal_date,
        reversal_date,
        user,
        mirrored,
    )?;
    Ok(journal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_shared::types::DocumentId;
    use rust_decimal_macros::dec;

    use crate::document::kind::Direction;
    use crate::document::status::DocumentStatus;
    use crate::ledger::journal::ReferenceType;
    use crate::posting::types::TradeDocument;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 20).unwrap()
    }

    fn posted_invoice() -> SourceDocument {
        SourceDocument::Invoice(TradeDocument {
            id: DocumentId::new(),
            number: "INV-042".into(),
            status: DocumentStatus::Posted,
            direction: Direction::Sales,
            party_account_id: AccountId::new(),
            issue_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            exchange_rate: Decimal::ONE,
            reverse_charge: false,
            lines: Vec::new(),
        })
    }

    fn posted_line(side: Side, amount: Decimal) -> PostedLine {
        PostedLine {
            account_id: AccountId::new(),
            side,
            amount,
            exchange_rate: Decimal::ONE,
            reversed: false,
        }
    }

    #[test]
    fn mirror_swaps_sides_and_keeps_amounts() {
        let doc = posted_invoice();
        let posted = vec![
            posted_line(Side::Debit, dec!(1000.00)),
            posted_line(Side::Credit, dec!(952.38)),
            posted_line(Side::Credit, dec!(47.62)),
        ];

        let mirror = mirror_journal(&doc, &posted, day(), UserId::new()).unwrap();

        assert_eq!(mirror.lines().len(), 3);
        for (original, mirrored) in posted.iter().zip(mirror.lines()) {
            assert_eq!(mirrored.side, original.side.flipped());
            assert_eq!(mirrored.amount, original.amount);
            assert_eq!(mirrored.account_id, original.account_id);
            assert_eq!(mirrored.posting_date, day());
        }
        assert!(mirror.totals().is_balanced());
        assert_eq!(mirror.reference.reference_type, ReferenceType::Invoice);
        assert_eq!(mirror.reference.reference_id, doc.id());
        assert_eq!(
            mirror.description,
            "Reversal Of Journal Entry Against Invoice Number INV-042"
        );
    }

    #[test]
    fn document_with_no_lines_is_not_posted() {
        let doc = posted_invoice();
        let err = mirror_journal(&doc, &[], day(), UserId::new()).unwrap_err();
        assert_eq!(err, PostingError::NotPosted(doc.id()));
    }

    #[test]
    fn fully_flagged_history_is_already_reversed() {
        let doc = posted_invoice();
        let mut posted = vec![
            posted_line(Side::Debit, dec!(100.00)),
            posted_line(Side::Credit, dec!(100.00)),
        ];
        for line in &mut posted {
            line.reversed = true;
        }

        let err = mirror_journal(&doc, &posted, day(), UserId::new()).unwrap_err();
        assert_eq!(err, PostingError::AlreadyReversed(doc.id()));
    }

    #[test]
    fn flagged_lines_are_excluded_from_the_mirror() {
        let doc = posted_invoice();
        let mut stale = posted_line(Side::Debit, dec!(40.00));
        stale.reversed = true;
        let mut stale_offset = posted_line(Side::Credit, dec!(40.00));
        stale_offset.reversed = true;
        let posted = vec![
            stale,
            stale_offset,
            posted_line(Side::Debit, dec!(250.00)),
            posted_line(Side::Credit, dec!(250.00)),
        ];

        let mirror = mirror_journal(&doc, &posted, day(), UserId::new()).unwrap();

        assert_eq!(mirror.lines().len(), 2);
        assert_eq!(mirror.total_amount(), dec!(250.00));
    }
}
