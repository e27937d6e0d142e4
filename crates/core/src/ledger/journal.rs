//! The Journal aggregate.
//!
//! A journal is the balanced set of debit and credit lines derived from one
//! source document, stamped with the document it came from so the ledger can
//! always be traced back to its origin.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_shared::types::{DocumentId, UserId};

use super::line::JournalLine;
use super::validation::{JournalValidationError, validate_lines};

/// The kind of source document a journal was derived from.
///
/// Stored on every journal and journal line so ledger rows can be traced
/// back to the document that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceType {
    /// Customer or supplier invoice.
    Invoice,
    /// Expense claim or payment.
    Expense,
    /// Credit note raised against an invoice.
    CreditNote,
    /// Debit note raised against an invoice.
    DebitNote,
    /// Bank transaction explained against a ledger category.
    TransactionReconsile,
    /// Bank transaction explained against an open invoice.
    TransactionReconsileInvoice,
    /// VAT settlement with the tax authority.
    VatPayment,
    /// Opening balance taken on by an account.
    OpeningBalance,
}

impl ReferenceType {
    /// Canonical wire and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invoice => "INVOICE",
            Self::Expense => "EXPENSE",
            Self::CreditNote => "CREDIT_NOTE",
            Self::DebitNote => "DEBIT_NOTE",
            Self::TransactionReconsile => "TRANSACTION_RECONSILE",
            Self::TransactionReconsileInvoice => "TRANSACTION_RECONSILE_INVOICE",
            Self::VatPayment => "VAT_PAYMENT",
            Self::OpeningBalance => "OPENING_BALANCE",
        }
    }
}

impl std::fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReferenceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INVOICE" => Ok(Self::Invoice),
            "EXPENSE" => Ok(Self::Expense),
            "CREDIT_NOTE" => Ok(Self::CreditNote),
            "DEBIT_NOTE" => Ok(Self::DebitNote),
            "TRANSACTION_RECONSILE" => Ok(Self::TransactionReconsile),
            "TRANSACTION_RECONSILE_INVOICE" => Ok(Self::TransactionReconsileInvoice),
            "VAT_PAYMENT" => Ok(Self::VatPayment),
            "OPENING_BALANCE" => Ok(Self::OpeningBalance),
            other => Err(format!("unknown reference type: {other}")),
        }
    }
}

/// Identifies the document a journal was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingReference {
    /// Kind of source document.
    pub reference_type: ReferenceType,
    /// Id of the source document.
    pub reference_id: DocumentId,
}

impl PostingReference {
    /// Builds a reference to a document.
    #[must_use]
    pub const fn new(reference_type: ReferenceType, reference_id: DocumentId) -> Self {
        Self {
            reference_type,
            reference_id,
        }
    }
}

/// Running debit and credit totals of a line set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalTotals {
    /// Sum of all debit legs.
    pub debits: Decimal,
    /// Sum of all credit legs.
    pub credits: Decimal,
}

impl JournalTotals {
    /// Sums the two sides of a line set.
    #[must_use]
    pub fn of(lines: &[JournalLine]) -> Self {
        let mut totals = Self {
            debits: Decimal::ZERO,
            credits: Decimal::ZERO,
        };
        for line in lines {
            totals.debits += line.debit_amount();
            totals.credits += line.credit_amount();
        }
        totals
    }

    /// True when both sides sum to the same amount.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debits == self.credits
    }
}

/// A balanced journal ready to be persisted.
///
/// Construction goes through [`Journal::balanced`], which rejects any line
/// set that does not satisfy the double-entry rules. Code holding a
/// `Journal` may therefore assume its debits equal its credits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    /// Source document this journal was derived from.
    pub reference: PostingReference,
    /// Human-readable number of the source document.
    pub reference_no: String,
    /// Narration shown in ledger reports.
    pub description: String,
    /// Accounting date of the journal.
    pub journal_date: NaiveDate,
    /// Date of the underlying business event.
    pub transaction_date: NaiveDate,
    /// User on whose behalf the journal is posted.
    pub created_by: UserId,
    lines: Vec<JournalLine>,
}

impl Journal {
    /// Builds a journal from its lines, enforcing the double-entry rules.
    ///
    /// # Errors
    ///
    /// Returns [`JournalValidationError`] when the line set is empty, has a
    /// single line, contains a non-positive amount, posts to only one side,
    /// or does not balance.
    pub fn balanced(
        reference: PostingReference,
        reference_no: impl Into<String>,
        description: impl Into<String>,
        journal_date: NaiveDate,
        transaction_date: NaiveDate,
        created_by: UserId,
        lines: Vec<JournalLine>,
    ) -> Result<Self, JournalValidationError> {
        validate_lines(&lines)?;
        Ok(Self {
            reference,
            reference_no: reference_no.into(),
            description: description.into(),
            journal_date,
            transaction_date,
            created_by,
            lines,
        })
    }

    /// The validated line set.
    #[must_use]
    pub fn lines(&self) -> &[JournalLine] {
        &self.lines
    }

    /// Consumes the journal, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<JournalLine> {
        self.lines
    }

    /// Debit and credit totals. Equal by construction.
    #[must_use]
    pub fn totals(&self) -> JournalTotals {
        JournalTotals::of(&self.lines)
    }

    /// Total value moved by the journal (the amount on either side).
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.totals().debits
    }
}
