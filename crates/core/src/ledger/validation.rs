//! Double-entry validation rules.
//!
//! Every journal must satisfy these rules before it is persisted. The
//! checks run in order from cheapest to most informative so callers get
//! the most specific error first.

use rust_decimal::Decimal;
use thiserror::Error;

use super::journal::JournalTotals;
use super::line::{JournalLine, Side};

/// Why a line set cannot form a journal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalValidationError {
    /// The line set is empty.
    #[error("journal has no lines")]
    NoLines,

    /// Fewer than two lines; a balanced journal needs at least one per side.
    #[error("journal needs at least two lines, got {0}")]
    InsufficientLines(usize),

    /// A line carries a zero or negative amount.
    #[error("line amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// All lines post to the same side.
    #[error("journal posts to only one side of the ledger")]
    SingleSided,

    /// The two sides do not sum to the same amount.
    #[error("journal does not balance: debits {debits} != credits {credits}")]
    Unbalanced {
        /// Sum of the debit legs.
        debits: Decimal,
        /// Sum of the credit legs.
        credits: Decimal,
    },
}

/// Checks a line set against the double-entry rules.
///
/// # Errors
///
/// Returns the first rule the lines break, in the order: no lines, fewer
/// than two lines, non-positive amount, single-sided, unbalanced.
pub fn validate_lines(lines: &[JournalLine]) -> Result<(), JournalValidationError> {
    if lines.is_empty() {
        return Err(JournalValidationError::NoLines);
    }
    if lines.len() < 2 {
        return Err(JournalValidationError::InsufficientLines(lines.len()));
    }

    let mut has_debit = false;
    let mut has_credit = false;
    for line in lines {
        if line.amount <= Decimal::ZERO {
            return Err(JournalValidationError::InvalidAmount(line.amount));
        }
        match line.side {
            Side::Debit => has_debit = true,
            Side::Credit => has_credit = true,
        }
    }
    if !has_debit || !has_credit {
        return Err(JournalValidationError::SingleSided);
    }

    let totals = JournalTotals::of(lines);
    if !totals.is_balanced() {
        return Err(JournalValidationError::Unbalanced {
            debits: totals.debits,
            credits: totals.credits,
        });
    }

    Ok(())
}
