//! Balanced journal model.
//!
//! This module implements the append-only double-entry record:
//! - Journal line items (one debit or credit leg each)
//! - The Journal aggregate with its balance invariant
//! - Business rule validation for line sets
//!
//! Journals are derived by the posting strategies and persisted by the
//! repository layer; once posted they are never mutated except for the
//! one-way reversal and delete flags.

pub mod journal;
pub mod line;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use journal::{Journal, JournalTotals, PostingReference, ReferenceType};
pub use line::{JournalLine, Side};
pub use validation::{JournalValidationError, validate_lines};
