//! Posting and reversal failure modes.

use thiserror::Error;

use folio_shared::types::DocumentId;

use crate::ledger::validation::JournalValidationError;

/// Why a posting or reversal request was rejected.
///
/// Every variant aborts the whole unit of work; no partial journal, status
/// change, or cascade is ever committed alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostingError {
    /// A strategy produced a line set that breaks the double-entry rules.
    #[error("derived journal is invalid: {0}")]
    Unbalanced(#[from] JournalValidationError),

    /// A category, VAT, or exchange-rate lookup the document needs returned
    /// nothing.
    #[error("missing reference data: {0}")]
    MissingReferenceData(String),

    /// The document is at or beyond the posted state.
    #[error("document {0} is already posted")]
    AlreadyPosted(DocumentId),

    /// No journal lines exist for the document.
    #[error("document {0} has not been posted")]
    NotPosted(DocumentId),

    /// Journal lines exist but every one is already reversal-flagged.
    #[error("document {0} is already reversed")]
    AlreadyReversed(DocumentId),

    /// A row the reversal cascade expected (inventory, settlement link) was
    /// not found. Skipping the cascade would corrupt dependent state, so
    /// the reversal aborts instead.
    #[error("cascade state is inconsistent: {0}")]
    CascadeInconsistency(String),
}

impl PostingError {
    /// Stable machine-readable code for API envelopes.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unbalanced(_) => "UNBALANCED_JOURNAL",
            Self::MissingReferenceData(_) => "MISSING_REFERENCE_DATA",
            Self::AlreadyPosted(_) => "ALREADY_POSTED",
            Self::NotPosted(_) => "NOT_POSTED",
            Self::AlreadyReversed(_) => "ALREADY_REVERSED",
            Self::CascadeInconsistency(_) => "CASCADE_INCONSISTENCY",
        }
    }
}
