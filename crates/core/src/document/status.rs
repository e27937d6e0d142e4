//! The document status machine.
//!
//! The posting engine is the only writer of the forward transition into
//! `Posted`; the reversal engine is the only writer of the transition back.
//! Payment application moves posted invoices onward to `PartiallyPaid` and
//! `Paid`, which still count as posted for the at-most-once check.

use serde::{Deserialize, Serialize};

use super::kind::DocumentKind;

/// Lifecycle state of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Being drafted; not yet submitted.
    Draft,
    /// Awaiting posting.
    Pending,
    /// Posted to the ledger.
    Posted,
    /// Posted and partially settled.
    PartiallyPaid,
    /// Posted and fully settled.
    Paid,
}

impl DocumentStatus {
    /// Canonical storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Posted => "posted",
            Self::PartiallyPaid => "partially_paid",
            Self::Paid => "paid",
        }
    }

    /// True when the document may be posted.
    #[must_use]
    pub fn can_post(self) -> bool {
        matches!(self, Self::Draft | Self::Pending)
    }

    /// True when the document is at or beyond `Posted`.
    #[must_use]
    pub fn is_posted(self) -> bool {
        matches!(self, Self::Posted | Self::PartiallyPaid | Self::Paid)
    }

    /// The status a reversed document returns to.
    ///
    /// Expenses go back to the drafting table; trading documents return to
    /// the posting queue.
    #[must_use]
    pub fn reverted_for(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Expense => Self::Draft,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "posted" => Ok(Self::Posted),
            "partially_paid" => Ok(Self::PartiallyPaid),
            "paid" => Ok(Self::Paid),
            other => Err(format!("unknown document status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unposted_documents_can_post() {
        assert!(DocumentStatus::Draft.can_post());
        assert!(DocumentStatus::Pending.can_post());
        assert!(!DocumentStatus::Posted.can_post());
        assert!(!DocumentStatus::PartiallyPaid.can_post());
        assert!(!DocumentStatus::Paid.can_post());
    }

    #[test]
    fn paid_states_count_as_posted() {
        assert!(DocumentStatus::Posted.is_posted());
        assert!(DocumentStatus::PartiallyPaid.is_posted());
        assert!(DocumentStatus::Paid.is_posted());
        assert!(!DocumentStatus::Pending.is_posted());
    }

    #[test]
    fn reversal_targets_depend_on_kind() {
        assert_eq!(
            DocumentStatus::reverted_for(DocumentKind::Expense),
            DocumentStatus::Draft
        );
        assert_eq!(
            DocumentStatus::reverted_for(DocumentKind::Invoice),
            DocumentStatus::Pending
        );
        assert_eq!(
            DocumentStatus::reverted_for(DocumentKind::CreditNote),
            DocumentStatus::Pending
        );
    }
}
