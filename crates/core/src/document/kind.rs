//! Document kinds and their classifying attributes.

use serde::{Deserialize, Serialize};

/// The kind of business document a posting request refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Customer or supplier invoice.
    Invoice,
    /// Expense claim or direct payment.
    Expense,
    /// Credit note raised against an invoice.
    CreditNote,
    /// Debit note raised against an invoice.
    DebitNote,
    /// Bank transaction reconciliation request.
    Reconciliation,
    /// VAT settlement or reclaim.
    VatPayment,
    /// Opening balance taken on by a ledger account.
    OpeningBalance,
}

impl DocumentKind {
    /// Canonical wire and storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Expense => "expense",
            Self::CreditNote => "credit_note",
            Self::DebitNote => "debit_note",
            Self::Reconciliation => "reconciliation",
            Self::VatPayment => "vat_payment",
            Self::OpeningBalance => "opening_balance",
        }
    }

    /// Title-case label used in journal narrations.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Invoice => "Invoice",
            Self::Expense => "Expense",
            Self::CreditNote => "Credit Note",
            Self::DebitNote => "Debit Note",
            Self::Reconciliation => "Bank Transaction",
            Self::VatPayment => "VAT Payment",
            Self::OpeningBalance => "Opening Balance",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invoice" => Ok(Self::Invoice),
            "expense" => Ok(Self::Expense),
            "credit_note" => Ok(Self::CreditNote),
            "debit_note" => Ok(Self::DebitNote),
            "reconciliation" => Ok(Self::Reconciliation),
            "vat_payment" => Ok(Self::VatPayment),
            "opening_balance" => Ok(Self::OpeningBalance),
            other => Err(format!("unknown document kind: {other}")),
        }
    }
}

/// Whether a trading document faces a customer or a supplier.
///
/// Sales documents carry receivables and output VAT; purchase documents
/// carry payables and input VAT. Credit and debit notes inherit the
/// direction of the invoice they amend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Customer-facing: revenue side.
    Sales,
    /// Supplier-facing: cost side.
    Purchase,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Sales => Self::Purchase,
            Self::Purchase => Self::Sales,
        }
    }
}

/// How an expense was settled.
///
/// The pay mode selects the credit-side account of the expense journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayMode {
    /// Paid from a bank account; credits that bank account.
    Bank,
    /// Paid in cash; credits petty cash and records a cash transaction.
    Cash,
    /// Not yet paid; credits the payee's payable account.
    Credit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_strings() {
        for kind in [
            DocumentKind::Invoice,
            DocumentKind::Expense,
            DocumentKind::CreditNote,
            DocumentKind::DebitNote,
            DocumentKind::Reconciliation,
            DocumentKind::VatPayment,
            DocumentKind::OpeningBalance,
        ] {
            let parsed: DocumentKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("receipt".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn direction_flips() {
        assert_eq!(Direction::Sales.flipped(), Direction::Purchase);
        assert_eq!(Direction::Purchase.flipped(), Direction::Sales);
    }
}
