//! Journal line items.
//!
//! A line carries exactly one leg of a journal: it is either a debit or a
//! credit against a single account, never both. Amounts are stored in the
//! functional currency after the exchange rate has been applied; the rate
//! itself is kept on the line for audit.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_shared::types::AccountId;

/// Which side of the ledger a line posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Increases asset and expense accounts.
    Debit,
    /// Increases liability, equity, and income accounts.
    Credit,
}

impl Side {
    /// The opposite side, used when deriving mirror lines.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debit => write!(f, "debit"),
            Self::Credit => write!(f, "credit"),
        }
    }
}

/// A single debit or credit leg of a journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Ledger account the amount posts against.
    pub account_id: AccountId,
    /// Debit or credit.
    pub side: Side,
    /// Positive amount in the functional currency.
    pub amount: Decimal,
    /// Rate used to convert the document currency into the functional
    /// currency. `1` for documents already in the functional currency.
    pub exchange_rate: Decimal,
    /// Effective date of the leg. Usually the journal date, but
    /// reconciliation legs carry the bank transaction date.
    pub posting_date: NaiveDate,
    /// Free-form memo shown in ledger reports.
    pub memo: Option<String>,
}

impl JournalLine {
    /// Creates a debit leg.
    #[must_use]
    pub const fn debit(
        account_id: AccountId,
        amount: Decimal,
        exchange_rate: Decimal,
        posting_date: NaiveDate,
    ) -> Self {
        Self {
            account_id,
            side: Side::Debit,
            amount,
            exchange_rate,
            posting_date,
            memo: None,
        }
    }

    /// Creates a credit leg.
    #[must_use]
    pub const fn credit(
        account_id: AccountId,
        amount: Decimal,
        exchange_rate: Decimal,
        posting_date: NaiveDate,
    ) -> Self {
        Self {
            account_id,
            side: Side::Credit,
            amount,
            exchange_rate,
            posting_date,
            memo: None,
        }
    }

    /// Creates a leg on the given side.
    #[must_use]
    pub const fn on_side(
        side: Side,
        account_id: AccountId,
        amount: Decimal,
        exchange_rate: Decimal,
        posting_date: NaiveDate,
    ) -> Self {
        Self {
            account_id,
            side,
            amount,
            exchange_rate,
            posting_date,
            memo: None,
        }
    }

    /// Attaches a memo, builder style.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Debit portion of the line (zero for credit lines).
    #[must_use]
    pub fn debit_amount(&self) -> Decimal {
        match self.side {
            Side::Debit => self.amount,
            Side::Credit => Decimal::ZERO,
        }
    }

    /// Credit portion of the line (zero for debit lines).
    #[must_use]
    pub fn credit_amount(&self) -> Decimal {
        match self.side {
            Side::Credit => self.amount,
            Side::Debit => Decimal::ZERO,
        }
    }

    /// Signed impact on the account: debits positive, credits negative.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.side {
            Side::Debit => self.amount,
            Side::Credit => -self.amount,
        }
    }

    /// A line identical to this one but on the opposite side.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            side: self.side.flipped(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn debit_line_has_zero_credit_amount() {
        let line = JournalLine::debit(AccountId::new(), dec!(100.00), dec!(1), day());
        assert_eq!(line.debit_amount(), dec!(100.00));
        assert_eq!(line.credit_amount(), dec!(0));
        assert_eq!(line.signed_amount(), dec!(100.00));
    }

    #[test]
    fn credit_line_has_zero_debit_amount() {
        let line = JournalLine::credit(AccountId::new(), dec!(42.50), dec!(1), day());
        assert_eq!(line.debit_amount(), dec!(0));
        assert_eq!(line.credit_amount(), dec!(42.50));
        assert_eq!(line.signed_amount(), dec!(-42.50));
    }

    #[test]
    fn mirrored_swaps_side_and_keeps_amount() {
        let line = JournalLine::debit(AccountId::new(), dec!(75.00), dec!(3.6725), day())
            .with_memo("AR leg");
        let mirror = line.mirrored();
        assert_eq!(mirror.side, Side::Credit);
        assert_eq!(mirror.amount, line.amount);
        assert_eq!(mirror.exchange_rate, line.exchange_rate);
        assert_eq!(mirror.memo, line.memo);
    }

    #[test]
    fn side_flips_round_trip() {
        assert_eq!(Side::Debit.flipped(), Side::Credit);
        assert_eq!(Side::Credit.flipped().flipped(), Side::Credit);
    }
}
