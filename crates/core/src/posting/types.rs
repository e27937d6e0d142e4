//! Inputs and outputs of the posting strategies.
//!
//! Strategies are pure: the repository layer resolves every account, rate,
//! and product lookup first and hands the strategy a complete snapshot.
//! A lookup that finds nothing never reaches a strategy; it surfaces as
//! [`MissingReferenceData`](super::error::PostingError::MissingReferenceData)
//! at resolution time.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_shared::types::{AccountId, BankTransactionId, DocumentId, ProductId};

use crate::document::kind::{Direction, DocumentKind, PayMode};
use crate::document::status::DocumentStatus;
use crate::inventory::stock::{StockEffect, TrackedLine};
use crate::ledger::journal::{Journal, ReferenceType};
use crate::ledger::line::Side;

/// Broad classification of a ledger account.
///
/// Determines the natural side an opening balance posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountClass {
    /// Fixed or current asset.
    Asset,
    /// Bank account.
    Bank,
    /// Cash on hand.
    Cash,
    /// Trade and other receivables.
    Receivable,
    /// Stock held for sale.
    Inventory,
    /// Current or long-term liability.
    Liability,
    /// Trade and other payables.
    Payable,
    /// Owner's equity.
    Equity,
    /// Income and gains.
    Income,
    /// Costs and losses.
    Expense,
}

impl AccountClass {
    /// The side a positive balance of this class naturally sits on.
    #[must_use]
    pub const fn natural_side(self) -> Side {
        match self {
            Self::Asset
            | Self::Bank
            | Self::Cash
            | Self::Receivable
            | Self::Inventory
            | Self::Expense => Side::Debit,
            Self::Liability | Self::Payable | Self::Equity | Self::Income => Side::Credit,
        }
    }
}

/// Well-known chart accounts the strategies post against.
///
/// Resolved once from the chart of accounts by code; the strategies never
/// look accounts up themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartRoles {
    /// Global accounts receivable control account.
    pub accounts_receivable: AccountId,
    /// Global accounts payable control account.
    pub accounts_payable: AccountId,
    /// VAT collected on sales.
    pub output_vat: AccountId,
    /// VAT paid on purchases.
    pub input_vat: AccountId,
    /// Excise duty payable.
    pub excise_duty: AccountId,
    /// Discounts granted to customers.
    pub sales_discount: AccountId,
    /// Discounts received from suppliers.
    pub purchase_discount: AccountId,
    /// Stock asset account.
    pub inventory_asset: AccountId,
    /// Cost of goods sold.
    pub cost_of_goods_sold: AccountId,
    /// Petty cash.
    pub petty_cash: AccountId,
    /// Net VAT owed to the tax authority.
    pub vat_payable: AccountId,
}

/// Snapshot of an invoice, credit note, or debit note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeDocument {
    /// Document id.
    pub id: DocumentId,
    /// Human-readable document number.
    pub number: String,
    /// Lifecycle state at the time of the request.
    pub status: DocumentStatus,
    /// Customer or supplier facing.
    pub direction: Direction,
    /// The contact's own receivable or payable account.
    pub party_account_id: AccountId,
    /// Document date; becomes the journal date.
    pub issue_date: NaiveDate,
    /// Rate into the functional currency. 1 for functional-currency
    /// documents.
    pub exchange_rate: Decimal,
    /// Buyer self-accounts for VAT. Only honored on purchase documents.
    pub reverse_charge: bool,
    /// Line items.
    pub lines: Vec<TradeLine>,
}

impl TradeDocument {
    /// Inventory-tracked lines, ready for the stock coordinator.
    #[must_use]
    pub fn tracked_lines(&self) -> Vec<TrackedLine> {
        self.lines
            .iter()
            .filter_map(|line| {
                line.inventory.as_ref().map(|inv| TrackedLine {
                    product_id: inv.product_id,
                    quantity: line.quantity,
                    unit_cost: inv.unit_cost,
                })
            })
            .collect()
    }
}

/// One line of a trading document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeLine {
    /// Income or expense category account for the line.
    pub category_account_id: AccountId,
    /// Units on the line.
    pub quantity: Decimal,
    /// Price per unit in the document currency.
    pub unit_price: Decimal,
    /// Absolute discount on the line, document currency.
    pub discount: Decimal,
    /// VAT percentage (5 means 5%). Zero when the line is not taxed.
    pub vat_rate: Decimal,
    /// True when the line amount already contains the VAT.
    pub vat_inclusive: bool,
    /// Absolute excise duty contained in the line amount, document
    /// currency. Zero when none applies.
    pub excise_amount: Decimal,
    /// Present when the line moves a stock-tracked product.
    pub inventory: Option<InventoryRef>,
}

/// Stock tracking data of a trading line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryRef {
    /// Tracked product.
    pub product_id: ProductId,
    /// Cost per unit for cost-of-sales legs and movement history.
    pub unit_cost: Decimal,
}

/// Snapshot of an expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDocument {
    /// Document id.
    pub id: DocumentId,
    /// Human-readable expense number.
    pub number: String,
    /// Lifecycle state at the time of the request.
    pub status: DocumentStatus,
    /// Expense date; becomes the journal date.
    pub date: NaiveDate,
    /// Rate into the functional currency.
    pub exchange_rate: Decimal,
    /// Recorded expense amount, document currency.
    pub amount: Decimal,
    /// VAT percentage. Zero when untaxed.
    pub vat_rate: Decimal,
    /// True when `amount` already contains the VAT.
    pub vat_inclusive: bool,
    /// Buyer self-accounts for VAT.
    pub reverse_charge: bool,
    /// Expense category account debited.
    pub category_account_id: AccountId,
    /// How the expense was settled.
    pub payment: ExpensePayment,
}

/// How an expense was settled; selects the credit-side account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpensePayment {
    /// Paid from a bank account. Posting records a settlement transaction
    /// against that account.
    Bank {
        /// The bank's own chart account.
        account_id: AccountId,
    },
    /// Paid in cash from petty cash. Posting records a settlement
    /// transaction against petty cash.
    Cash,
    /// Not yet paid; owed to the payee.
    Credit {
        /// The payee's payable account.
        payee_account_id: AccountId,
    },
}

impl ExpensePayment {
    /// The pay mode this settlement corresponds to.
    #[must_use]
    pub const fn mode(&self) -> PayMode {
        match self {
            Self::Bank { .. } => PayMode::Bank,
            Self::Cash => PayMode::Cash,
            Self::Credit { .. } => PayMode::Credit,
        }
    }
}

/// Snapshot of a bank reconciliation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationDocument {
    /// Document id.
    pub id: DocumentId,
    /// Reference number shown on the journal.
    pub number: String,
    /// Lifecycle state at the time of the request.
    pub status: DocumentStatus,
    /// The bank transaction being explained.
    pub bank_transaction_id: BankTransactionId,
    /// The bank's own chart account.
    pub bank_account_id: AccountId,
    /// Date of the bank transaction.
    pub transaction_date: NaiveDate,
    /// Unexplained amount of the transaction, document currency.
    pub amount: Decimal,
    /// Rate into the functional currency.
    pub exchange_rate: Decimal,
    /// True when the money left the bank account.
    pub is_debit_from_bank: bool,
    /// What the transaction is explained against.
    pub target: ReconciliationTarget,
}

/// What a bank transaction reconciles against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconciliationTarget {
    /// A plain ledger category; the generic fallback form.
    Category {
        /// The explained category account.
        account_id: AccountId,
    },
    /// Payment received against a customer invoice.
    CustomerInvoice,
    /// Payment made against a supplier invoice.
    SupplierInvoice,
}

/// Snapshot of a VAT settlement with the tax authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VatPaymentDocument {
    /// Document id.
    pub id: DocumentId,
    /// Filing reference number.
    pub number: String,
    /// Lifecycle state at the time of the request.
    pub status: DocumentStatus,
    /// Settlement date.
    pub date: NaiveDate,
    /// Amount settled. Always positive.
    pub amount: Decimal,
    /// True for a refund claimed back from the authority.
    pub reclaim: bool,
    /// VAT payable control account.
    pub vat_account_id: AccountId,
    /// Bank account the money moves through.
    pub deposit_account_id: AccountId,
}

/// Snapshot of an opening balance taken on by an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningBalanceDocument {
    /// Document id.
    pub id: DocumentId,
    /// Reference number shown on the journal.
    pub number: String,
    /// Lifecycle state at the time of the request.
    pub status: DocumentStatus,
    /// Effective date of the balance.
    pub date: NaiveDate,
    /// Account taking on the balance.
    pub account_id: AccountId,
    /// Class of that account; fixes the natural side.
    pub account_class: AccountClass,
    /// Offset equity account for the reciprocal leg.
    pub offset_account_id: AccountId,
    /// Balance taken on. May be negative, which flips both sides.
    pub amount: Decimal,
}

/// A posting request's document, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDocument {
    /// Customer or supplier invoice.
    Invoice(TradeDocument),
    /// Credit note amending an invoice.
    CreditNote(TradeDocument),
    /// Debit note amending an invoice.
    DebitNote(TradeDocument),
    /// Expense claim or payment.
    Expense(ExpenseDocument),
    /// Bank transaction reconciliation.
    Reconciliation(ReconciliationDocument),
    /// VAT settlement.
    VatPayment(VatPaymentDocument),
    /// Opening balance.
    OpeningBalance(OpeningBalanceDocument),
}

impl SourceDocument {
    /// The document kind driving strategy dispatch.
    #[must_use]
    pub const fn kind(&self) -> DocumentKind {
        match self {
            Self::Invoice(_) => DocumentKind::Invoice,
            Self::CreditNote(_) => DocumentKind::CreditNote,
            Self::DebitNote(_) => DocumentKind::DebitNote,
            Self::Expense(_) => DocumentKind::Expense,
            Self::Reconciliation(_) => DocumentKind::Reconciliation,
            Self::VatPayment(_) => DocumentKind::VatPayment,
            Self::OpeningBalance(_) => DocumentKind::OpeningBalance,
        }
    }

    /// The document's id.
    #[must_use]
    pub const fn id(&self) -> DocumentId {
        match self {
            Self::Invoice(d) | Self::CreditNote(d) | Self::DebitNote(d) => d.id,
            Self::Expense(d) => d.id,
            Self::Reconciliation(d) => d.id,
            Self::VatPayment(d) => d.id,
            Self::OpeningBalance(d) => d.id,
        }
    }

    /// The document's human-readable number.
    #[must_use]
    pub fn number(&self) -> &str {
        match self {
            Self::Invoice(d) | Self::CreditNote(d) | Self::DebitNote(d) => &d.number,
            Self::Expense(d) => &d.number,
            Self::Reconciliation(d) => &d.number,
            Self::VatPayment(d) => &d.number,
            Self::OpeningBalance(d) => &d.number,
        }
    }

    /// Lifecycle state at the time of the request.
    #[must_use]
    pub const fn status(&self) -> DocumentStatus {
        match self {
            Self::Invoice(d) | Self::CreditNote(d) | Self::DebitNote(d) => d.status,
            Self::Expense(d) => d.status,
            Self::Reconciliation(d) => d.status,
            Self::VatPayment(d) => d.status,
            Self::OpeningBalance(d) => d.status,
        }
    }

    /// The reference type this document's journals are stamped with.
    ///
    /// Reconciliations split by target: explaining against an open invoice
    /// is stamped differently from explaining against a plain category.
    #[must_use]
    pub const fn reference_type(&self) -> ReferenceType {
        match self {
            Self::Invoice(_) => ReferenceType::Invoice,
            Self::CreditNote(_) => ReferenceType::CreditNote,
            Self::DebitNote(_) => ReferenceType::DebitNote,
            Self::Expense(_) => ReferenceType::Expense,
            Self::Reconciliation(d) => match d.target {
                ReconciliationTarget::Category { .. } => ReferenceType::TransactionReconsile,
                ReconciliationTarget::CustomerInvoice | ReconciliationTarget::SupplierInvoice => {
                    ReferenceType::TransactionReconsileInvoice
                }
            },
            Self::VatPayment(_) => ReferenceType::VatPayment,
            Self::OpeningBalance(_) => ReferenceType::OpeningBalance,
        }
    }
}

/// Everything the repository layer must apply atomically for one posting.
#[derive(Debug, Clone)]
pub struct PostingPlan {
    /// The balanced journal to persist.
    pub journal: Journal,
    /// Status the source document moves to.
    pub new_status: DocumentStatus,
    /// Inventory movements to apply in the same unit of work.
    pub stock_effects: Vec<StockEffect>,
    /// Settlement transaction to record for bank- or cash-paid expenses.
    pub settlement: Option<SettlementInstruction>,
}

/// A cash or bank settlement derived from an expense posting.
///
/// Materialized by the repository layer as a bank transaction, its
/// explanation, and the link row tying it to the expense. Reversal deletes
/// all three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementInstruction {
    /// Chart account the money left (a bank account or petty cash).
    pub account_id: AccountId,
    /// Amount paid, functional currency.
    pub amount: Decimal,
    /// Settlement date.
    pub date: NaiveDate,
    /// Narration stored on the explanation row.
    pub memo: String,
}

/// Narration format shared by every posting strategy.
#[must_use]
pub fn journal_description(kind: DocumentKind, number: &str) -> String {
    format!("Journal Entry Against {} Number {number}", kind.label())
}

/// Narration carried by a mirror journal.
#[must_use]
pub fn reversal_description(kind: DocumentKind, number: &str) -> String {
    format!("Reversal Of Journal Entry Against {} Number {number}", kind.label())
}
