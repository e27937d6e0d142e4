//! Database enum types and their conversions to the domain enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use folio_core::document::kind;
use folio_core::document::status;
use folio_core::inventory::stock;
use folio_core::ledger::journal;
use folio_core::posting::{AccountClass as CoreAccountClass, ReconciliationTarget};

/// Kind of source document, matching `document_kind` in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_kind")]
pub enum DocumentKind {
    #[sea_orm(string_value = "invoice")]
    Invoice,
    #[sea_orm(string_value = "expense")]
    Expense,
    #[sea_orm(string_value = "credit_note")]
    CreditNote,
    #[sea_orm(string_value = "debit_note")]
    DebitNote,
    #[sea_orm(string_value = "reconciliation")]
    Reconciliation,
    #[sea_orm(string_value = "vat_payment")]
    VatPayment,
    #[sea_orm(string_value = "opening_balance")]
    OpeningBalance,
}

impl From<kind::DocumentKind> for DocumentKind {
    fn from(value: kind::DocumentKind) -> Self {
        match value {
            kind::DocumentKind::Invoice => Self::Invoice,
            kind::DocumentKind::Expense => Self::Expense,
            kind::DocumentKind::CreditNote => Self::CreditNote,
            kind::DocumentKind::DebitNote => Self::DebitNote,
            kind::DocumentKind::Reconciliation => Self::Reconciliation,
            kind::DocumentKind::VatPayment => Self::VatPayment,
            kind::DocumentKind::OpeningBalance => Self::OpeningBalance,
        }
    }
}

impl From<DocumentKind> for kind::DocumentKind {
    fn from(value: DocumentKind) -> Self {
        match value {
            DocumentKind::Invoice => Self::Invoice,
            DocumentKind::Expense => Self::Expense,
            DocumentKind::CreditNote => Self::CreditNote,
            DocumentKind::DebitNote => Self::DebitNote,
            DocumentKind::Reconciliation => Self::Reconciliation,
            DocumentKind::VatPayment => Self::VatPayment,
            DocumentKind::OpeningBalance => Self::OpeningBalance,
        }
    }
}

/// Lifecycle state of a document, matching `document_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_status")]
pub enum DocumentStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "posted")]
    Posted,
    #[sea_orm(string_value = "partially_paid")]
    PartiallyPaid,
    #[sea_orm(string_value = "paid")]
    Paid,
}

impl From<status::DocumentStatus> for DocumentStatus {
    fn from(value: status::DocumentStatus) -> Self {
        match value {
            status::DocumentStatus::Draft => Self::Draft,
            status::DocumentStatus::Pending => Self::Pending,
            status::DocumentStatus::Posted => Self::Posted,
            status::DocumentStatus::PartiallyPaid => Self::PartiallyPaid,
            status::DocumentStatus::Paid => Self::Paid,
        }
    }
}

impl From<DocumentStatus> for status::DocumentStatus {
    fn from(value: DocumentStatus) -> Self {
        match value {
            DocumentStatus::Draft => Self::Draft,
            DocumentStatus::Pending => Self::Pending,
            DocumentStatus::Posted => Self::Posted,
            DocumentStatus::PartiallyPaid => Self::PartiallyPaid,
            DocumentStatus::Paid => Self::Paid,
        }
    }
}

/// Document a journal was derived from, matching `reference_type`.
///
/// Values keep the upper-case storage spelling the journal table has
/// always used, misspelling included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reference_type")]
pub enum ReferenceType {
    #[sea_orm(string_value = "INVOICE")]
    Invoice,
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
    #[sea_orm(string_value = "CREDIT_NOTE")]
    CreditNote,
    #[sea_orm(string_value = "DEBIT_NOTE")]
    DebitNote,
    #[sea_orm(string_value = "TRANSACTION_RECONSILE")]
    TransactionReconsile,
    #[sea_orm(string_value = "TRANSACTION_RECONSILE_INVOICE")]
    TransactionReconsileInvoice,
    #[sea_orm(string_value = "VAT_PAYMENT")]
    VatPayment,
    #[sea_orm(string_value = "OPENING_BALANCE")]
    OpeningBalance,
}

impl From<journal::ReferenceType> for ReferenceType {
    fn from(value: journal::ReferenceType) -> Self {
        match value {
            journal::ReferenceType::Invoice => Self::Invoice,
            journal::ReferenceType::Expense => Self::Expense,
            journal::ReferenceType::CreditNote => Self::CreditNote,
            journal::ReferenceType::DebitNote => Self::DebitNote,
            journal::ReferenceType::TransactionReconsile => Self::TransactionReconsile,
            journal::ReferenceType::TransactionReconsileInvoice => {
                Self::TransactionReconsileInvoice
            }
            journal::ReferenceType::VatPayment => Self::VatPayment,
            journal::ReferenceType::OpeningBalance => Self::OpeningBalance,
        }
    }
}

impl From<ReferenceType> for journal::ReferenceType {
    fn from(value: ReferenceType) -> Self {
        match value {
            ReferenceType::Invoice => Self::Invoice,
            ReferenceType::Expense => Self::Expense,
            ReferenceType::CreditNote => Self::CreditNote,
            ReferenceType::DebitNote => Self::DebitNote,
            ReferenceType::TransactionReconsile => Self::TransactionReconsile,
            ReferenceType::TransactionReconsileInvoice => Self::TransactionReconsileInvoice,
            ReferenceType::VatPayment => Self::VatPayment,
            ReferenceType::OpeningBalance => Self::OpeningBalance,
        }
    }
}

/// Broad account classification, matching `account_class`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_class")]
pub enum AccountClass {
    #[sea_orm(string_value = "asset")]
    Asset,
    #[sea_orm(string_value = "bank")]
    Bank,
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "receivable")]
    Receivable,
    #[sea_orm(string_value = "inventory")]
    Inventory,
    #[sea_orm(string_value = "liability")]
    Liability,
    #[sea_orm(string_value = "payable")]
    Payable,
    #[sea_orm(string_value = "equity")]
    Equity,
    #[sea_orm(string_value = "income")]
    Income,
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<CoreAccountClass> for AccountClass {
    fn from(value: CoreAccountClass) -> Self {
        match value {
            CoreAccountClass::Asset => Self::Asset,
            CoreAccountClass::Bank => Self::Bank,
            CoreAccountClass::Cash => Self::Cash,
            CoreAccountClass::Receivable => Self::Receivable,
            CoreAccountClass::Inventory => Self::Inventory,
            CoreAccountClass::Liability => Self::Liability,
            CoreAccountClass::Payable => Self::Payable,
            CoreAccountClass::Equity => Self::Equity,
            CoreAccountClass::Income => Self::Income,
            CoreAccountClass::Expense => Self::Expense,
        }
    }
}

impl From<AccountClass> for CoreAccountClass {
    fn from(value: AccountClass) -> Self {
        match value {
            AccountClass::Asset => Self::Asset,
            AccountClass::Bank => Self::Bank,
            AccountClass::Cash => Self::Cash,
            AccountClass::Receivable => Self::Receivable,
            AccountClass::Inventory => Self::Inventory,
            AccountClass::Liability => Self::Liability,
            AccountClass::Payable => Self::Payable,
            AccountClass::Equity => Self::Equity,
            AccountClass::Income => Self::Income,
            AccountClass::Expense => Self::Expense,
        }
    }
}

/// Direction of a trading document, matching `trade_direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "trade_direction")]
pub enum TradeDirection {
    #[sea_orm(string_value = "sales")]
    Sales,
    #[sea_orm(string_value = "purchase")]
    Purchase,
}

impl From<kind::Direction> for TradeDirection {
    fn from(value: kind::Direction) -> Self {
        match value {
            kind::Direction::Sales => Self::Sales,
            kind::Direction::Purchase => Self::Purchase,
        }
    }
}

impl From<TradeDirection> for kind::Direction {
    fn from(value: TradeDirection) -> Self {
        match value {
            TradeDirection::Sales => Self::Sales,
            TradeDirection::Purchase => Self::Purchase,
        }
    }
}

/// How an expense was settled, matching `pay_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "pay_mode")]
pub enum PayMode {
    #[sea_orm(string_value = "bank")]
    Bank,
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "credit")]
    Credit,
}

impl From<kind::PayMode> for PayMode {
    fn from(value: kind::PayMode) -> Self {
        match value {
            kind::PayMode::Bank => Self::Bank,
            kind::PayMode::Cash => Self::Cash,
            kind::PayMode::Credit => Self::Credit,
        }
    }
}

impl From<PayMode> for kind::PayMode {
    fn from(value: PayMode) -> Self {
        match value {
            PayMode::Bank => Self::Bank,
            PayMode::Cash => Self::Cash,
            PayMode::Credit => Self::Credit,
        }
    }
}

/// What a reconciliation explains against, matching `recon_target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "recon_target")]
pub enum ReconTarget {
    #[sea_orm(string_value = "category")]
    Category,
    #[sea_orm(string_value = "customer_invoice")]
    CustomerInvoice,
    #[sea_orm(string_value = "supplier_invoice")]
    SupplierInvoice,
}

impl From<ReconciliationTarget> for ReconTarget {
    fn from(value: ReconciliationTarget) -> Self {
        match value {
            ReconciliationTarget::Category { .. } => Self::Category,
            ReconciliationTarget::CustomerInvoice => Self::CustomerInvoice,
            ReconciliationTarget::SupplierInvoice => Self::SupplierInvoice,
        }
    }
}

/// Direction of an inventory movement, matching `movement_flow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "movement_flow")]
pub enum MovementFlow {
    #[sea_orm(string_value = "sale")]
    Sale,
    #[sea_orm(string_value = "purchase")]
    Purchase,
    #[sea_orm(string_value = "return_in")]
    ReturnIn,
    #[sea_orm(string_value = "return_out")]
    ReturnOut,
}

impl From<stock::MovementFlow> for MovementFlow {
    fn from(value: stock::MovementFlow) -> Self {
        match value {
            stock::MovementFlow::Sale => Self::Sale,
            stock::MovementFlow::Purchase => Self::Purchase,
            stock::MovementFlow::ReturnIn => Self::ReturnIn,
            stock::MovementFlow::ReturnOut => Self::ReturnOut,
        }
    }
}

impl From<MovementFlow> for stock::MovementFlow {
    fn from(value: MovementFlow) -> Self {
        match value {
            MovementFlow::Sale => Self::Sale,
            MovementFlow::Purchase => Self::Purchase,
            MovementFlow::ReturnIn => Self::ReturnIn,
            MovementFlow::ReturnOut => Self::ReturnOut,
        }
    }
}
