//! Journal derivation, one strategy per document kind.
//!
//! Each strategy turns a document snapshot into a balanced [`Journal`] plus
//! the side effects posting must apply with it (stock movements, a derived
//! settlement transaction). [`service::PostingService`] dispatches on the
//! document kind and guards the status machine; persistence and atomicity
//! belong to the repository layer.
//!
//! [`Journal`]: crate::ledger::Journal

pub mod error;
pub mod expense;
pub mod invoice;
pub mod note;
pub mod notify;
pub mod opening_balance;
pub mod reconcile;
pub mod service;
pub mod types;
pub mod vat_payment;

#[cfg(test)]
mod service_props;

pub use error::PostingError;
pub use notify::{NoopNotifier, PostedNotifier};
pub use service::PostingService;
pub use types::{
    AccountClass, ChartRoles, ExpenseDocument, ExpensePayment, InventoryRef,
    OpeningBalanceDocument, PostingPlan, ReconciliationDocument, ReconciliationTarget,
    SettlementInstruction, SourceDocument, TradeDocument, TradeLine, VatPaymentDocument,
};
