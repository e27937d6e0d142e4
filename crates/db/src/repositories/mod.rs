//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. The posting repository is the one place where a journal,
//! its side effects, and the document status change are committed as a
//! single unit of work.

pub mod account;
pub mod bank;
pub mod document;
pub mod inventory;
pub mod journal;
pub mod posting;

pub use account::{AccountError, AccountRepository, CreateAccountInput};
pub use bank::{BankError, BankRepository, CreateBankTransactionInput};
pub use document::{
    CreateExpenseInput, CreateOpeningBalanceInput, CreateReconciliationInput, CreateTradeInput,
    CreateTradeLineInput, CreateVatPaymentInput, DocumentError, DocumentRepository,
    DocumentWithLines,
};
pub use inventory::{CreateProductInput, InventoryError, InventoryRepository};
pub use journal::{JournalError, JournalQuery, JournalRepository, JournalWithLines};
pub use posting::{
    LoggingNotifier, PostedReceipt, PostingRepository, PostingRepositoryError, ReversedReceipt,
};
