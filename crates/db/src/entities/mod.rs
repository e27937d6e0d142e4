//! `SeaORM` entity definitions for the posting schema.

pub mod accounts;
pub mod bank_transactions;
pub mod document_lines;
pub mod documents;
pub mod inventories;
pub mod inventory_histories;
pub mod journal_lines;
pub mod journals;
pub mod products;
pub mod sea_orm_active_enums;
pub mod transaction_explanations;
pub mod transaction_links;
