//! Core posting and reversal logic for Folio.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, derivation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Balanced journal model and validation
//! - `money` - Rounding policy, exchange rates, and VAT math
//! - `document` - Source document kinds and status transitions
//! - `posting` - Per-document-kind journal derivation strategies
//! - `reversal` - Mirror journals and reversal cascade planning
//! - `inventory` - Stock movement math for inventory-tracked lines

pub mod document;
pub mod inventory;
pub mod ledger;
pub mod money;
pub mod posting;
pub mod reversal;
