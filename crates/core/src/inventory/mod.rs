//! Stock movements driven by posting and reversal.
//!
//! This module is pure: it derives the movements a document implies.
//! Applying them to stored inventory rows is the repository layer's job.

pub mod guard;
pub mod stock;

pub use guard::{StockCheck, check_stock};
pub use stock::{MovementFlow, StockEffect, TrackedLine, posting_effects, reversal_effects};
