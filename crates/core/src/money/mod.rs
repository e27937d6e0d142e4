//! Monetary arithmetic shared by all posting strategies.
//!
//! One rounding policy applies everywhere: Banker's Rounding to 2 decimal
//! places, applied once at each derived figure. Strategies never round
//! intermediate products twice.

pub mod exchange;
pub mod rounding;
pub mod vat;

#[cfg(test)]
mod props;

pub use exchange::to_functional;
pub use rounding::{MONEY_DP, round_money};
pub use vat::{inclusive_portion, net_of_inclusive, on_net};
