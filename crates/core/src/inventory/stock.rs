//! Stock movements driven by posting and reversal.
//!
//! Four flows move stock: sales take units out, purchases bring units in,
//! and the two note flows return units (a credit note restocks a customer
//! return, a debit note sends units back to a supplier). Reversal emits the
//! undo form of the same flow, which also retires the movement history the
//! posting wrote, so a reversed document leaves no trace in stock levels.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_shared::types::ProductId;

use crate::document::kind::Direction;

/// One tracked line of a trading document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedLine {
    /// Product the line moves.
    pub product_id: ProductId,
    /// Units moved. Always positive.
    pub quantity: Decimal,
    /// Cost per unit used for movement history and cost-of-sales legs.
    pub unit_cost: Decimal,
}

/// The direction units travel for a document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementFlow {
    /// Units leave stock and count as sold.
    Sale,
    /// Units enter stock and count as purchased.
    Purchase,
    /// Units return to stock from a customer (credit note).
    ReturnIn,
    /// Units go back to a supplier (debit note).
    ReturnOut,
}

impl MovementFlow {
    /// Flow of an invoice in the given direction.
    #[must_use]
    pub const fn for_invoice(direction: Direction) -> Self {
        match direction {
            Direction::Sales => Self::Sale,
            Direction::Purchase => Self::Purchase,
        }
    }

    /// Flow of a credit or debit note amending an invoice in the given
    /// direction. Notes move units the opposite way to their invoice.
    #[must_use]
    pub const fn for_note(direction: Direction) -> Self {
        match direction {
            Direction::Sales => Self::ReturnIn,
            Direction::Purchase => Self::ReturnOut,
        }
    }

    /// Sign of the change to stock on hand when posting this flow.
    #[must_use]
    const fn posting_sign(self) -> i8 {
        match self {
            Self::Sale | Self::ReturnOut => -1,
            Self::Purchase | Self::ReturnIn => 1,
        }
    }
}

/// A single inventory movement the repository layer must apply.
///
/// Posting effects (`undo == false`) adjust counters and write a movement
/// history row. Undo effects reverse the counters and delete the history
/// the posting wrote; a `Sale` undo additionally resets the quantity-sold
/// counter to zero, and a `Purchase` undo removes the inventory record
/// itself when the document's movement was the only history it had.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEffect {
    /// Product moved.
    pub product_id: ProductId,
    /// Which flow produced the effect.
    pub flow: MovementFlow,
    /// Units moved. Always positive.
    pub quantity: Decimal,
    /// Cost per unit for the movement history row.
    pub unit_cost: Decimal,
    /// True for the reversal form of the flow.
    pub undo: bool,
}

impl StockEffect {
    /// Signed change to stock on hand this effect applies.
    #[must_use]
    pub fn stock_delta(&self) -> Decimal {
        let sign = if self.undo {
            -self.flow.posting_sign()
        } else {
            self.flow.posting_sign()
        };
        if sign < 0 { -self.quantity } else { self.quantity }
    }
}

/// Movements implied by posting a trading document.
#[must_use]
pub fn posting_effects(flow: MovementFlow, lines: &[TrackedLine]) -> Vec<StockEffect> {
    effects(flow, lines, false)
}

/// Movements that undo a previously posted trading document.
#[must_use]
pub fn reversal_effects(flow: MovementFlow, lines: &[TrackedLine]) -> Vec<StockEffect> {
    effects(flow, lines, true)
}

fn effects(flow: MovementFlow, lines: &[TrackedLine], undo: bool) -> Vec<StockEffect> {
    lines
        .iter()
        .map(|line| StockEffect {
            product_id: line.product_id,
            flow,
            quantity: line.quantity,
            unit_cost: line.unit_cost,
            undo,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(quantity: Decimal) -> TrackedLine {
        TrackedLine {
            product_id: ProductId::new(),
            quantity,
            unit_cost: dec!(35.00),
        }
    }

    #[test]
    fn sales_posting_takes_stock_out() {
        let effects = posting_effects(MovementFlow::Sale, &[line(dec!(10))]);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].stock_delta(), dec!(-10));
        assert!(!effects[0].undo);
    }

    #[test]
    fn purchase_posting_brings_stock_in() {
        let effects = posting_effects(MovementFlow::Purchase, &[line(dec!(25))]);
        assert_eq!(effects[0].stock_delta(), dec!(25));
    }

    #[test]
    fn credit_note_restocks_and_debit_note_returns() {
        assert_eq!(MovementFlow::for_note(Direction::Sales), MovementFlow::ReturnIn);
        assert_eq!(MovementFlow::for_note(Direction::Purchase), MovementFlow::ReturnOut);

        let restock = posting_effects(MovementFlow::ReturnIn, &[line(dec!(4))]);
        assert_eq!(restock[0].stock_delta(), dec!(4));

        let back_out = posting_effects(MovementFlow::ReturnOut, &[line(dec!(4))]);
        assert_eq!(back_out[0].stock_delta(), dec!(-4));
    }

    #[test]
    fn reversal_is_the_exact_inverse() {
        let lines = [line(dec!(10)), line(dec!(3))];
        for flow in [
            MovementFlow::Sale,
            MovementFlow::Purchase,
            MovementFlow::ReturnIn,
            MovementFlow::ReturnOut,
        ] {
            let posted = posting_effects(flow, &lines);
            let undone = reversal_effects(flow, &lines);
            let net: Decimal = posted
                .iter()
                .chain(undone.iter())
                .map(StockEffect::stock_delta)
                .sum();
            assert_eq!(net, Decimal::ZERO);
        }
    }

    #[test]
    fn untracked_documents_move_nothing() {
        assert!(posting_effects(MovementFlow::Sale, &[]).is_empty());
        assert!(reversal_effects(MovementFlow::Purchase, &[]).is_empty());
    }
}
