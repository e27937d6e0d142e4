//! Pre-posting stock availability check.
//!
//! Sales documents that move tracked products are refused when the products
//! involved have no stock at all. The check sums stock across the tracked
//! lines and only blocks on a total of zero; partial shortfalls pass and
//! drive stock negative, which bookkeeping later corrects with an
//! adjustment document.

use rust_decimal::Decimal;

use folio_shared::types::ProductId;

use super::stock::TrackedLine;

/// Result of a stock availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockCheck {
    /// Number of tracked lines on the document.
    pub tracked_lines: usize,
    /// Stock on hand summed across the tracked products.
    pub total_on_hand: Decimal,
}

impl StockCheck {
    /// True when posting may proceed.
    #[must_use]
    pub fn available(&self) -> bool {
        self.tracked_lines == 0 || !self.total_on_hand.is_zero()
    }
}

/// Sums stock on hand for the document's tracked lines.
///
/// `stock_of` returns the current stock for a product, or `None` when the
/// product has no inventory record yet (counted as zero).
pub fn check_stock<F>(lines: &[TrackedLine], stock_of: F) -> StockCheck
where
    F: Fn(ProductId) -> Option<Decimal>,
{
    let mut total = Decimal::ZERO;
    for line in lines {
        total += stock_of(line.product_id).unwrap_or(Decimal::ZERO);
    }
    StockCheck {
        tracked_lines: lines.len(),
        total_on_hand: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(product_id: ProductId) -> TrackedLine {
        TrackedLine {
            product_id,
            quantity: dec!(10),
            unit_cost: dec!(5.00),
        }
    }

    #[test]
    fn no_tracked_lines_is_always_available() {
        let check = check_stock(&[], |_| None);
        assert!(check.available());
        assert_eq!(check.tracked_lines, 0);
    }

    #[test]
    fn zero_total_stock_blocks_posting() {
        let product = ProductId::new();
        let check = check_stock(&[line(product)], |_| Some(dec!(0)));
        assert!(!check.available());
    }

    #[test]
    fn missing_inventory_record_counts_as_zero() {
        let check = check_stock(&[line(ProductId::new())], |_| None);
        assert!(!check.available());
        assert_eq!(check.total_on_hand, dec!(0));
    }

    #[test]
    fn any_stock_across_lines_passes() {
        let a = ProductId::new();
        let b = ProductId::new();
        let stock = move |id: ProductId| if id == a { Some(dec!(0)) } else { Some(dec!(4)) };
        let check = check_stock(&[line(a), line(b)], stock);
        assert!(check.available());
        assert_eq!(check.total_on_hand, dec!(4));
    }
}
