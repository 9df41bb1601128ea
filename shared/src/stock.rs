//! Stock level and status rules for tracked items

use serde::{Deserialize, Serialize};

/// Derived availability status of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

/// Which way a document moves stock: purchase orders receive goods,
/// bills sell them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockDirection {
    Increase,
    Decrease,
}

impl StockDirection {
    /// Sign a raw quantity delta for this direction.
    pub fn signed(&self, delta: i32) -> i32 {
        match self {
            StockDirection::Increase => delta,
            StockDirection::Decrease => -delta,
        }
    }
}

/// Derive an item's status from its on-hand quantity and reorder point.
///
/// Evaluated in order: positive and above the reorder point is `In Stock`,
/// positive but at or below it is `Low Stock`, zero or negative is
/// `Out of Stock`. Negative quantities are never rejected here; they simply
/// report as out of stock.
pub fn derive_stock_status(quantity: i32, reorder_point: i32) -> StockStatus {
    if quantity > 0 && quantity > reorder_point {
        StockStatus::InStock
    } else if quantity > 0 {
        StockStatus::LowStock
    } else {
        StockStatus::OutOfStock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_boundaries_around_reorder_point() {
        assert_eq!(derive_stock_status(6, 5), StockStatus::InStock);
        assert_eq!(derive_stock_status(5, 5), StockStatus::LowStock);
        assert_eq!(derive_stock_status(1, 5), StockStatus::LowStock);
        assert_eq!(derive_stock_status(0, 5), StockStatus::OutOfStock);
        assert_eq!(derive_stock_status(-3, 5), StockStatus::OutOfStock);
    }

    #[test]
    fn zero_reorder_point_only_needs_positive_stock() {
        assert_eq!(derive_stock_status(1, 0), StockStatus::InStock);
        assert_eq!(derive_stock_status(0, 0), StockStatus::OutOfStock);
    }

    #[test]
    fn direction_signs_deltas() {
        assert_eq!(StockDirection::Increase.signed(4), 4);
        assert_eq!(StockDirection::Decrease.signed(4), -4);
        assert_eq!(StockDirection::Decrease.signed(-4), 4);
    }
}
