//! Stock level and status tests
//!
//! Tests for the stock ledger rules: how document quantities move an
//! item's level, and how level and reorder point derive its status.

use proptest::prelude::*;

use shared::stock::{derive_stock_status, StockDirection, StockStatus};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Selling part of the stock of a comfortably stocked item
    #[test]
    fn test_bill_sells_down_to_in_stock() {
        // Item holds 10 with reorder point 5; a bill sells 3.
        let level = 10 + StockDirection::Decrease.signed(3);
        assert_eq!(level, 7);
        assert_eq!(derive_stock_status(level, 5), StockStatus::InStock);
    }

    /// Growing a bill line sells only the difference
    #[test]
    fn test_bill_growth_crosses_into_low_stock() {
        // The bill from above grows from 3 to 8 units; only the extra
        // 5 units leave stock.
        let level = 7 + StockDirection::Decrease.signed(8 - 3);
        assert_eq!(level, 2);
        assert_eq!(derive_stock_status(level, 5), StockStatus::LowStock);
    }

    /// Receiving a purchase order restocks an empty item
    #[test]
    fn test_purchase_order_restocks_empty_item() {
        let empty = 0;
        let level = empty + StockDirection::Increase.signed(20);
        assert_eq!(level, 20);
        assert_eq!(derive_stock_status(level, 10), StockStatus::InStock);
    }

    /// Overselling drives the level negative and reports out of stock
    #[test]
    fn test_oversell_goes_negative() {
        let level = 2 + StockDirection::Decrease.signed(5);
        assert_eq!(level, -3);
        assert_eq!(derive_stock_status(level, 5), StockStatus::OutOfStock);
    }

    /// Status boundaries at the reorder point
    #[test]
    fn test_status_boundaries() {
        let reorder = 5;
        assert_eq!(derive_stock_status(6, reorder), StockStatus::InStock);
        assert_eq!(derive_stock_status(5, reorder), StockStatus::LowStock);
        assert_eq!(derive_stock_status(1, reorder), StockStatus::LowStock);
        assert_eq!(derive_stock_status(0, reorder), StockStatus::OutOfStock);
        assert_eq!(derive_stock_status(-1, reorder), StockStatus::OutOfStock);
    }

    /// Reorder point zero leaves no room for a low-stock band
    #[test]
    fn test_zero_reorder_point_has_no_low_band() {
        assert_eq!(derive_stock_status(1, 0), StockStatus::InStock);
        assert_eq!(derive_stock_status(0, 0), StockStatus::OutOfStock);
    }

    /// Status strings match what clients and the database store
    #[test]
    fn test_status_strings() {
        assert_eq!(StockStatus::InStock.as_str(), "In Stock");
        assert_eq!(StockStatus::LowStock.as_str(), "Low Stock");
        assert_eq!(StockStatus::OutOfStock.as_str(), "Out of Stock");
    }

    /// Serialized read-modify-write applies lose no delta even under
    /// contention, mirroring the row lock the ledger takes. Each worker
    /// must re-read inside the critical section; the final level is the
    /// sum of everything applied.
    #[test]
    fn test_serialized_applies_lose_no_update() {
        use std::sync::{Arc, Mutex};

        let level = Arc::new(Mutex::new(1000i32));
        let mut handles = Vec::new();

        for worker in 0..8 {
            let level = Arc::clone(&level);
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    let delta = (worker + i) % 7 + 1;
                    let direction = if i % 2 == 0 {
                        StockDirection::Decrease
                    } else {
                        StockDirection::Increase
                    };

                    let mut guard = level.lock().unwrap();
                    *guard += direction.signed(delta);
                }
            }));
        }

        let mut expected = 1000i32;
        for worker in 0..8 {
            for i in 0..50 {
                let delta = (worker + i) % 7 + 1;
                let direction = if i % 2 == 0 {
                    StockDirection::Decrease
                } else {
                    StockDirection::Increase
                };
                expected += direction.signed(delta);
            }
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(*level.lock().unwrap(), expected);
    }

    /// Opposite directions cancel out
    #[test]
    fn test_directions_are_inverse() {
        let level = 10;
        let after = level
            + StockDirection::Decrease.signed(4)
            + StockDirection::Increase.signed(4);
        assert_eq!(after, level);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn level_strategy() -> impl Strategy<Value = i32> {
        -1000i32..=1000i32
    }

    fn reorder_strategy() -> impl Strategy<Value = i32> {
        0i32..=500i32
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Status is total: every level/reorder pair maps to exactly one status
        #[test]
        fn prop_status_is_exhaustive(level in level_strategy(), reorder in reorder_strategy()) {
            let status = derive_stock_status(level, reorder);
            match status {
                StockStatus::InStock => {
                    prop_assert!(level > 0 && level > reorder);
                }
                StockStatus::LowStock => {
                    prop_assert!(level > 0 && level <= reorder);
                }
                StockStatus::OutOfStock => {
                    prop_assert!(level <= 0);
                }
            }
        }

        /// Non-positive levels are always out of stock, whatever the threshold
        #[test]
        fn prop_non_positive_is_out_of_stock(level in -1000i32..=0, reorder in reorder_strategy()) {
            prop_assert_eq!(derive_stock_status(level, reorder), StockStatus::OutOfStock);
        }

        /// Raising the reorder point never improves the reported status
        #[test]
        fn prop_status_monotone_in_reorder_point(
            level in level_strategy(),
            reorder in reorder_strategy(),
            bump in 1i32..=100,
        ) {
            fn rank(status: StockStatus) -> u8 {
                match status {
                    StockStatus::InStock => 2,
                    StockStatus::LowStock => 1,
                    StockStatus::OutOfStock => 0,
                }
            }

            let before = rank(derive_stock_status(level, reorder));
            let after = rank(derive_stock_status(level, reorder + bump));
            prop_assert!(after <= before);
        }

        /// Applying a delta and its inverse restores the level
        #[test]
        fn prop_signed_deltas_are_inverse(level in level_strategy(), delta in 0i32..=1000) {
            let down = level + StockDirection::Decrease.signed(delta);
            let restored = down + StockDirection::Increase.signed(delta);
            prop_assert_eq!(restored, level);
        }
    }
}
