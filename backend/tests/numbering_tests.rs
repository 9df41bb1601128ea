//! Document numbering tests
//!
//! Tests for the `BL-`/`PO-` identifier format and the monotonic counter
//! semantics behind it.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use proptest::prelude::*;

use shared::sequence::{format_document_id, DocumentKind};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Identifiers carry the document-kind prefix
    #[test]
    fn test_prefixes() {
        assert_eq!(format_document_id(DocumentKind::Bill, 1), "BL-001");
        assert_eq!(format_document_id(DocumentKind::PurchaseOrder, 1), "PO-001");
    }

    /// Sequence numbers are zero padded to at least three digits
    #[test]
    fn test_zero_padding() {
        assert_eq!(format_document_id(DocumentKind::Bill, 4), "BL-004");
        assert_eq!(format_document_id(DocumentKind::Bill, 17), "BL-017");
        assert_eq!(format_document_id(DocumentKind::Bill, 100), "BL-100");
    }

    /// Numbers past three digits widen instead of truncating
    #[test]
    fn test_wide_numbers() {
        assert_eq!(format_document_id(DocumentKind::Bill, 1024), "BL-1024");
        assert_eq!(
            format_document_id(DocumentKind::PurchaseOrder, 99999),
            "PO-99999"
        );
    }

    /// Counter kinds map to distinct database keys
    #[test]
    fn test_counter_keys() {
        assert_eq!(DocumentKind::Bill.as_str(), "bill");
        assert_eq!(DocumentKind::PurchaseOrder.as_str(), "purchase_order");
        assert_ne!(DocumentKind::Bill.as_str(), DocumentKind::PurchaseOrder.as_str());
    }

    /// Bill and purchase order sequences never collide even at equal values
    #[test]
    fn test_kinds_never_collide() {
        for n in 1..50 {
            assert_ne!(
                format_document_id(DocumentKind::Bill, n),
                format_document_id(DocumentKind::PurchaseOrder, n)
            );
        }
    }

    /// Concurrent allocators drawing from one atomic counter get
    /// pairwise-distinct identifiers, mirroring the row-locked
    /// `last_value + 1` update the database performs.
    #[test]
    fn test_concurrent_allocation_is_distinct() {
        let counter = Arc::new(AtomicI64::new(0));
        let mut handles = Vec::new();

        for _ in 0..8 {
            let counter = Arc::clone(&counter);
            handles.push(std::thread::spawn(move || {
                let mut ids = Vec::new();
                for _ in 0..25 {
                    let value = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    ids.push(format_document_id(DocumentKind::Bill, value));
                }
                ids
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate identifier issued");
            }
        }

        assert_eq!(seen.len(), 8 * 25);
    }

    /// An allocation that is never committed to a document still burns
    /// its number; the next allocation moves past it.
    #[test]
    fn test_failed_creation_burns_the_number() {
        let counter = AtomicI64::new(3);

        let burned = counter.fetch_add(1, Ordering::SeqCst) + 1;
        // The document insert fails here; nothing rolls the counter back.
        let next = counter.fetch_add(1, Ordering::SeqCst) + 1;

        assert_eq!(format_document_id(DocumentKind::Bill, burned), "BL-004");
        assert_eq!(format_document_id(DocumentKind::Bill, next), "BL-005");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn kind_strategy() -> impl Strategy<Value = DocumentKind> {
        prop_oneof![Just(DocumentKind::Bill), Just(DocumentKind::PurchaseOrder)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Formatting is injective over sequence values
        #[test]
        fn prop_distinct_sequences_give_distinct_ids(
            kind in kind_strategy(),
            a in 1i64..=1_000_000,
            b in 1i64..=1_000_000,
        ) {
            prop_assume!(a != b);
            prop_assert_ne!(format_document_id(kind, a), format_document_id(kind, b));
        }

        /// Every identifier is prefix, dash, then at least three digits
        #[test]
        fn prop_identifier_shape(kind in kind_strategy(), n in 1i64..=1_000_000) {
            let id = format_document_id(kind, n);
            let (prefix, number) = id.split_once('-').unwrap();

            prop_assert!(prefix == "BL" || prefix == "PO");
            prop_assert!(number.len() >= 3);
            prop_assert!(number.chars().all(|c| c.is_ascii_digit()));
            prop_assert_eq!(number.parse::<i64>().unwrap(), n);
        }

        /// Identifiers preserve the counter's ordering lexicographically
        /// within one width class
        #[test]
        fn prop_padding_keeps_order_below_thousand(a in 1i64..=998, bump in 1i64..=5) {
            let b = (a + bump).min(999);
            prop_assume!(a < b);
            let id_a = format_document_id(DocumentKind::Bill, a);
            let id_b = format_document_id(DocumentKind::Bill, b);
            prop_assert!(id_a < id_b);
        }
    }
}
