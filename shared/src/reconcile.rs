//! Line-item reconciliation
//!
//! Diffs a document's persisted line items against a requested set and
//! produces an insert/update/delete plan plus the net stock movement for
//! every touched item. The plan is plain data; applying it transactionally
//! is the document store's job, which keeps the diff rules testable on
//! their own.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stock::StockDirection;

/// A persisted line item row belonging to a bill or purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Uuid,
    pub item_id: Uuid,
    pub quantity: i32,
    pub rate: Decimal,
    /// Tax as a decimal fraction, e.g. 0.18 for 18%.
    pub tax_rate: Decimal,
}

/// A requested line item as submitted by a client. Lines carried over from
/// the previous revision keep their `id`; new lines omit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemDraft {
    pub id: Option<Uuid>,
    pub item_id: Uuid,
    pub quantity: i32,
    pub rate: Decimal,
    pub tax_rate: Decimal,
}

/// Net quantity movement for one item produced by a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDelta {
    pub item_id: Uuid,
    /// Raw delta between requested and previous quantity. May be negative
    /// when a surviving line's quantity was reduced.
    pub quantity: i32,
    pub direction: StockDirection,
}

/// The write set a document mutation implies.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationPlan {
    pub inserts: Vec<LineItem>,
    pub updates: Vec<LineItem>,
    pub deletes: Vec<Uuid>,
    pub stock_deltas: Vec<StockDelta>,
}

impl ReconciliationPlan {
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty()
            && self.updates.is_empty()
            && self.deletes.is_empty()
            && self.stock_deltas.is_empty()
    }
}

/// Compute the reconciliation plan for a document mutation.
///
/// `previous` is the persisted line-item set (empty on creation) and
/// `requested` the client-submitted set. A requested line whose id matches
/// a previous line is updated in place, keeping its id, and moves stock by
/// the difference between its new and old quantity; if the line now points
/// at a different item it moves its full quantity against that item, and
/// the old item keeps what was already moved. A line without an id,
/// or with an id the document has never seen, is inserted under a freshly
/// minted id and moves stock by its full quantity. Previous lines absent
/// from the request are deleted; their past stock effect is deliberately
/// left in place (see DESIGN.md). Zero deltas are not emitted, so
/// resubmitting an unchanged document moves no stock.
pub fn reconcile(
    direction: StockDirection,
    previous: &[LineItem],
    requested: &[LineItemDraft],
) -> ReconciliationPlan {
    let previous_by_id: HashMap<Uuid, &LineItem> =
        previous.iter().map(|line| (line.id, line)).collect();
    let requested_ids: HashSet<Uuid> = requested.iter().filter_map(|line| line.id).collect();

    let mut plan = ReconciliationPlan::default();

    for line in previous {
        if !requested_ids.contains(&line.id) {
            plan.deletes.push(line.id);
        }
    }

    for draft in requested {
        match draft.id.and_then(|id| previous_by_id.get(&id).copied()) {
            Some(prev) => {
                // A surviving line re-pointed at a different item has no
                // prior quantity against that item; its full quantity
                // moves. The old item keeps its past effect, same as a
                // removed line.
                let delta = if draft.item_id == prev.item_id {
                    draft.quantity - prev.quantity
                } else {
                    draft.quantity
                };
                plan.updates.push(LineItem {
                    id: prev.id,
                    item_id: draft.item_id,
                    quantity: draft.quantity,
                    rate: draft.rate,
                    tax_rate: draft.tax_rate,
                });
                if delta != 0 {
                    plan.stock_deltas.push(StockDelta {
                        item_id: draft.item_id,
                        quantity: delta,
                        direction,
                    });
                }
            }
            None => {
                plan.inserts.push(LineItem {
                    id: Uuid::new_v4(),
                    item_id: draft.item_id,
                    quantity: draft.quantity,
                    rate: draft.rate,
                    tax_rate: draft.tax_rate,
                });
                plan.stock_deltas.push(StockDelta {
                    item_id: draft.item_id,
                    quantity: draft.quantity,
                    direction,
                });
            }
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn draft(id: Option<Uuid>, item_id: Uuid, quantity: i32) -> LineItemDraft {
        LineItemDraft {
            id,
            item_id,
            quantity,
            rate: Decimal::new(500, 2),
            tax_rate: Decimal::new(18, 2),
        }
    }

    fn persisted(item_id: Uuid, quantity: i32) -> LineItem {
        LineItem {
            id: Uuid::new_v4(),
            item_id,
            quantity,
            rate: Decimal::new(500, 2),
            tax_rate: Decimal::new(18, 2),
        }
    }

    #[test]
    fn creation_inserts_everything_with_full_deltas() {
        let item = Uuid::new_v4();
        let plan = reconcile(
            StockDirection::Decrease,
            &[],
            &[draft(None, item, 3), draft(None, Uuid::new_v4(), 7)],
        );

        assert_eq!(plan.inserts.len(), 2);
        assert!(plan.updates.is_empty());
        assert!(plan.deletes.is_empty());
        assert_eq!(plan.stock_deltas.len(), 2);
        assert_eq!(plan.stock_deltas[0].item_id, item);
        assert_eq!(plan.stock_deltas[0].quantity, 3);
    }

    #[test]
    fn surviving_line_keeps_id_and_moves_the_difference() {
        let prev = persisted(Uuid::new_v4(), 5);
        let plan = reconcile(
            StockDirection::Increase,
            std::slice::from_ref(&prev),
            &[draft(Some(prev.id), prev.item_id, 8)],
        );

        assert!(plan.inserts.is_empty());
        assert_eq!(plan.updates.len(), 1);
        assert_eq!(plan.updates[0].id, prev.id);
        assert_eq!(plan.stock_deltas.len(), 1);
        assert_eq!(plan.stock_deltas[0].quantity, 3);
    }

    #[test]
    fn unknown_id_is_treated_as_new() {
        let prev = persisted(Uuid::new_v4(), 5);
        let stray_id = Uuid::new_v4();
        let plan = reconcile(
            StockDirection::Decrease,
            std::slice::from_ref(&prev),
            &[
                draft(Some(prev.id), prev.item_id, 5),
                draft(Some(stray_id), Uuid::new_v4(), 2),
            ],
        );

        assert_eq!(plan.inserts.len(), 1);
        // A stray id is never adopted; the row gets a minted one.
        assert_ne!(plan.inserts[0].id, stray_id);
        assert_eq!(plan.stock_deltas.len(), 1);
        assert_eq!(plan.stock_deltas[0].quantity, 2);
    }

    #[test]
    fn removed_line_is_deleted_without_a_stock_delta() {
        let kept = persisted(Uuid::new_v4(), 4);
        let dropped = persisted(Uuid::new_v4(), 9);
        let plan = reconcile(
            StockDirection::Decrease,
            &[kept.clone(), dropped.clone()],
            &[draft(Some(kept.id), kept.item_id, 4)],
        );

        assert_eq!(plan.deletes, vec![dropped.id]);
        assert!(plan.stock_deltas.is_empty());
    }

    #[test]
    fn re_pointed_line_moves_full_quantity_against_new_item() {
        let prev = persisted(Uuid::new_v4(), 5);
        let new_item = Uuid::new_v4();
        let plan = reconcile(
            StockDirection::Decrease,
            std::slice::from_ref(&prev),
            &[draft(Some(prev.id), new_item, 5)],
        );

        assert_eq!(plan.updates.len(), 1);
        assert_eq!(plan.updates[0].item_id, new_item);
        assert_eq!(plan.stock_deltas.len(), 1);
        assert_eq!(plan.stock_deltas[0].item_id, new_item);
        assert_eq!(plan.stock_deltas[0].quantity, 5);
    }

    #[test]
    fn unchanged_resubmission_moves_no_stock() {
        let prev = persisted(Uuid::new_v4(), 6);
        let plan = reconcile(
            StockDirection::Increase,
            std::slice::from_ref(&prev),
            &[draft(Some(prev.id), prev.item_id, 6)],
        );

        assert_eq!(plan.updates.len(), 1);
        assert!(plan.stock_deltas.is_empty());
    }
}
