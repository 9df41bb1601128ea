//! Stock ledger: the only writer of item quantities after creation

use serde::Serialize;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::stock::{derive_stock_status, StockDirection, StockStatus};

/// An item's stock position after a delta was applied.
#[derive(Debug, Clone, Serialize)]
pub struct StockRecord {
    pub item_id: Uuid,
    pub stock_level: i32,
    pub reorder_point: i32,
    pub status: StockStatus,
}

/// Apply a signed quantity delta to an item inside the caller's transaction.
///
/// The item row is read with `FOR UPDATE` so two documents touching the same
/// item are serialized at the storage layer; without the lock both could
/// read the same starting quantity and one update would be silently lost.
/// Quantity and derived status are persisted together. A negative result is
/// stored as-is and reported as `Out of Stock`.
///
/// Returns `NotFound` when the item does not exist, which makes the caller
/// roll back the whole reconciliation.
pub async fn apply_delta(
    tx: &mut Transaction<'_, Postgres>,
    item_id: Uuid,
    delta_quantity: i32,
    direction: StockDirection,
) -> AppResult<StockRecord> {
    let (stock_level, reorder_point) = sqlx::query_as::<_, (i32, i32)>(
        "SELECT stock_level, reorder_point FROM items WHERE id = $1 FOR UPDATE",
    )
    .bind(item_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

    let new_level = stock_level + direction.signed(delta_quantity);
    let status = derive_stock_status(new_level, reorder_point);

    sqlx::query("UPDATE items SET stock_level = $1, status = $2 WHERE id = $3")
        .bind(new_level)
        .bind(status.as_str())
        .bind(item_id)
        .execute(&mut **tx)
        .await?;

    Ok(StockRecord {
        item_id,
        stock_level: new_level,
        reorder_point,
        status,
    })
}
