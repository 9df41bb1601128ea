//! Transactional application of reconciliation plans
//!
//! Bills and purchase orders differ only in their line-item table and the
//! direction stock moves; both apply the same plan shape. Everything here
//! runs inside the caller's transaction so the header write, every line
//! mutation, and every stock delta commit or roll back as one unit.

use sqlx::{Postgres, Transaction};

use crate::error::AppResult;
use crate::services::stock;
use shared::reconcile::{LineItem, ReconciliationPlan};
use shared::sequence::DocumentKind;

/// Line-item table for a document kind.
fn line_table(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Bill => "bill_items",
        DocumentKind::PurchaseOrder => "purchase_order_items",
    }
}

/// Foreign-key column referencing the document header.
fn document_column(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Bill => "bill_id",
        DocumentKind::PurchaseOrder => "purchase_order_id",
    }
}

/// Load a document's persisted line items for reconciliation.
pub async fn load_line_items(
    tx: &mut Transaction<'_, Postgres>,
    kind: DocumentKind,
    document_id: &str,
) -> AppResult<Vec<LineItem>> {
    let sql = format!(
        "SELECT id, item_id, quantity, rate, tax_rate FROM {} WHERE {} = $1 ORDER BY created_at",
        line_table(kind),
        document_column(kind),
    );

    let lines = sqlx::query_as::<_, LineItemRow>(&sql)
        .bind(document_id)
        .fetch_all(&mut **tx)
        .await?;

    Ok(lines.into_iter().map(Into::into).collect())
}

/// Apply a reconciliation plan: row deletes, in-place updates, fresh
/// inserts, then the stock deltas through the ledger.
///
/// Deleted lines keep their past stock effect; the plan carries no delta
/// for them. A `NotFound` from the ledger (line referencing a missing item)
/// propagates so the caller rolls the whole transaction back.
pub async fn apply_plan(
    tx: &mut Transaction<'_, Postgres>,
    kind: DocumentKind,
    document_id: &str,
    plan: &ReconciliationPlan,
) -> AppResult<()> {
    let table = line_table(kind);
    let doc_col = document_column(kind);

    if !plan.deletes.is_empty() {
        let sql = format!("DELETE FROM {table} WHERE id = ANY($1) AND {doc_col} = $2");
        sqlx::query(&sql)
            .bind(&plan.deletes)
            .bind(document_id)
            .execute(&mut **tx)
            .await?;
    }

    for line in &plan.updates {
        let sql = format!(
            "UPDATE {table} SET item_id = $1, quantity = $2, rate = $3, tax_rate = $4 \
             WHERE id = $5 AND {doc_col} = $6",
        );
        sqlx::query(&sql)
            .bind(line.item_id)
            .bind(line.quantity)
            .bind(line.rate)
            .bind(line.tax_rate)
            .bind(line.id)
            .bind(document_id)
            .execute(&mut **tx)
            .await?;
    }

    for line in &plan.inserts {
        let sql = format!(
            "INSERT INTO {table} (id, {doc_col}, item_id, quantity, rate, tax_rate) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        );
        sqlx::query(&sql)
            .bind(line.id)
            .bind(document_id)
            .bind(line.item_id)
            .bind(line.quantity)
            .bind(line.rate)
            .bind(line.tax_rate)
            .execute(&mut **tx)
            .await?;
    }

    for delta in &plan.stock_deltas {
        let record = stock::apply_delta(tx, delta.item_id, delta.quantity, delta.direction).await?;
        tracing::debug!(
            item_id = %record.item_id,
            stock_level = record.stock_level,
            reorder_point = record.reorder_point,
            status = record.status.as_str(),
            "stock level adjusted"
        );
    }

    Ok(())
}

#[derive(Debug, sqlx::FromRow)]
struct LineItemRow {
    id: uuid::Uuid,
    item_id: uuid::Uuid,
    quantity: i32,
    rate: rust_decimal::Decimal,
    tax_rate: rust_decimal::Decimal,
}

impl From<LineItemRow> for LineItem {
    fn from(row: LineItemRow) -> Self {
        LineItem {
            id: row.id,
            item_id: row.item_id,
            quantity: row.quantity,
            rate: row.rate,
            tax_rate: row.tax_rate,
        }
    }
}
