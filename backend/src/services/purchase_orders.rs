//! Purchase order service: procurement documents that increase stock

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::{documents, sequence};
use shared::reconcile::{reconcile, LineItemDraft};
use shared::sequence::DocumentKind;
use shared::stock::StockDirection;
use shared::validation::validate_line_items;

/// Purchase order service for ordering stock from vendors
#[derive(Clone)]
pub struct PurchaseOrderService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct PurchaseOrderRow {
    id: String,
    vendor_id: Uuid,
    status: String,
    expected_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

/// A persisted purchase order line
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PurchaseOrderLine {
    pub id: Uuid,
    pub purchase_order_id: String,
    pub item_id: Uuid,
    pub quantity: i32,
    pub rate: Decimal,
    pub tax_rate: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A purchase order header with its line items
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrder {
    pub id: String,
    pub vendor_id: Uuid,
    pub status: String,
    pub expected_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub line_items: Vec<PurchaseOrderLine>,
}

/// Input for creating a purchase order
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseOrderInput {
    pub vendor_id: Uuid,
    pub expected_date: Option<DateTime<Utc>>,
    pub line_items: Vec<LineItemDraft>,
}

/// Input for updating a purchase order
#[derive(Debug, Deserialize)]
pub struct UpdatePurchaseOrderInput {
    pub vendor_id: Uuid,
    pub status: Option<String>,
    pub expected_date: Option<DateTime<Utc>>,
    pub line_items: Vec<LineItemDraft>,
}

impl PurchaseOrderService {
    /// Create a new PurchaseOrderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a purchase order, allocating its `PO-…` id and receiving
    /// the ordered quantities into stock.
    pub async fn create_purchase_order(
        &self,
        input: CreatePurchaseOrderInput,
    ) -> AppResult<PurchaseOrder> {
        validate_line_items(&input.line_items)
            .map_err(|msg| AppError::validation("line_items", msg))?;

        let vendor_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM vendors WHERE id = $1)")
                .bind(input.vendor_id)
                .fetch_one(&self.db)
                .await?;

        if !vendor_exists {
            return Err(AppError::NotFound("Vendor".to_string()));
        }

        // Allocated before the transaction opens; failed creations burn
        // the number rather than recycling it.
        let order_id = sequence::next_document_id(&self.db, DocumentKind::PurchaseOrder).await?;

        let plan = reconcile(StockDirection::Increase, &[], &input.line_items);

        let mut tx = self.db.begin().await?;

        sqlx::query(
            "INSERT INTO purchase_orders (id, vendor_id, status, expected_date) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&order_id)
        .bind(input.vendor_id)
        .bind("Done")
        .bind(input.expected_date)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "purchase order"))?;

        documents::apply_plan(&mut tx, DocumentKind::PurchaseOrder, &order_id, &plan).await?;

        tx.commit().await?;

        self.get_purchase_order(&order_id).await
    }

    /// Update a purchase order, moving stock by the difference between
    /// the requested and persisted quantities.
    pub async fn update_purchase_order(
        &self,
        order_id: &str,
        input: UpdatePurchaseOrderInput,
    ) -> AppResult<PurchaseOrder> {
        validate_line_items(&input.line_items)
            .map_err(|msg| AppError::validation("line_items", msg))?;

        let mut tx = self.db.begin().await?;

        let header = sqlx::query_as::<_, PurchaseOrderRow>(
            "SELECT id, vendor_id, status, expected_date, created_at \
             FROM purchase_orders WHERE id = $1 FOR UPDATE",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;

        let vendor_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM vendors WHERE id = $1)")
                .bind(input.vendor_id)
                .fetch_one(&mut *tx)
                .await?;

        if !vendor_exists {
            return Err(AppError::NotFound("Vendor".to_string()));
        }

        let previous =
            documents::load_line_items(&mut tx, DocumentKind::PurchaseOrder, order_id).await?;
        let plan = reconcile(StockDirection::Increase, &previous, &input.line_items);

        let status = input.status.unwrap_or(header.status);
        let expected_date = input.expected_date.or(header.expected_date);
        sqlx::query(
            "UPDATE purchase_orders SET vendor_id = $1, status = $2, expected_date = $3 \
             WHERE id = $4",
        )
        .bind(input.vendor_id)
        .bind(&status)
        .bind(expected_date)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

        documents::apply_plan(&mut tx, DocumentKind::PurchaseOrder, order_id, &plan).await?;

        tx.commit().await?;

        self.get_purchase_order(order_id).await
    }

    /// Get a purchase order with its line items
    pub async fn get_purchase_order(&self, order_id: &str) -> AppResult<PurchaseOrder> {
        let header = sqlx::query_as::<_, PurchaseOrderRow>(
            "SELECT id, vendor_id, status, expected_date, created_at \
             FROM purchase_orders WHERE id = $1",
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;

        let line_items = sqlx::query_as::<_, PurchaseOrderLine>(
            "SELECT id, purchase_order_id, item_id, quantity, rate, tax_rate, created_at \
             FROM purchase_order_items WHERE purchase_order_id = $1 ORDER BY created_at",
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await?;

        Ok(PurchaseOrder {
            id: header.id,
            vendor_id: header.vendor_id,
            status: header.status,
            expected_date: header.expected_date,
            created_at: header.created_at,
            line_items,
        })
    }

    /// List all purchase orders with their line items
    pub async fn list_purchase_orders(&self) -> AppResult<Vec<PurchaseOrder>> {
        let headers = sqlx::query_as::<_, PurchaseOrderRow>(
            "SELECT id, vendor_id, status, expected_date, created_at \
             FROM purchase_orders ORDER BY created_at DESC",
        )
        .fetch_all(&self.db)
        .await?;

        let lines = sqlx::query_as::<_, PurchaseOrderLine>(
            "SELECT id, purchase_order_id, item_id, quantity, rate, tax_rate, created_at \
             FROM purchase_order_items ORDER BY created_at",
        )
        .fetch_all(&self.db)
        .await?;

        let mut by_order: HashMap<String, Vec<PurchaseOrderLine>> = HashMap::new();
        for line in lines {
            by_order
                .entry(line.purchase_order_id.clone())
                .or_default()
                .push(line);
        }

        Ok(headers
            .into_iter()
            .map(|h| {
                let line_items = by_order.remove(&h.id).unwrap_or_default();
                PurchaseOrder {
                    id: h.id,
                    vendor_id: h.vendor_id,
                    status: h.status,
                    expected_date: h.expected_date,
                    created_at: h.created_at,
                    line_items,
                }
            })
            .collect())
    }

    /// Delete a purchase order and its lines. Stock already received
    /// stays received.
    pub async fn delete_purchase_order(&self, order_id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM purchase_orders WHERE id = $1")
            .bind(order_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Purchase order".to_string()));
        }

        Ok(())
    }
}
