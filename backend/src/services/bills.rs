//! Bill management service: sales documents that decrease stock

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

/// Bill service for creating and reconciling sales bills
#[derive(Clone)]
pub struct BillService {
    db: PgPool,
}

/// Database row for a bill header
#[derive(Debug, FromRow)]
struct BillRow {
    id: String,
    customer_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
}

/// A persisted bill line
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BillLine {
    pub id: Uuid,
    pub bill_id: String,
    pub item_id: Uuid,
    pub quantity: i32,
    pub rate: Decimal,
    pub tax_rate: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A bill header with its line items
#[derive(Debug, Clone, Serialize)]
pub struct Bill {
    pub id: String,
    pub customer_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub line_items: Vec<BillLine>,
}

/// Input for creating a bill
#[derive(Debug, Deserialize)]
pub struct CreateBillInput {
    pub customer_id: Uuid,
    pub line_items: Vec<LineItemDraft>,
}

/// Input for updating a bill
#[derive(Debug, Deserialize)]
pub struct UpdateBillInput {
    pub customer_id: Uuid,
    pub status: Option<String>,
    pub line_items: Vec<LineItemDraft>,
}

impl BillService {
    /// Create a new BillService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a bill, allocating its `BL-…` id and selling the requested
    /// quantities out of stock.
    pub async fn create_bill(&self, input: CreateBillInput) -> AppResult<Bill> {
        validate_line_items(&input.line_items)
            .map_err(|msg| AppError::validation("line_items", msg))?;

        let customer_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
                .bind(input.customer_id)
                .fetch_one(&self.db)
                .await?;

        if !customer_exists {
            return Err(AppError::NotFound("Customer".to_string()));
        }

        // Allocated before the transaction opens: a creation that fails
        // below burns the number instead of recycling it.
        let bill_id = sequence::next_document_id(&self.db, DocumentKind::Bill).await?;

        let plan = reconcile(StockDirection::Decrease, &[], &input.line_items);

        let mut tx = self.db.begin().await?;

        sqlx::query("INSERT INTO bills (id, customer_id, status) VALUES ($1, $2, $3)")
            .bind(&bill_id)
            .bind(input.customer_id)
            .bind("Done")
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::conflict_on_unique(e, "bill"))?;

        documents::apply_plan(&mut tx, DocumentKind::Bill, &bill_id, &plan).await?;

        tx.commit().await?;

        self.get_bill(&bill_id).await
    }

    /// Update a bill, diffing the requested lines against the persisted
    /// ones and moving stock by the difference only.
    pub async fn update_bill(&self, bill_id: &str, input: UpdateBillInput) -> AppResult<Bill> {
        validate_line_items(&input.line_items)
            .map_err(|msg| AppError::validation("line_items", msg))?;

        let mut tx = self.db.begin().await?;

        // Lock the header so two updates of the same bill serialize.
        let header = sqlx::query_as::<_, BillRow>(
            "SELECT id, customer_id, status, created_at FROM bills WHERE id = $1 FOR UPDATE",
        )
        .bind(bill_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Bill".to_string()))?;

        let customer_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
                .bind(input.customer_id)
                .fetch_one(&mut *tx)
                .await?;

        if !customer_exists {
            return Err(AppError::NotFound("Customer".to_string()));
        }

        let previous = documents::load_line_items(&mut tx, DocumentKind::Bill, bill_id).await?;
        let plan = reconcile(StockDirection::Decrease, &previous, &input.line_items);

        let status = input.status.unwrap_or(header.status);
        sqlx::query("UPDATE bills SET customer_id = $1, status = $2 WHERE id = $3")
            .bind(input.customer_id)
            .bind(&status)
            .bind(bill_id)
            .execute(&mut *tx)
            .await?;

        documents::apply_plan(&mut tx, DocumentKind::Bill, bill_id, &plan).await?;

        tx.commit().await?;

        self.get_bill(bill_id).await
    }

    /// Get a bill with its line items
    pub async fn get_bill(&self, bill_id: &str) -> AppResult<Bill> {
        let header = sqlx::query_as::<_, BillRow>(
            "SELECT id, customer_id, status, created_at FROM bills WHERE id = $1",
        )
        .bind(bill_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bill".to_string()))?;

        let line_items = sqlx::query_as::<_, BillLine>(
            "SELECT id, bill_id, item_id, quantity, rate, tax_rate, created_at \
             FROM bill_items WHERE bill_id = $1 ORDER BY created_at",
        )
        .bind(bill_id)
        .fetch_all(&self.db)
        .await?;

        Ok(Bill {
            id: header.id,
            customer_id: header.customer_id,
            status: header.status,
            created_at: header.created_at,
            line_items,
        })
    }

    /// List all bills with their line items
    pub async fn list_bills(&self) -> AppResult<Vec<Bill>> {
        let headers = sqlx::query_as::<_, BillRow>(
            "SELECT id, customer_id, status, created_at FROM bills ORDER BY created_at DESC",
        )
        .fetch_all(&self.db)
        .await?;

        let lines = sqlx::query_as::<_, BillLine>(
            "SELECT id, bill_id, item_id, quantity, rate, tax_rate, created_at \
             FROM bill_items ORDER BY created_at",
        )
        .fetch_all(&self.db)
        .await?;

        let mut by_bill: HashMap<String, Vec<BillLine>> = HashMap::new();
        for line in lines {
            by_bill.entry(line.bill_id.clone()).or_default().push(line);
        }

        Ok(headers
            .into_iter()
            .map(|h| {
                let line_items = by_bill.remove(&h.id).unwrap_or_default();
                Bill {
                    id: h.id,
                    customer_id: h.customer_id,
                    status: h.status,
                    created_at: h.created_at,
                    line_items,
                }
            })
            .collect())
    }

    /// Delete a bill and its lines. Stock sold through the bill stays
    /// sold, matching line-item removal behavior.
    pub async fn delete_bill(&self, bill_id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM bills WHERE id = $1")
            .bind(bill_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Bill".to_string()));
        }

        Ok(())
    }
}
