//! Item catalog service
//!
//! Item stock levels are owned by the stock ledger; the catalog API only
//! seeds an opening balance at creation and never overwrites it afterwards.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::stock::derive_stock_status;
use shared::validation::{validate_price, validate_reorder_point};

/// Item service for catalog management
#[derive(Clone)]
pub struct ItemService {
    db: PgPool,
}

/// A catalog item with its current stock position
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub stock_level: i32,
    pub reorder_point: i32,
    pub status: String,
    pub vendor_id: Option<Uuid>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an item
#[derive(Debug, Deserialize)]
pub struct CreateItemInput {
    pub name: String,
    pub price: Decimal,
    pub stock_level: Option<i32>,
    pub reorder_point: Option<i32>,
    pub vendor_id: Option<Uuid>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Input for updating an item. Stock level is deliberately absent;
/// only bill and purchase order reconciliation moves it.
#[derive(Debug, Deserialize)]
pub struct UpdateItemInput {
    pub name: String,
    pub price: Decimal,
    pub reorder_point: i32,
    pub vendor_id: Option<Uuid>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

const ITEM_COLUMNS: &str = "id, name, price, stock_level, reorder_point, status, \
                            vendor_id, description, image_url, created_at";

impl ItemService {
    /// Create a new ItemService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create an item, seeding its opening stock balance and deriving
    /// its initial status.
    pub async fn create_item(&self, input: CreateItemInput) -> AppResult<Item> {
        validate_price(input.price).map_err(|msg| AppError::validation("price", msg))?;

        let stock_level = input.stock_level.unwrap_or(0);
        let reorder_point = input.reorder_point.unwrap_or(0);
        validate_reorder_point(reorder_point)
            .map_err(|msg| AppError::validation("reorder_point", msg))?;

        let status = derive_stock_status(stock_level, reorder_point);

        let item = sqlx::query_as::<_, Item>(&format!(
            "INSERT INTO items (name, price, stock_level, reorder_point, status, \
                                vendor_id, description, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(input.price)
        .bind(stock_level)
        .bind(reorder_point)
        .bind(status.as_str())
        .bind(input.vendor_id)
        .bind(&input.description)
        .bind(&input.image_url)
        .fetch_one(&self.db)
        .await?;

        Ok(item)
    }

    /// Update an item's catalog fields. The stored stock level is read
    /// back so the status can be re-derived against the new threshold.
    pub async fn update_item(&self, item_id: Uuid, input: UpdateItemInput) -> AppResult<Item> {
        validate_price(input.price).map_err(|msg| AppError::validation("price", msg))?;
        validate_reorder_point(input.reorder_point)
            .map_err(|msg| AppError::validation("reorder_point", msg))?;

        let stock_level =
            sqlx::query_scalar::<_, i32>("SELECT stock_level FROM items WHERE id = $1")
                .bind(item_id)
                .fetch_optional(&self.db)
                .await?
                .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        let status = derive_stock_status(stock_level, input.reorder_point);

        let item = sqlx::query_as::<_, Item>(&format!(
            "UPDATE items SET name = $1, price = $2, reorder_point = $3, status = $4, \
                              vendor_id = $5, description = $6, image_url = $7 \
             WHERE id = $8 \
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(input.price)
        .bind(input.reorder_point)
        .bind(status.as_str())
        .bind(input.vendor_id)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(item_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        Ok(item)
    }

    /// Get an item by id
    pub async fn get_item(&self, item_id: Uuid) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1"))
            .bind(item_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Item".to_string()))
    }

    /// List items, optionally restricted to a single vendor
    pub async fn list_items(&self, vendor_id: Option<Uuid>) -> AppResult<Vec<Item>> {
        let items = match vendor_id {
            Some(vendor_id) => {
                sqlx::query_as::<_, Item>(&format!(
                    "SELECT {ITEM_COLUMNS} FROM items WHERE vendor_id = $1 ORDER BY created_at DESC"
                ))
                .bind(vendor_id)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Item>(&format!(
                    "SELECT {ITEM_COLUMNS} FROM items ORDER BY created_at DESC"
                ))
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(items)
    }

    /// Delete an item
    pub async fn delete_item(&self, item_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(item_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Item".to_string()));
        }

        Ok(())
    }
}
