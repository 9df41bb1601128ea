//! Vendor management service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::validation::validate_phone;

/// Vendor service
#[derive(Clone)]
pub struct VendorService {
    db: PgPool,
}

/// A vendor that stock is purchased from
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vendor {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating or updating a vendor
#[derive(Debug, Deserialize)]
pub struct VendorInput {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
}

impl VendorService {
    /// Create a new VendorService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a vendor
    pub async fn create_vendor(&self, input: VendorInput) -> AppResult<Vendor> {
        if let Some(phone) = &input.phone {
            validate_phone(phone).map_err(|msg| AppError::validation("phone", msg))?;
        }

        let vendor = sqlx::query_as::<_, Vendor>(
            "INSERT INTO vendors (name, phone, address, status) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, phone, address, status, created_at",
        )
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(input.status.as_deref().unwrap_or("Active"))
        .fetch_one(&self.db)
        .await?;

        Ok(vendor)
    }

    /// Update a vendor's details
    pub async fn update_vendor(&self, vendor_id: Uuid, input: VendorInput) -> AppResult<Vendor> {
        if let Some(phone) = &input.phone {
            validate_phone(phone).map_err(|msg| AppError::validation("phone", msg))?;
        }

        sqlx::query_as::<_, Vendor>(
            "UPDATE vendors SET name = $1, phone = $2, address = $3, \
                                status = COALESCE($4, status) \
             WHERE id = $5 \
             RETURNING id, name, phone, address, status, created_at",
        )
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.status)
        .bind(vendor_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor".to_string()))
    }

    /// Get a vendor by id
    pub async fn get_vendor(&self, vendor_id: Uuid) -> AppResult<Vendor> {
        sqlx::query_as::<_, Vendor>(
            "SELECT id, name, phone, address, status, created_at FROM vendors WHERE id = $1",
        )
        .bind(vendor_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor".to_string()))
    }

    /// List all vendors
    pub async fn list_vendors(&self) -> AppResult<Vec<Vendor>> {
        let vendors = sqlx::query_as::<_, Vendor>(
            "SELECT id, name, phone, address, status, created_at \
             FROM vendors ORDER BY created_at DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(vendors)
    }

    /// Delete a vendor
    pub async fn delete_vendor(&self, vendor_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vendors WHERE id = $1")
            .bind(vendor_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vendor".to_string()));
        }

        Ok(())
    }
}
