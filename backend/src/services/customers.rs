//! Customer management service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::validation::validate_phone;

/// Customer service
#[derive(Clone)]
pub struct CustomerService {
    db: PgPool,
}

/// A customer who is billed for stock
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub phone_no: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating or updating a customer
#[derive(Debug, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub phone_no: String,
}

impl CustomerService {
    /// Create a new CustomerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a customer. Phone numbers are unique.
    pub async fn create_customer(&self, input: CustomerInput) -> AppResult<Customer> {
        validate_phone(&input.phone_no).map_err(|msg| AppError::validation("phone_no", msg))?;

        let customer = sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (name, phone_no) VALUES ($1, $2) \
             RETURNING id, name, phone_no, created_at",
        )
        .bind(&input.name)
        .bind(&input.phone_no)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::duplicate_on_unique(e, "phone_no"))?;

        Ok(customer)
    }

    /// Update a customer's details
    pub async fn update_customer(
        &self,
        customer_id: Uuid,
        input: CustomerInput,
    ) -> AppResult<Customer> {
        validate_phone(&input.phone_no).map_err(|msg| AppError::validation("phone_no", msg))?;

        sqlx::query_as::<_, Customer>(
            "UPDATE customers SET name = $1, phone_no = $2 WHERE id = $3 \
             RETURNING id, name, phone_no, created_at",
        )
        .bind(&input.name)
        .bind(&input.phone_no)
        .bind(customer_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::duplicate_on_unique(e, "phone_no"))?
        .ok_or_else(|| AppError::NotFound("Customer".to_string()))
    }

    /// Get a customer by id
    pub async fn get_customer(&self, customer_id: Uuid) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone_no, created_at FROM customers WHERE id = $1",
        )
        .bind(customer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer".to_string()))
    }

    /// Look a customer up by phone number, the key billing flows use
    pub async fn get_customer_by_phone(&self, phone_no: &str) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone_no, created_at FROM customers WHERE phone_no = $1",
        )
        .bind(phone_no)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer".to_string()))
    }

    /// List all customers
    pub async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone_no, created_at FROM customers ORDER BY created_at DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(customers)
    }

    /// Delete a customer
    pub async fn delete_customer(&self, customer_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(customer_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Customer".to_string()));
        }

        Ok(())
    }
}
