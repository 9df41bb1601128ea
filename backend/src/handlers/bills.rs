//! HTTP handlers for bill endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::bills::{Bill, BillService, CreateBillInput, UpdateBillInput};
use crate::AppState;

/// Create a bill
pub async fn create_bill(
    State(state): State<AppState>,
    Json(input): Json<CreateBillInput>,
) -> AppResult<Json<Bill>> {
    let service = BillService::new(state.db);
    let bill = service.create_bill(input).await?;
    Ok(Json(bill))
}

/// Update a bill's header and line items
pub async fn update_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<String>,
    Json(input): Json<UpdateBillInput>,
) -> AppResult<Json<Bill>> {
    let service = BillService::new(state.db);
    let bill = service.update_bill(&bill_id, input).await?;
    Ok(Json(bill))
}

/// Get a bill by id
pub async fn get_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<String>,
) -> AppResult<Json<Bill>> {
    let service = BillService::new(state.db);
    let bill = service.get_bill(&bill_id).await?;
    Ok(Json(bill))
}

/// List all bills
pub async fn list_bills(State(state): State<AppState>) -> AppResult<Json<Vec<Bill>>> {
    let service = BillService::new(state.db);
    let bills = service.list_bills().await?;
    Ok(Json(bills))
}

/// Delete a bill
pub async fn delete_bill(
    State(state): State<AppState>,
    Path(bill_id): Path<String>,
) -> AppResult<Json<()>> {
    let service = BillService::new(state.db);
    service.delete_bill(&bill_id).await?;
    Ok(Json(()))
}
