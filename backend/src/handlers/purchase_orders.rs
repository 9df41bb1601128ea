//! HTTP handlers for purchase order endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::purchase_orders::{
    CreatePurchaseOrderInput, PurchaseOrder, PurchaseOrderService, UpdatePurchaseOrderInput,
};
use crate::AppState;

/// Create a purchase order
pub async fn create_purchase_order(
    State(state): State<AppState>,
    Json(input): Json<CreatePurchaseOrderInput>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchaseOrderService::new(state.db);
    let order = service.create_purchase_order(input).await?;
    Ok(Json(order))
}

/// Update a purchase order's header and line items
pub async fn update_purchase_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(input): Json<UpdatePurchaseOrderInput>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchaseOrderService::new(state.db);
    let order = service.update_purchase_order(&order_id, input).await?;
    Ok(Json(order))
}

/// Get a purchase order by id
pub async fn get_purchase_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchaseOrderService::new(state.db);
    let order = service.get_purchase_order(&order_id).await?;
    Ok(Json(order))
}

/// List all purchase orders
pub async fn list_purchase_orders(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PurchaseOrder>>> {
    let service = PurchaseOrderService::new(state.db);
    let orders = service.list_purchase_orders().await?;
    Ok(Json(orders))
}

/// Delete a purchase order
pub async fn delete_purchase_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<()>> {
    let service = PurchaseOrderService::new(state.db);
    service.delete_purchase_order(&order_id).await?;
    Ok(Json(()))
}
