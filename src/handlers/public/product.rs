// handlers/public/product.rs - Unauthenticated inventory CRUD
//
// Pass-throughs to the store: no schema validation on the way in, raw
// documents and store results on the way out.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::database::repository::InventoryRepository;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /product - full collection, no filter
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Value>>> {
    let items = InventoryRepository::new(&state.pool).find_all().await?;
    Ok(Json(items))
}

/// GET /product/:id - single document, or a JSON null body when absent.
/// A miss is store-level behavior, not an API error.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_item_id(&id)?;

    let item = InventoryRepository::new(&state.pool).find_one(id).await?;
    Ok(Json(item.unwrap_or(Value::Null)))
}

/// POST /product - insert an arbitrary document body unconditionally
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let result = InventoryRepository::new(&state.pool).insert(&payload).await?;

    let body = serde_json::to_value(result)
        .map_err(|_| ApiError::internal_server_error("failed to format response"))?;
    Ok((StatusCode::CREATED, Json(body)))
}

#[derive(Debug, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: Value,
}

/// PUT /product/:id - upserting quantity update.
///
/// An unknown id creates a fresh document containing only the quantity
/// field; an existing document keeps all its other fields.
pub async fn update_product_quantity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<QuantityUpdate>,
) -> ApiResult<Json<Value>> {
    let id = parse_item_id(&id)?;

    let result = InventoryRepository::new(&state.pool)
        .update_quantity(id, &payload.quantity)
        .await?;

    let body = serde_json::to_value(result)
        .map_err(|_| ApiError::internal_server_error("failed to format response"))?;
    Ok(Json(body))
}

/// DELETE /product/:id - delete by id; deleting an absent id reports zero
/// affected rather than erroring.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_item_id(&id)?;

    let result = InventoryRepository::new(&state.pool).delete(id).await?;

    let body = serde_json::to_value(result)
        .map_err(|_| ApiError::internal_server_error("failed to format response"))?;
    Ok(Json(body))
}

fn parse_item_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("invalid item id: {}", raw)))
}
