use axum::{
    extract::{Path, State},
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use fairstay_booking::CartSummary;

use crate::error::AppError;
use crate::middleware::auth::{customer_auth_middleware, Claims};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/cart", get(get_cart))
        .route("/api/cart/add", post(add_item))
        .route("/api/cart/update/{package_id}", put(update_quantity))
        .route("/api/cart/remove/{package_id}", delete(remove_item))
        .route("/api/cart/clear", delete(clear_cart))
        .layer(from_fn_with_state(state, customer_auth_middleware))
}

// ============================================================================
// Request Types
// ============================================================================

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddItemRequest {
    package_id: Uuid,
    #[serde(default = "default_quantity")]
    quantity: i64,
}

#[derive(Debug, Deserialize)]
struct UpdateQuantityRequest {
    quantity: i64,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/cart
async fn get_cart(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<CartSummary>, AppError> {
    let summary = state.cart.summary(&claims.sub).await?;
    Ok(Json(summary))
}

/// POST /api/cart/add
async fn add_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CartSummary>, AppError> {
    let quantity = u32::try_from(req.quantity)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or_else(|| AppError::ValidationError("quantity must be at least 1".to_string()))?;

    let summary = state.cart.add(&claims.sub, req.package_id, quantity).await?;
    Ok(Json(summary))
}

/// PUT /api/cart/update/:packageId
async fn update_quantity(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(package_id): Path<Uuid>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Result<Json<CartSummary>, AppError> {
    let summary = state
        .cart
        .update_quantity(&claims.sub, package_id, req.quantity)
        .await?;
    Ok(Json(summary))
}

/// DELETE /api/cart/remove/:packageId
async fn remove_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(package_id): Path<Uuid>,
) -> Result<Json<CartSummary>, AppError> {
    let summary = state.cart.remove(&claims.sub, package_id).await?;
    Ok(Json(summary))
}

/// DELETE /api/cart/clear
async fn clear_cart(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.cart.clear(&claims.sub).await?;
    Ok(Json(json!({
        "message": "Cart cleared successfully",
        "items": [],
        "totalAmount": 0,
        "itemCount": 0,
    })))
}
