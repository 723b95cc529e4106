use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use fairstay_booking::NewTransaction;
use fairstay_core::transaction::{Transaction, TransactionStatus};

use crate::error::AppError;
use crate::middleware::auth::{customer_auth_middleware, Claims};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/transactions", get(list_transactions))
        .route("/api/transactions", post(create_transaction))
        .route("/api/transactions/{id}", get(get_transaction))
        .route("/api/transactions/{id}/status", put(update_status))
        .layer(from_fn_with_state(state, customer_auth_middleware))
}

#[derive(Debug, Deserialize)]
struct UpdateStatusRequest {
    status: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/transactions
async fn list_transactions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions = state.ledger.list_for_user(&claims.sub).await?;
    Ok(Json(transactions))
}

/// GET /api/transactions/:id
async fn get_transaction(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<Transaction>, AppError> {
    let transaction = state.ledger.get(&claims.sub, id).await?;
    Ok(Json(transaction))
}

/// POST /api/transactions
/// Records a booking made outside the cart flow; the owner is the caller.
async fn create_transaction(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(new): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), AppError> {
    let transaction = state.ledger.create(&claims.sub, new).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// PUT /api/transactions/:id/status
async fn update_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Transaction>, AppError> {
    let status: TransactionStatus = req
        .status
        .parse()
        .map_err(AppError::ValidationError)?;

    let transaction = state.ledger.update_status(&claims.sub, id, status).await?;
    Ok(Json(transaction))
}
