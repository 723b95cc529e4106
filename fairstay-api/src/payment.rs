use axum::{
    extract::State, middleware::from_fn_with_state, routing::post, Extension, Json, Router,
};
use serde::Serialize;

use fairstay_booking::BookingDetails;
use fairstay_core::transaction::Transaction;

use crate::error::AppError;
use crate::middleware::auth::{customer_auth_middleware, Claims};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/payment/process", post(process_payment))
        .layer(from_fn_with_state(state, customer_auth_middleware))
}

#[derive(Debug, Serialize)]
struct PaymentResponse {
    message: String,
    transactions: Vec<Transaction>,
}

/// POST /api/payment/process
/// Simulated payment: checks out the whole cart and answers with the created
/// transactions.
async fn process_payment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(details): Json<BookingDetails>,
) -> Result<Json<PaymentResponse>, AppError> {
    let transactions = state.checkout.checkout(&claims.sub, details).await?;

    Ok(Json(PaymentResponse {
        message: "Payment successful".to_string(),
        transactions,
    }))
}
