use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use till_shared::models::{Payment, PaymentMethod, PaymentStatus};

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Method and status arrive as strings so an out-of-set value maps to a 400
/// with the offending value, not a serde rejection.
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub order_id: Uuid,
    pub method: String,
    pub amount: Decimal,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentUpdateRequest {
    pub order_id: Uuid,
    pub method: String,
    pub amount: Decimal,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct PaymentListQuery {
    search: Option<String>,
    order_id: Option<Uuid>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/payments", get(list_payments).post(create_payment))
        .route(
            "/v1/payments/{id}",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/payments?search=... | ?order_id=...
/// With `order_id`, the raw payments against that order; otherwise joined
/// display rows, optionally filtered by `search` over id, order id, method,
/// status and amount.
async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<PaymentListQuery>,
) -> Result<Response, ApiError> {
    if let Some(order_id) = query.order_id {
        let payments = state.payments.payments_for_order(order_id).await?;
        return Ok(Json(payments).into_response());
    }
    let details = match query.search.as_deref() {
        Some(term) => state.payments.search_details(term).await?,
        None => state.payments.list_details().await?,
    };
    Ok(Json(details).into_response())
}

/// POST /v1/payments
/// Records the payment (status defaults to PENDING) and re-derives the
/// order's status from the new paid sum.
async fn create_payment(
    State(state): State<AppState>,
    Json(req): Json<PaymentRequest>,
) -> Result<Json<Payment>, ApiError> {
    let method: PaymentMethod = req.method.parse()?;
    let status = match req.status.as_deref() {
        Some(value) => Some(value.parse::<PaymentStatus>()?),
        None => None,
    };
    let payment = state
        .coordinator
        .add_payment(req.order_id, method, req.amount, status)
        .await?;
    Ok(Json(payment))
}

/// GET /v1/payments/{id}
async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, ApiError> {
    Ok(Json(state.payments.payment(id).await?))
}

/// PUT /v1/payments/{id}
/// Rewrites the payment; when it moves to another order, both orders get
/// their status re-derived.
async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PaymentUpdateRequest>,
) -> Result<Json<Payment>, ApiError> {
    let method: PaymentMethod = req.method.parse()?;
    let status: PaymentStatus = req.status.parse()?;
    let payment = state
        .coordinator
        .update_payment(id, req.order_id, method, req.amount, status)
        .await?;
    Ok(Json(payment))
}

/// DELETE /v1/payments/{id}
async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.coordinator.remove_payment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
