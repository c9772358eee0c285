use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use till_shared::models::OrderStatus;
use till_store::TableCount;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct TotalRepairResponse {
    order_id: Uuid,
    total_amount: Decimal,
}

#[derive(Debug, Serialize)]
struct StatusRepairResponse {
    order_id: Uuid,
    status: OrderStatus,
}

#[derive(Debug, Serialize)]
struct SchemaResponse {
    message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/orders/{id}/recompute-total", post(recompute_total))
        .route("/v1/admin/orders/{id}/recompute-status", post(recompute_status))
        .route("/v1/admin/schema/drop", post(drop_schema))
        .route("/v1/admin/schema/create", post(create_schema))
        .route("/v1/admin/schema/seed", post(seed_schema))
        .route("/v1/admin/schema/inspect", get(inspect_schema))
}

/// POST /v1/admin/orders/{id}/recompute-total
/// Repair path: re-derives the stored total from the line items. Unlike the
/// recompute that follows a mutation, a failure here is surfaced.
async fn recompute_total(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TotalRepairResponse>, ApiError> {
    let total_amount = state.coordinator.recompute_total(id).await?;
    Ok(Json(TotalRepairResponse {
        order_id: id,
        total_amount,
    }))
}

/// POST /v1/admin/orders/{id}/recompute-status
/// Repair path: re-derives the stored status from the total and paid sum.
async fn recompute_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StatusRepairResponse>, ApiError> {
    let status = state.coordinator.recompute_status(id).await?;
    Ok(Json(StatusRepairResponse {
        order_id: id,
        status,
    }))
}

/// POST /v1/admin/schema/drop
async fn drop_schema(State(state): State<AppState>) -> Result<Json<SchemaResponse>, ApiError> {
    let message = state.schema.drop_schema().await?;
    Ok(Json(SchemaResponse { message }))
}

/// POST /v1/admin/schema/create
async fn create_schema(State(state): State<AppState>) -> Result<Json<SchemaResponse>, ApiError> {
    let message = state.schema.create_schema().await?;
    Ok(Json(SchemaResponse { message }))
}

/// POST /v1/admin/schema/seed
async fn seed_schema(State(state): State<AppState>) -> Result<Json<SchemaResponse>, ApiError> {
    let message = state.schema.seed_sample_data().await?;
    Ok(Json(SchemaResponse { message }))
}

/// GET /v1/admin/schema/inspect
async fn inspect_schema(State(state): State<AppState>) -> Result<Json<Vec<TableCount>>, ApiError> {
    Ok(Json(state.schema.inspect().await?))
}
