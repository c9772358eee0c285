use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use till_core::CoreError;
use till_shared::models::{LineItem, LineItemDetail, Order, OrderStatus, OrderSummary};

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Client-settable order fields. Total and status are derived and never
/// accepted from a request.
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub order_date: Option<DateTime<Utc>>,
    pub customer_id: Uuid,
    pub employee_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize)]
struct OrderListQuery {
    search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderView {
    pub id: Uuid,
    pub order_date: DateTime<Utc>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub customer_id: Uuid,
    pub employee_id: Uuid,
    pub customer_name: String,
    pub employee_name: String,
    pub items: Vec<LineItemDetail>,
}

impl OrderView {
    fn from_parts(summary: OrderSummary, items: Vec<LineItemDetail>) -> Self {
        Self {
            id: summary.id,
            order_date: summary.order_date,
            total_amount: summary.total_amount,
            status: summary.status,
            customer_id: summary.customer_id,
            employee_id: summary.employee_id,
            customer_name: summary.customer_name,
            employee_name: summary.employee_name,
            items,
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/orders", get(list_orders).post(create_order))
        .route(
            "/v1/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/v1/orders/{id}/items", get(list_items).post(add_item))
        .route("/v1/orders/{id}/items/{product_id}", delete(remove_item))
}

async fn ensure_parties(
    state: &AppState,
    customer_id: Uuid,
    employee_id: Uuid,
) -> Result<(), ApiError> {
    state
        .customers
        .get_customer(customer_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("customer {customer_id}")))?;
    state
        .employees
        .get_employee(employee_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("employee {employee_id}")))?;
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/orders?search=...
/// All orders with party names, newest first; `search` filters by id,
/// customer name, employee name or status.
async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<OrderSummary>>, ApiError> {
    let summaries = match query.search.as_deref() {
        Some(term) => state.orders.search_order_summaries(term).await?,
        None => state.orders.list_order_summaries().await?,
    };
    Ok(Json(summaries))
}

/// POST /v1/orders
/// Opens an order with a zero total and Pending status.
async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<OrderRequest>,
) -> Result<Json<Order>, ApiError> {
    ensure_parties(&state, req.customer_id, req.employee_id).await?;
    let order = Order::new(req.customer_id, req.employee_id, req.order_date);
    state.orders.create_order(&order).await?;
    Ok(Json(order))
}

/// GET /v1/orders/{id}
/// The order summary together with its line items.
async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderView>, ApiError> {
    let summary = state
        .orders
        .get_order_summary(id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("order {id}")))?;
    let items = state.items.items_for_order(id).await?;
    Ok(Json(OrderView::from_parts(summary, items)))
}

/// PUT /v1/orders/{id}
/// Rewrites order date and parties; a missing date keeps the stored one.
async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OrderRequest>,
) -> Result<Json<OrderView>, ApiError> {
    ensure_parties(&state, req.customer_id, req.employee_id).await?;
    let existing = state
        .orders
        .get_order(id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("order {id}")))?;
    let order_date = req.order_date.unwrap_or(existing.order_date);
    if !state
        .orders
        .update_order_details(id, order_date, req.customer_id, req.employee_id)
        .await?
    {
        return Err(CoreError::NotFound(format!("order {id}")).into());
    }

    let summary = state
        .orders
        .get_order_summary(id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("order {id}")))?;
    let items = state.items.items_for_order(id).await?;
    Ok(Json(OrderView::from_parts(summary, items)))
}

/// DELETE /v1/orders/{id}
/// Cascade: line items, then payments, then the order row. Succeeds when the
/// order is already gone.
async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.coordinator.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/orders/{id}/items
async fn list_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LineItemDetail>>, ApiError> {
    state
        .orders
        .get_order(id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("order {id}")))?;
    Ok(Json(state.items.items_for_order(id).await?))
}

/// POST /v1/orders/{id}/items
/// Adds the line (or replaces the line for the same product) and re-derives
/// the order total.
async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ItemRequest>,
) -> Result<Json<LineItem>, ApiError> {
    let item = state
        .coordinator
        .add_item(id, req.product_id, req.quantity, req.unit_price)
        .await?;
    Ok(Json(item))
}

/// DELETE /v1/orders/{id}/items/{product_id}
/// Removes the line and re-derives the order total; removing an absent line
/// is a no-op.
async fn remove_item(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state.coordinator.remove_item(id, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
