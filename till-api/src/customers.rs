use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use till_core::CoreError;
use till_shared::models::{Customer, OrderSummary};
use till_shared::pii::Masked;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/customers", get(list_customers).post(create_customer))
        .route(
            "/v1/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/v1/customers/{id}/orders", get(customer_orders))
}

fn validate(req: &CustomerRequest) -> Result<(), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("customer name must not be empty".into()));
    }
    Ok(())
}

/// GET /v1/customers
async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(state.customers.list_customers().await?))
}

/// POST /v1/customers
async fn create_customer(
    State(state): State<AppState>,
    Json(req): Json<CustomerRequest>,
) -> Result<Json<Customer>, ApiError> {
    validate(&req)?;
    let customer = Customer::new(req.name, req.email, req.phone);
    state.customers.create_customer(&customer).await?;
    Ok(Json(customer))
}

/// GET /v1/customers/{id}
async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, ApiError> {
    let customer = state
        .customers
        .get_customer(id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("customer {id}")))?;
    Ok(Json(customer))
}

/// PUT /v1/customers/{id}
async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CustomerRequest>,
) -> Result<Json<Customer>, ApiError> {
    validate(&req)?;
    let customer = Customer {
        id,
        name: req.name,
        email: req.email.map(Masked),
        phone: Masked(req.phone),
    };
    if !state.customers.update_customer(&customer).await? {
        return Err(CoreError::NotFound(format!("customer {id}")).into());
    }
    Ok(Json(customer))
}

/// DELETE /v1/customers/{id}
async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.customers.delete_customer(id).await? {
        return Err(CoreError::NotFound(format!("customer {id}")).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/customers/{id}/orders
/// The customer's orders, newest first.
async fn customer_orders(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<OrderSummary>>, ApiError> {
    state
        .customers
        .get_customer(id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("customer {id}")))?;
    Ok(Json(state.orders.order_summaries_for_customer(id).await?))
}
