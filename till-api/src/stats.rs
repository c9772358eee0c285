use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub customers: i64,
    pub employees: i64,
    pub categories: i64,
    pub products: i64,
    pub orders: i64,
    pub order_items: i64,
    pub payments: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/stats", get(stats))
}

/// GET /v1/stats
/// Dashboard row counts, one per table.
async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let counts = state.schema.inspect().await?;
    let rows = |table: &str| {
        counts
            .iter()
            .find(|c| c.table == table)
            .map(|c| c.rows)
            .unwrap_or(0)
    };
    Ok(Json(StatsResponse {
        customers: rows("customers"),
        employees: rows("employees"),
        categories: rows("categories"),
        products: rows("products"),
        orders: rows("orders"),
        order_items: rows("order_items"),
        payments: rows("payments"),
    }))
}
