use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use till_catalog::ProductDraft;
use till_shared::models::Product;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct ProductListQuery {
    category_id: Option<Uuid>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/products", get(list_products).post(create_product))
        .route(
            "/v1/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// GET /v1/products?category_id=...
async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = match query.category_id {
        Some(category_id) => state.catalog.products_in_category(category_id).await?,
        None => state.catalog.list_products().await?,
    };
    Ok(Json(products))
}

/// POST /v1/products
async fn create_product(
    State(state): State<AppState>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.catalog.create_product(draft).await?))
}

/// GET /v1/products/{id}
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.catalog.get_product(id).await?))
}

/// PUT /v1/products/{id}
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.catalog.update_product(id, draft).await?))
}

/// DELETE /v1/products/{id}
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
