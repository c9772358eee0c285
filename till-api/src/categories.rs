use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use till_catalog::CategoryDraft;
use till_shared::models::Category;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/categories", get(list_categories).post(create_category))
        .route(
            "/v1/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

/// GET /v1/categories
async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.catalog.list_categories().await?))
}

/// POST /v1/categories
async fn create_category(
    State(state): State<AppState>,
    Json(draft): Json<CategoryDraft>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.catalog.create_category(draft).await?))
}

/// GET /v1/categories/{id}
async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.catalog.get_category(id).await?))
}

/// PUT /v1/categories/{id}
async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(draft): Json<CategoryDraft>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.catalog.update_category(id, draft).await?))
}

/// DELETE /v1/categories/{id}
async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
