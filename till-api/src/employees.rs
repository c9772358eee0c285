use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use till_core::CoreError;
use till_shared::models::Employee;
use till_shared::pii::Masked;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EmployeeRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/employees", get(list_employees).post(create_employee))
        .route(
            "/v1/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

fn validate(req: &EmployeeRequest) -> Result<(), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("employee name must not be empty".into()));
    }
    Ok(())
}

/// GET /v1/employees
async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.employees.list_employees().await?))
}

/// POST /v1/employees
async fn create_employee(
    State(state): State<AppState>,
    Json(req): Json<EmployeeRequest>,
) -> Result<Json<Employee>, ApiError> {
    validate(&req)?;
    let employee = Employee::new(req.name, req.email, req.phone, req.role);
    state.employees.create_employee(&employee).await?;
    Ok(Json(employee))
}

/// GET /v1/employees/{id}
async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Employee>, ApiError> {
    let employee = state
        .employees
        .get_employee(id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("employee {id}")))?;
    Ok(Json(employee))
}

/// PUT /v1/employees/{id}
async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EmployeeRequest>,
) -> Result<Json<Employee>, ApiError> {
    validate(&req)?;
    let employee = Employee {
        id,
        name: req.name,
        email: Masked(req.email),
        phone: Masked(req.phone),
        role: req.role,
    };
    if !state.employees.update_employee(&employee).await? {
        return Err(CoreError::NotFound(format!("employee {id}")).into());
    }
    Ok(Json(employee))
}

/// DELETE /v1/employees/{id}
async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.employees.delete_employee(id).await? {
        return Err(CoreError::NotFound(format!("employee {id}")).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
