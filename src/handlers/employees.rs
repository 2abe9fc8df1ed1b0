use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use super::common::{PaginatedResponse, PaginationParams};
use crate::{
    errors::ServiceError,
    services::directory::{CreateEmployeeRequest, UpdateEmployeeRequest},
    AppState,
};

#[derive(Debug, Deserialize)]
struct VerifyCredentialRequest {
    email: String,
    password: String,
}

async fn create_employee(
    State(state): State<AppState>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.directory.create_employee(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let employee = state.directory.get_employee(id).await?;
    Ok(Json(employee))
}

async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.directory.update_employee(id, request).await?;
    Ok(Json(updated))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.directory.delete_employee(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (items, total) = state
        .directory
        .list_employees(params.page, params.per_page)
        .await?;
    Ok(Json(PaginatedResponse::new(items, total, params)))
}

async fn verify_credential(
    State(state): State<AppState>,
    Json(request): Json<VerifyCredentialRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let employee = state
        .directory
        .verify_employee_credential(&request.email, &request.password)
        .await?;
    Ok(Json(employee))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_employee))
        .route("/", get(list_employees))
        .route("/verify", post(verify_credential))
        .route("/:id", get(get_employee))
        .route("/:id", put(update_employee))
        .route("/:id", delete(delete_employee))
}
