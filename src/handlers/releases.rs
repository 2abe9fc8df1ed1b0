use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use super::common::{PaginatedResponse, PaginationParams};
use crate::{errors::ServiceError, services::composer::RecordReleaseRequest, AppState};

async fn record_release(
    State(state): State<AppState>,
    Json(request): Json<RecordReleaseRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let record = state.composer.record_release(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_releases(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (items, total) = state
        .composer
        .list_releases(params.page, params.per_page)
        .await?;
    Ok(Json(PaginatedResponse::new(items, total, params)))
}

async fn get_release(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let record = state.composer.get_release(id).await?;
    Ok(Json(record))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(record_release))
        .route("/", get(list_releases))
        .route("/:id", get(get_release))
}
