use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use super::common::{PaginatedResponse, PaginationParams};
use crate::{errors::ServiceError, services::composer::RecordSaleRequest, AppState};

async fn record_sale(
    State(state): State<AppState>,
    Json(request): Json<RecordSaleRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let sale = state.composer.record_sale(request).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let sale = state.composer.get_sale(id).await?;
    Ok(Json(sale))
}

async fn list_sales(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (items, total) = state
        .composer
        .list_sales(params.page, params.per_page)
        .await?;
    Ok(Json(PaginatedResponse::new(items, total, params)))
}

async fn void_sale(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let sale = state.composer.void_sale(id).await?;
    Ok(Json(sale))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(record_sale))
        .route("/", get(list_sales))
        .route("/:id", get(get_sale))
        .route("/:id/void", post(void_sale))
}
