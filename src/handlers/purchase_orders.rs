use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};
use uuid::Uuid;

use super::common::{PaginatedResponse, PaginationParams};
use crate::{
    errors::ServiceError,
    services::composer::{
        RecordDeliveryRequest, RecordPurchaseOrderRequest, UpdateOrderStatusRequest,
    },
    AppState,
};

async fn record_purchase_order(
    State(state): State<AppState>,
    Json(request): Json<RecordPurchaseOrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.composer.record_purchase_order(request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn get_purchase_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.composer.get_purchase_order(id).await?;
    Ok(Json(order))
}

async fn list_purchase_orders(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (items, total) = state
        .composer
        .list_purchase_orders(params.page, params.per_page)
        .await?;
    Ok(Json(PaginatedResponse::new(items, total, params)))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.composer.update_order_status(id, &request.status).await?;
    Ok(Json(order))
}

async fn record_delivery(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordDeliveryRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let receipt = state.composer.record_delivery(id, request).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(record_purchase_order))
        .route("/", get(list_purchase_orders))
        .route("/:id", get(get_purchase_order))
        .route("/:id/status", put(update_status))
        .route("/:id/delivery", post(record_delivery))
}
