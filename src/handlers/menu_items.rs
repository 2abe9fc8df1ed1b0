use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{PaginatedResponse, PaginationParams};
use crate::{
    errors::ServiceError,
    services::catalog::{CreateMenuItemRequest, UpdateMenuItemRequest},
    AppState,
};

#[derive(Debug, Deserialize)]
struct AdjustQuantityRequest {
    delta: i32,
}

#[derive(Debug, Serialize)]
struct AdjustQuantityResponse {
    menu_item_id: Uuid,
    quantity_available: i32,
}

async fn create_menu_item(
    State(state): State<AppState>,
    Json(request): Json<CreateMenuItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.catalog.create_menu_item(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.catalog.get_menu_item(id).await?;
    Ok(Json(item))
}

async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMenuItemRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.catalog.update_menu_item(id, request).await?;
    Ok(Json(updated))
}

async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.catalog.delete_menu_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_menu_items(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (items, total) = state
        .catalog
        .list_menu_items(params.page, params.per_page)
        .await?;
    Ok(Json(PaginatedResponse::new(items, total, params)))
}

async fn adjust_quantity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AdjustQuantityRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let quantity_available = state
        .catalog
        .adjust_menu_item_quantity(id, request.delta)
        .await?;
    Ok(Json(AdjustQuantityResponse {
        menu_item_id: id,
        quantity_available,
    }))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_menu_item))
        .route("/", get(list_menu_items))
        .route("/:id", get(get_menu_item))
        .route("/:id", put(update_menu_item))
        .route("/:id", delete(delete_menu_item))
        .route("/:id/adjust", post(adjust_quantity))
}
