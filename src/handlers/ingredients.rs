use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{PaginatedResponse, PaginationParams};
use crate::{
    errors::ServiceError,
    services::catalog::{CreateIngredientRequest, UpdateIngredientRequest},
    AppState,
};

#[derive(Debug, Deserialize)]
struct AdjustStockRequest {
    delta: Decimal,
}

#[derive(Debug, Serialize)]
struct AdjustStockResponse {
    ingredient_id: Uuid,
    current_stock: Decimal,
}

async fn create_ingredient(
    State(state): State<AppState>,
    Json(request): Json<CreateIngredientRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.catalog.create_ingredient(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    let ingredient = state.catalog.get_ingredient(id).await?;
    Ok(Json(ingredient))
}

async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateIngredientRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.catalog.update_ingredient(id, request).await?;
    Ok(Json(updated))
}

async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.catalog.delete_ingredient(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_ingredients(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let (items, total) = state
        .catalog
        .list_ingredients(params.page, params.per_page)
        .await?;
    Ok(Json(PaginatedResponse::new(items, total, params)))
}

async fn list_low_stock(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let items = state.catalog.list_low_stock().await?;
    Ok(Json(items))
}

async fn adjust_stock(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AdjustStockRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let current_stock = state
        .catalog
        .adjust_ingredient_stock(id, request.delta)
        .await?;
    Ok(Json(AdjustStockResponse {
        ingredient_id: id,
        current_stock,
    }))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_ingredient))
        .route("/", get(list_ingredients))
        .route("/low-stock", get(list_low_stock))
        .route("/:id", get(get_ingredient))
        .route("/:id", put(update_ingredient))
        .route("/:id", delete(delete_ingredient))
        .route("/:id/adjust", post(adjust_stock))
}
