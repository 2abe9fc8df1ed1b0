use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{errors::ServiceError, AppState};

#[derive(Debug, Deserialize)]
struct DateRangeParams {
    from: NaiveDate,
    to: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct PopularityParams {
    from: NaiveDate,
    to: NaiveDate,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    10
}

async fn sales_summary(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let summary = state.reports.sales_summary(params.from, params.to).await?;
    Ok(Json(summary))
}

async fn item_popularity(
    State(state): State<AppState>,
    Query(params): Query<PopularityParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let ranking = state
        .reports
        .item_popularity(params.from, params.to, params.limit)
        .await?;
    Ok(Json(ranking))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales-summary", get(sales_summary))
        .route("/item-popularity", get(item_popularity))
}
