//! DinePOS API Library
//!
//! Point-of-sale and inventory ledger service for restaurant operations:
//! catalog, party directory, transaction recording, and sales reporting.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::{
    config::AppConfig,
    db::DbPool,
    events::EventSender,
    services::{CatalogService, PartyDirectoryService, ReportService, TransactionComposerService},
};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: AppConfig,
    pub catalog: CatalogService,
    pub directory: PartyDirectoryService,
    pub composer: TransactionComposerService,
    pub reports: ReportService,
}

impl AppState {
    /// Wires up the service layer over a connected pool.
    pub fn new(db: Arc<DbPool>, config: AppConfig, event_sender: Option<EventSender>) -> Self {
        Self {
            catalog: CatalogService::new(db.clone(), event_sender.clone()),
            directory: PartyDirectoryService::new(db.clone(), event_sender.clone()),
            composer: TransactionComposerService::new(db.clone(), event_sender),
            reports: ReportService::new(db.clone()),
            db,
            config,
        }
    }
}

/// Builds the full application router: health probes, the versioned API,
/// and the Swagger UI, with tracing/compression/CORS layers applied.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(handlers::health::routes())
        .nest("/api/v1", handlers::api_routes())
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
