#![allow(dead_code)]

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::mpsc;
use uuid::Uuid;

use dinepos_api::{
    config::AppConfig,
    db,
    events::EventSender,
    services::{
        catalog::{CreateIngredientRequest, CreateMenuItemRequest},
        directory::{CreateCustomerRequest, CreateEmployeeRequest, CreateSupplierRequest},
    },
    AppState,
};

/// Harness for spinning up an application state backed by an in-memory
/// SQLite database. One connection keeps concurrent callers serialized
/// in the same order a single SQLite file would.
pub struct TestApp {
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("connect to in-memory sqlite");
        db::run_migrations(&pool).await.expect("run migrations");
        let pool = Arc::new(pool);

        let (tx, rx) = mpsc::channel(64);
        let event_sender = EventSender::new(tx);
        let event_task = tokio::spawn(dinepos_api::events::process_events(rx));

        Self {
            state: AppState::new(pool, cfg, Some(event_sender)),
            _event_task: event_task,
        }
    }

    pub async fn seed_employee(&self, name: &str) -> Uuid {
        let created = self
            .state
            .directory
            .create_employee(CreateEmployeeRequest {
                name: name.to_string(),
                role: "Cashier".to_string(),
                email: format!("{}@test.local", name.to_lowercase().replace(' ', ".")),
                password: "hunter2hunter2".to_string(),
            })
            .await
            .expect("seed employee");
        created.id
    }

    pub async fn seed_customer(&self, name: &str) -> Uuid {
        let created = self
            .state
            .directory
            .create_customer(CreateCustomerRequest {
                name: name.to_string(),
                contact_info: "555-0000".to_string(),
            })
            .await
            .expect("seed customer");
        created.id
    }

    pub async fn seed_supplier(&self, name: &str) -> Uuid {
        let created = self
            .state
            .directory
            .create_supplier(CreateSupplierRequest {
                name: name.to_string(),
                contact_info: "555-0001".to_string(),
                address: "1 Market St".to_string(),
            })
            .await
            .expect("seed supplier");
        created.id
    }

    pub async fn seed_menu_item(&self, name: &str, price: Decimal, quantity: i32) -> Uuid {
        let created = self
            .state
            .catalog
            .create_menu_item(CreateMenuItemRequest {
                name: name.to_string(),
                price,
                unit_measure: "plate".to_string(),
                quantity_available: quantity,
            })
            .await
            .expect("seed menu item");
        created.id
    }

    pub async fn seed_ingredient(
        &self,
        name: &str,
        current_stock: Decimal,
        reorder_point: Decimal,
    ) -> Uuid {
        let created = self
            .state
            .catalog
            .create_ingredient(CreateIngredientRequest {
                name: name.to_string(),
                current_stock,
                reorder_point,
                expiry_date: None,
                auto_order_qty: Decimal::ZERO,
                unit: "kg".to_string(),
            })
            .await
            .expect("seed ingredient");
        created.id
    }
}
