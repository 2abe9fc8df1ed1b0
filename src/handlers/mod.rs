pub mod common;
pub mod customers;
pub mod employees;
pub mod health;
pub mod ingredients;
pub mod menu_items;
pub mod purchase_orders;
pub mod releases;
pub mod reports;
pub mod sales;
pub mod suppliers;

use axum::Router;

use crate::AppState;

/// Assembles every resource router under its path prefix.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/customers", customers::routes())
        .nest("/employees", employees::routes())
        .nest("/suppliers", suppliers::routes())
        .nest("/menu-items", menu_items::routes())
        .nest("/ingredients", ingredients::routes())
        .nest("/sales", sales::routes())
        .nest("/purchase-orders", purchase_orders::routes())
        .nest("/releases", releases::routes())
        .nest("/reports", reports::routes())
}
