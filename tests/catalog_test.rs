mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;

use common::TestApp;
use dinepos_api::{
    errors::ServiceError,
    services::composer::{RecordSaleRequest, SaleLineInput},
};

#[tokio::test]
async fn adjustments_move_quantities_and_reads_are_idempotent() {
    let app = TestApp::new().await;
    let burger = app.seed_menu_item("Burger", dec!(9.50), 10).await;
    let flour = app.seed_ingredient("Flour", dec!(5.0), dec!(2.0)).await;

    let quantity = app
        .state
        .catalog
        .adjust_menu_item_quantity(burger, -4)
        .await
        .unwrap();
    assert_eq!(quantity, 6);

    let stock = app
        .state
        .catalog
        .adjust_ingredient_stock(flour, dec!(2.5))
        .await
        .unwrap();
    assert_eq!(stock, dec!(7.5));

    // Reads do not move anything.
    for _ in 0..3 {
        let item = app.state.catalog.get_menu_item(burger).await.unwrap();
        assert_eq!(item.quantity_available, 6);
    }
}

#[tokio::test]
async fn adjustments_never_go_below_zero() {
    let app = TestApp::new().await;
    let burger = app.seed_menu_item("Burger", dec!(9.50), 3).await;
    let flour = app.seed_ingredient("Flour", dec!(1.0), dec!(0.5)).await;

    let too_many = app.state.catalog.adjust_menu_item_quantity(burger, -4).await;
    assert_matches!(too_many, Err(ServiceError::OutOfStock(_)));

    let too_much = app
        .state
        .catalog
        .adjust_ingredient_stock(flour, dec!(-1.5))
        .await;
    assert_matches!(too_much, Err(ServiceError::InsufficientStock(_)));

    // An exact draw-down to zero is allowed.
    let to_zero = app
        .state
        .catalog
        .adjust_menu_item_quantity(burger, -3)
        .await
        .unwrap();
    assert_eq!(to_zero, 0);
}

#[tokio::test]
async fn low_stock_listing_tracks_the_reorder_point() {
    let app = TestApp::new().await;
    let flour = app.seed_ingredient("Flour", dec!(10.0), dec!(3.0)).await;
    let _sugar = app.seed_ingredient("Sugar", dec!(8.0), dec!(1.0)).await;
    let salt = app.seed_ingredient("Salt", dec!(0.5), dec!(1.0)).await;

    let low = app.state.catalog.list_low_stock().await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].id, salt);

    // Draw flour down to its reorder point; at the boundary counts as low.
    app.state
        .catalog
        .adjust_ingredient_stock(flour, dec!(-7.0))
        .await
        .unwrap();

    let low = app.state.catalog.list_low_stock().await.unwrap();
    assert_eq!(low.len(), 2);
    // Ordered by name.
    assert_eq!(low[0].name, "Flour");
    assert_eq!(low[1].name, "Salt");
}

#[tokio::test]
async fn deleting_a_referenced_menu_item_is_refused() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Casey Till").await;
    let burger = app.seed_menu_item("Burger", dec!(9.50), 10).await;

    app.state
        .composer
        .record_sale(RecordSaleRequest {
            customer_id: None,
            employee_id: employee,
            items: vec![SaleLineInput {
                menu_item_id: burger,
                quantity: 1,
            }],
        })
        .await
        .unwrap();

    let delete = app.state.catalog.delete_menu_item(burger).await;
    assert_matches!(delete, Err(ServiceError::Conflict(_)));

    // Unreferenced items delete cleanly.
    let soup = app.seed_menu_item("Soup", dec!(4.00), 2).await;
    app.state.catalog.delete_menu_item(soup).await.unwrap();
    let gone = app.state.catalog.get_menu_item(soup).await;
    assert_matches!(gone, Err(ServiceError::NotFound(_)));
}
