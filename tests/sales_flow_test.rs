mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use uuid::Uuid;

use common::TestApp;
use dinepos_api::{
    errors::ServiceError,
    services::catalog::UpdateMenuItemRequest,
    services::composer::{RecordSaleRequest, SaleLineInput},
};

#[tokio::test]
async fn recording_a_sale_decrements_stock_and_totals_lines() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Casey Till").await;
    let customer = app.seed_customer("Walk In").await;
    let burger = app.seed_menu_item("Burger", dec!(9.50), 10).await;
    let fries = app.seed_menu_item("Fries", dec!(3.25), 20).await;

    let sale = app
        .state
        .composer
        .record_sale(RecordSaleRequest {
            customer_id: Some(customer),
            employee_id: employee,
            items: vec![
                SaleLineInput {
                    menu_item_id: burger,
                    quantity: 2,
                },
                SaleLineInput {
                    menu_item_id: fries,
                    quantity: 3,
                },
            ],
        })
        .await
        .expect("sale should succeed");

    assert_eq!(sale.transaction.total_amount, dec!(28.75));
    assert_eq!(sale.transaction.status, "completed");
    assert_eq!(sale.lines.len(), 2);

    let burger_line = sale
        .lines
        .iter()
        .find(|l| l.menu_item_id == burger)
        .unwrap();
    assert_eq!(burger_line.unit_price, dec!(9.50));
    assert_eq!(burger_line.subtotal, dec!(19.00));

    let burger_after = app.state.catalog.get_menu_item(burger).await.unwrap();
    let fries_after = app.state.catalog.get_menu_item(fries).await.unwrap();
    assert_eq!(burger_after.quantity_available, 8);
    assert_eq!(fries_after.quantity_available, 17);
}

#[tokio::test]
async fn a_single_short_line_rejects_the_whole_sale() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Casey Till").await;
    let burger = app.seed_menu_item("Burger", dec!(9.50), 10).await;
    let cake = app.seed_menu_item("Cake", dec!(5.00), 1).await;

    let result = app
        .state
        .composer
        .record_sale(RecordSaleRequest {
            customer_id: None,
            employee_id: employee,
            items: vec![
                SaleLineInput {
                    menu_item_id: burger,
                    quantity: 4,
                },
                SaleLineInput {
                    menu_item_id: cake,
                    quantity: 2,
                },
            ],
        })
        .await;

    assert_matches!(result, Err(ServiceError::OutOfStock(_)));

    // Nothing moved: the burger decrement rolled back with the cake failure.
    let burger_after = app.state.catalog.get_menu_item(burger).await.unwrap();
    let cake_after = app.state.catalog.get_menu_item(cake).await.unwrap();
    assert_eq!(burger_after.quantity_available, 10);
    assert_eq!(cake_after.quantity_available, 1);

    let (sales, total) = app.state.composer.list_sales(1, 10).await.unwrap();
    assert!(sales.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
async fn line_prices_are_snapshots_independent_of_later_catalog_edits() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Casey Till").await;
    let burger = app.seed_menu_item("Burger", dec!(9.50), 10).await;

    let sale = app
        .state
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

    app.state
        .catalog
        .update_menu_item(
            burger,
            UpdateMenuItemRequest {
                name: "Burger".to_string(),
                price: dec!(12.00),
                unit_measure: "plate".to_string(),
            },
        )
        .await
        .unwrap();

    let reloaded = app.state.composer.get_sale(sale.transaction.id).await.unwrap();
    assert_eq!(reloaded.lines[0].unit_price, dec!(9.50));
    assert_eq!(reloaded.transaction.total_amount, dec!(9.50));
}

#[tokio::test]
async fn voiding_a_sale_returns_quantities_and_is_one_shot() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Casey Till").await;
    let burger = app.seed_menu_item("Burger", dec!(9.50), 5).await;

    let sale = app
        .state
        .composer
        .record_sale(RecordSaleRequest {
            customer_id: None,
            employee_id: employee,
            items: vec![SaleLineInput {
                menu_item_id: burger,
                quantity: 3,
            }],
        })
        .await
        .unwrap();

    let voided = app.state.composer.void_sale(sale.transaction.id).await.unwrap();
    assert_eq!(voided.transaction.status, "voided");

    let burger_after = app.state.catalog.get_menu_item(burger).await.unwrap();
    assert_eq!(burger_after.quantity_available, 5);

    let again = app.state.composer.void_sale(sale.transaction.id).await;
    assert_matches!(again, Err(ServiceError::Conflict(_)));
}

#[tokio::test]
async fn sale_input_validation() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Casey Till").await;
    let burger = app.seed_menu_item("Burger", dec!(9.50), 5).await;

    let empty = app
        .state
        .composer
        .record_sale(RecordSaleRequest {
            customer_id: None,
            employee_id: employee,
            items: vec![],
        })
        .await;
    assert_matches!(empty, Err(ServiceError::ValidationError(_)));

    let zero_quantity = app
        .state
        .composer
        .record_sale(RecordSaleRequest {
            customer_id: None,
            employee_id: employee,
            items: vec![SaleLineInput {
                menu_item_id: burger,
                quantity: 0,
            }],
        })
        .await;
    assert_matches!(zero_quantity, Err(ServiceError::ValidationError(_)));

    let unknown_item = app
        .state
        .composer
        .record_sale(RecordSaleRequest {
            customer_id: None,
            employee_id: employee,
            items: vec![SaleLineInput {
                menu_item_id: Uuid::new_v4(),
                quantity: 1,
            }],
        })
        .await;
    assert_matches!(unknown_item, Err(ServiceError::NotFound(_)));

    let unknown_employee = app
        .state
        .composer
        .record_sale(RecordSaleRequest {
            customer_id: None,
            employee_id: Uuid::new_v4(),
            items: vec![SaleLineInput {
                menu_item_id: burger,
                quantity: 1,
            }],
        })
        .await;
    assert_matches!(unknown_employee, Err(ServiceError::NotFound(_)));
}
