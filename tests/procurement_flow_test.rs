mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use uuid::Uuid;

use common::TestApp;
use dinepos_api::{
    errors::ServiceError,
    services::composer::{
        DeliveryLineInput, PurchaseOrderLineInput, RecordDeliveryRequest,
        RecordPurchaseOrderRequest,
    },
};

async fn seed_order(app: &TestApp, supplier: Uuid, ingredient: Uuid) -> Uuid {
    app.state
        .composer
        .record_purchase_order(RecordPurchaseOrderRequest {
            supplier_id: supplier,
            order_date: None,
            expected_delivery: None,
            items: vec![PurchaseOrderLineInput {
                ingredient_id: ingredient,
                quantity_ordered: dec!(10),
                unit_cost: dec!(2.50),
            }],
        })
        .await
        .expect("seed purchase order")
        .order
        .id
}

#[tokio::test]
async fn ordering_does_not_move_stock_until_delivery() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Fresh Farms").await;
    let flour = app.seed_ingredient("Flour", dec!(5.0), dec!(2.0)).await;

    let order_id = seed_order(&app, supplier, flour).await;

    let order = app.state.composer.get_purchase_order(order_id).await.unwrap();
    assert_eq!(order.order.status, "pending");
    assert_eq!(order.lines.len(), 1);
    assert!(order.delivery_receipt.is_none());

    let flour_mid = app.state.catalog.get_ingredient(flour).await.unwrap();
    assert_eq!(flour_mid.current_stock, dec!(5.0));

    let receipt = app
        .state
        .composer
        .record_delivery(
            order_id,
            RecordDeliveryRequest {
                delivery_date: None,
                received_by: None,
                items: vec![DeliveryLineInput {
                    ingredient_id: flour,
                    quantity_received: dec!(8.5),
                    actual_cost: dec!(2.40),
                }],
            },
        )
        .await
        .expect("delivery should succeed");
    assert_eq!(receipt.receipt.status, "received");

    let flour_after = app.state.catalog.get_ingredient(flour).await.unwrap();
    assert_eq!(flour_after.current_stock, dec!(13.5));

    let order = app.state.composer.get_purchase_order(order_id).await.unwrap();
    assert_eq!(order.order.status, "delivered");
    assert!(order.delivery_receipt.is_some());
}

#[tokio::test]
async fn an_order_accepts_at_most_one_delivery() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Fresh Farms").await;
    let flour = app.seed_ingredient("Flour", dec!(0), dec!(2.0)).await;

    let order_id = seed_order(&app, supplier, flour).await;
    let delivery = RecordDeliveryRequest {
        delivery_date: None,
        received_by: None,
        items: vec![DeliveryLineInput {
            ingredient_id: flour,
            quantity_received: dec!(10),
            actual_cost: dec!(2.50),
        }],
    };

    app.state
        .composer
        .record_delivery(order_id, delivery)
        .await
        .unwrap();

    let second = app
        .state
        .composer
        .record_delivery(
            order_id,
            RecordDeliveryRequest {
                delivery_date: None,
                received_by: None,
                items: vec![DeliveryLineInput {
                    ingredient_id: flour,
                    quantity_received: dec!(1),
                    actual_cost: dec!(2.50),
                }],
            },
        )
        .await;
    assert_matches!(second, Err(ServiceError::Conflict(_)));

    // Stock reflects the first delivery only.
    let flour_after = app.state.catalog.get_ingredient(flour).await.unwrap();
    assert_eq!(flour_after.current_stock, dec!(10));
}

#[tokio::test]
async fn status_updates_are_monotonic() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Fresh Farms").await;
    let flour = app.seed_ingredient("Flour", dec!(0), dec!(2.0)).await;
    let order_id = seed_order(&app, supplier, flour).await;

    let ordered = app
        .state
        .composer
        .update_order_status(order_id, "ordered")
        .await
        .unwrap();
    assert_eq!(ordered.status, "ordered");

    // Back to pending is not a legal move.
    let backwards = app
        .state
        .composer
        .update_order_status(order_id, "pending")
        .await;
    assert_matches!(backwards, Err(ServiceError::Conflict(_)));

    // Delivered is reserved for the delivery flow.
    let delivered = app
        .state
        .composer
        .update_order_status(order_id, "delivered")
        .await;
    assert_matches!(delivered, Err(ServiceError::ValidationError(_)));

    let cancelled = app
        .state
        .composer
        .update_order_status(order_id, "cancelled")
        .await
        .unwrap();
    assert_eq!(cancelled.status, "cancelled");

    // Cancelled is terminal; no delivery can be recorded against it.
    let late_delivery = app
        .state
        .composer
        .record_delivery(
            order_id,
            RecordDeliveryRequest {
                delivery_date: None,
                received_by: None,
                items: vec![DeliveryLineInput {
                    ingredient_id: flour,
                    quantity_received: dec!(1),
                    actual_cost: dec!(1),
                }],
            },
        )
        .await;
    assert_matches!(late_delivery, Err(ServiceError::Conflict(_)));
}

#[tokio::test]
async fn purchase_order_input_validation() {
    let app = TestApp::new().await;
    let supplier = app.seed_supplier("Fresh Farms").await;
    let flour = app.seed_ingredient("Flour", dec!(0), dec!(2.0)).await;

    let empty = app
        .state
        .composer
        .record_purchase_order(RecordPurchaseOrderRequest {
            supplier_id: supplier,
            order_date: None,
            expected_delivery: None,
            items: vec![],
        })
        .await;
    assert_matches!(empty, Err(ServiceError::ValidationError(_)));

    let negative_quantity = app
        .state
        .composer
        .record_purchase_order(RecordPurchaseOrderRequest {
            supplier_id: supplier,
            order_date: None,
            expected_delivery: None,
            items: vec![PurchaseOrderLineInput {
                ingredient_id: flour,
                quantity_ordered: dec!(-1),
                unit_cost: dec!(1),
            }],
        })
        .await;
    assert_matches!(negative_quantity, Err(ServiceError::ValidationError(_)));

    let unknown_supplier = app
        .state
        .composer
        .record_purchase_order(RecordPurchaseOrderRequest {
            supplier_id: Uuid::new_v4(),
            order_date: None,
            expected_delivery: None,
            items: vec![PurchaseOrderLineInput {
                ingredient_id: flour,
                quantity_ordered: dec!(1),
                unit_cost: dec!(1),
            }],
        })
        .await;
    assert_matches!(unknown_supplier, Err(ServiceError::NotFound(_)));

    let unknown_ingredient = app
        .state
        .composer
        .record_purchase_order(RecordPurchaseOrderRequest {
            supplier_id: supplier,
            order_date: None,
            expected_delivery: None,
            items: vec![PurchaseOrderLineInput {
                ingredient_id: Uuid::new_v4(),
                quantity_ordered: dec!(1),
                unit_cost: dec!(1),
            }],
        })
        .await;
    assert_matches!(unknown_ingredient, Err(ServiceError::NotFound(_)));
}
