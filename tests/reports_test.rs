mod common;

use chrono::Utc;
use rust_decimal_macros::dec;

use common::TestApp;
use dinepos_api::services::composer::{RecordSaleRequest, SaleLineInput};

#[tokio::test]
async fn summary_counts_completed_sales_and_excludes_voided() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Casey Till").await;
    let burger = app.seed_menu_item("Burger", dec!(9.50), 50).await;
    let fries = app.seed_menu_item("Fries", dec!(3.25), 50).await;

    let first = app
        .state
        .composer
        .record_sale(RecordSaleRequest {
            customer_id: None,
            employee_id: employee,
            items: vec![SaleLineInput {
                menu_item_id: burger,
                quantity: 2,
            }],
        })
        .await
        .unwrap();

    app.state
        .composer
        .record_sale(RecordSaleRequest {
            customer_id: None,
            employee_id: employee,
            items: vec![SaleLineInput {
                menu_item_id: fries,
                quantity: 4,
            }],
        })
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let summary = app.state.reports.sales_summary(today, today).await.unwrap();
    assert_eq!(summary.transaction_count, 2);
    assert_eq!(summary.total_amount, dec!(32.00));
    assert_eq!(summary.daily.len(), 1);
    assert_eq!(summary.daily[0].date, today);
    assert_eq!(summary.daily[0].transaction_count, 2);

    // Voiding drops the sale from every aggregate.
    app.state.composer.void_sale(first.transaction.id).await.unwrap();

    let summary = app.state.reports.sales_summary(today, today).await.unwrap();
    assert_eq!(summary.transaction_count, 1);
    assert_eq!(summary.total_amount, dec!(13.00));
}

#[tokio::test]
async fn popularity_ranks_by_quantity_sold() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Casey Till").await;
    let burger = app.seed_menu_item("Burger", dec!(9.50), 50).await;
    let fries = app.seed_menu_item("Fries", dec!(3.25), 50).await;
    let soup = app.seed_menu_item("Soup", dec!(4.00), 50).await;

    // Fries sell 6 across two sales, burgers 3, soup 1.
    for (item, quantity) in [(fries, 4), (burger, 3), (soup, 1), (fries, 2)] {
        app.state
            .composer
            .record_sale(RecordSaleRequest {
                customer_id: None,
                employee_id: employee,
                items: vec![SaleLineInput {
                    menu_item_id: item,
                    quantity,
                }],
            })
            .await
            .unwrap();
    }

    let today = Utc::now().date_naive();
    let ranking = app
        .state
        .reports
        .item_popularity(today, today, 10)
        .await
        .unwrap();

    assert_eq!(ranking.len(), 3);
    assert_eq!(ranking[0].menu_item_id, fries);
    assert_eq!(ranking[0].quantity_sold, 6);
    assert_eq!(ranking[0].revenue, dec!(19.50));
    assert_eq!(ranking[0].name, "Fries");
    assert_eq!(ranking[1].menu_item_id, burger);
    assert_eq!(ranking[2].menu_item_id, soup);

    let top_one = app
        .state
        .reports
        .item_popularity(today, today, 1)
        .await
        .unwrap();
    assert_eq!(top_one.len(), 1);
    assert_eq!(top_one[0].menu_item_id, fries);
}

#[tokio::test]
async fn popularity_ties_go_to_the_item_sold_first() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Casey Till").await;
    let soup = app.seed_menu_item("Soup", dec!(4.00), 50).await;
    let salad = app.seed_menu_item("Salad", dec!(6.00), 50).await;

    // Equal quantities in separate sales; the earlier sale wins the tie.
    for item in [salad, soup] {
        app.state
            .composer
            .record_sale(RecordSaleRequest {
                customer_id: None,
                employee_id: employee,
                items: vec![SaleLineInput {
                    menu_item_id: item,
                    quantity: 3,
                }],
            })
            .await
            .unwrap();
    }

    let today = Utc::now().date_naive();
    let ranking = app
        .state
        .reports
        .item_popularity(today, today, 10)
        .await
        .unwrap();

    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0].menu_item_id, salad);
    assert_eq!(ranking[0].quantity_sold, 3);
    assert_eq!(ranking[1].menu_item_id, soup);
    assert_eq!(ranking[1].quantity_sold, 3);
}

#[tokio::test]
async fn reports_ignore_sales_outside_the_range() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Casey Till").await;
    let burger = app.seed_menu_item("Burger", dec!(9.50), 50).await;

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

    // Today's sale falls outside a range that ends yesterday.
    let yesterday = Utc::now().date_naive() - chrono::Duration::days(1);
    let summary = app
        .state
        .reports
        .sales_summary(yesterday, yesterday)
        .await
        .unwrap();
    assert_eq!(summary.transaction_count, 0);
    assert!(summary.daily.is_empty());

    let ranking = app
        .state
        .reports
        .item_popularity(yesterday, yesterday, 10)
        .await
        .unwrap();
    assert!(ranking.is_empty());
}

#[tokio::test]
async fn empty_ranges_produce_empty_reports() {
    let app = TestApp::new().await;

    let today = Utc::now().date_naive();
    let summary = app.state.reports.sales_summary(today, today).await.unwrap();
    assert_eq!(summary.transaction_count, 0);
    assert_eq!(summary.total_amount, dec!(0));
    assert!(summary.daily.is_empty());

    let ranking = app
        .state
        .reports
        .item_popularity(today, today, 10)
        .await
        .unwrap();
    assert!(ranking.is_empty());
}
