mod common;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

use common::TestApp;
use dinepos_api::{
    errors::ServiceError,
    services::composer::{RecordReleaseRequest, ReleaseLineInput},
};

#[tokio::test]
async fn releasing_stock_decrements_every_line() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Kit Stores").await;
    let flour = app.seed_ingredient("Flour", dec!(10.0), dec!(2.0)).await;
    let sugar = app.seed_ingredient("Sugar", dec!(4.0), dec!(1.0)).await;

    let record = app
        .state
        .composer
        .record_release(RecordReleaseRequest {
            employee_id: employee,
            release_date: None,
            purpose: Some("dinner service".to_string()),
            items: vec![
                ReleaseLineInput {
                    ingredient_id: flour,
                    quantity_released: dec!(3.5),
                },
                ReleaseLineInput {
                    ingredient_id: sugar,
                    quantity_released: dec!(1.0),
                },
            ],
        })
        .await
        .expect("release should succeed");

    assert_eq!(record.lines.len(), 2);
    assert_eq!(record.record.purpose.as_deref(), Some("dinner service"));

    let flour_after = app.state.catalog.get_ingredient(flour).await.unwrap();
    let sugar_after = app.state.catalog.get_ingredient(sugar).await.unwrap();
    assert_eq!(flour_after.current_stock, dec!(6.5));
    assert_eq!(sugar_after.current_stock, dec!(3.0));

    let reloaded = app.state.composer.get_release(record.record.id).await.unwrap();
    assert_eq!(reloaded.lines.len(), 2);
}

#[tokio::test]
async fn one_short_line_rolls_back_the_whole_release() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Kit Stores").await;
    let flour = app.seed_ingredient("Flour", dec!(10.0), dec!(2.0)).await;
    let saffron = app.seed_ingredient("Saffron", dec!(0.2), dec!(0.1)).await;

    let result = app
        .state
        .composer
        .record_release(RecordReleaseRequest {
            employee_id: employee,
            release_date: None,
            purpose: None,
            items: vec![
                ReleaseLineInput {
                    ingredient_id: flour,
                    quantity_released: dec!(2.0),
                },
                ReleaseLineInput {
                    ingredient_id: saffron,
                    quantity_released: dec!(0.5),
                },
            ],
        })
        .await;

    assert_matches!(result, Err(ServiceError::InsufficientStock(_)));

    let flour_after = app.state.catalog.get_ingredient(flour).await.unwrap();
    let saffron_after = app.state.catalog.get_ingredient(saffron).await.unwrap();
    assert_eq!(flour_after.current_stock, dec!(10.0));
    assert_eq!(saffron_after.current_stock, dec!(0.2));
}

#[tokio::test]
async fn release_input_validation() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Kit Stores").await;
    let flour = app.seed_ingredient("Flour", dec!(10.0), dec!(2.0)).await;

    let empty = app
        .state
        .composer
        .record_release(RecordReleaseRequest {
            employee_id: employee,
            release_date: None,
            purpose: None,
            items: vec![],
        })
        .await;
    assert_matches!(empty, Err(ServiceError::ValidationError(_)));

    let zero = app
        .state
        .composer
        .record_release(RecordReleaseRequest {
            employee_id: employee,
            release_date: None,
            purpose: None,
            items: vec![ReleaseLineInput {
                ingredient_id: flour,
                quantity_released: dec!(0),
            }],
        })
        .await;
    assert_matches!(zero, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn listing_releases_pages_newest_first() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Kit Stores").await;
    let flour = app.seed_ingredient("Flour", dec!(30.0), dec!(2.0)).await;

    let mut recorded = Vec::new();
    for day in [5, 12, 9] {
        let record = app
            .state
            .composer
            .record_release(RecordReleaseRequest {
                employee_id: employee,
                release_date: NaiveDate::from_ymd_opt(2024, 6, day),
                purpose: None,
                items: vec![ReleaseLineInput {
                    ingredient_id: flour,
                    quantity_released: dec!(1.0),
                }],
            })
            .await
            .unwrap();
        recorded.push(record.record.id);
    }

    let (page_one, total) = app.state.composer.list_releases(1, 2).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(page_one.len(), 2);
    assert_eq!(page_one[0].id, recorded[1]);
    assert_eq!(page_one[0].release_date, NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
    assert_eq!(page_one[1].id, recorded[2]);

    let (page_two, total) = app.state.composer.list_releases(2, 2).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(page_two.len(), 1);
    assert_eq!(page_two[0].id, recorded[0]);
}
