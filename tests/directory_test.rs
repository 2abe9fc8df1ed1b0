mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;

use common::TestApp;
use dinepos_api::{
    errors::ServiceError,
    services::composer::{RecordSaleRequest, SaleLineInput},
    services::directory::{CreateEmployeeRequest, UpdateEmployeeRequest},
};

fn employee_request(email: &str) -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        name: "Ash Kitchen".to_string(),
        role: "Cook".to_string(),
        email: email.to_string(),
        password: "peeled-onions-42".to_string(),
    }
}

#[tokio::test]
async fn employee_emails_are_unique() {
    let app = TestApp::new().await;

    let first = app
        .state
        .directory
        .create_employee(employee_request("ash@test.local"))
        .await
        .unwrap();
    assert_eq!(first.role, "Cook");

    let duplicate = app
        .state
        .directory
        .create_employee(employee_request("ash@test.local"))
        .await;
    assert_matches!(duplicate, Err(ServiceError::Conflict(_)));

    // Updating another employee onto a taken address is refused too.
    let other = app
        .state
        .directory
        .create_employee(employee_request("kit@test.local"))
        .await
        .unwrap();
    let stolen = app
        .state
        .directory
        .update_employee(
            other.id,
            UpdateEmployeeRequest {
                name: other.name.clone(),
                role: other.role.clone(),
                email: "ash@test.local".to_string(),
                password: None,
            },
        )
        .await;
    assert_matches!(stolen, Err(ServiceError::Conflict(_)));
}

#[tokio::test]
async fn credentials_verify_and_bad_attempts_are_indistinguishable() {
    let app = TestApp::new().await;
    app.state
        .directory
        .create_employee(employee_request("ash@test.local"))
        .await
        .unwrap();

    let ok = app
        .state
        .directory
        .verify_employee_credential("ash@test.local", "peeled-onions-42")
        .await
        .unwrap();
    assert_eq!(ok.email, "ash@test.local");

    let bad_password = app
        .state
        .directory
        .verify_employee_credential("ash@test.local", "wrong")
        .await;
    let bad_email = app
        .state
        .directory
        .verify_employee_credential("nobody@test.local", "peeled-onions-42")
        .await;

    // Both failure modes look identical to the caller.
    assert_matches!(bad_password, Err(ServiceError::NotFound(ref m)) if m == "Invalid email or credential");
    assert_matches!(bad_email, Err(ServiceError::NotFound(ref m)) if m == "Invalid email or credential");
}

#[tokio::test]
async fn invalid_roles_and_short_credentials_are_rejected() {
    let app = TestApp::new().await;

    let mut bad_role = employee_request("a@test.local");
    bad_role.role = "Janitor".to_string();
    let result = app.state.directory.create_employee(bad_role).await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));

    let mut short = employee_request("b@test.local");
    short.password = "short".to_string();
    let result = app.state.directory.create_employee(short).await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn referenced_parties_cannot_be_deleted() {
    let app = TestApp::new().await;
    let employee = app.seed_employee("Casey Till").await;
    let customer = app.seed_customer("Regular Rae").await;
    let burger = app.seed_menu_item("Burger", dec!(9.50), 10).await;

    app.state
        .composer
        .record_sale(RecordSaleRequest {
            customer_id: Some(customer),
            employee_id: employee,
            items: vec![SaleLineInput {
                menu_item_id: burger,
                quantity: 1,
            }],
        })
        .await
        .unwrap();

    assert_matches!(
        app.state.directory.delete_employee(employee).await,
        Err(ServiceError::Conflict(_))
    );
    assert_matches!(
        app.state.directory.delete_customer(customer).await,
        Err(ServiceError::Conflict(_))
    );

    // An unreferenced customer deletes cleanly.
    let ghost = app.seed_customer("One Timer").await;
    app.state.directory.delete_customer(ghost).await.unwrap();
    assert_matches!(
        app.state.directory.get_customer(ghost).await,
        Err(ServiceError::NotFound(_))
    );
}
