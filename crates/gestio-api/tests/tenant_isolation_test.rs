//! Tenant isolation integration tests.
//!
//! Records belonging to another tenant must be indistinguishable from records
//! that do not exist, on every operation.
//!
//! Run with: `cargo test -p gestio-api --test tenant_isolation_test`

mod helpers;

use helpers::api_path;
use helpers::auth::{tenant_with_id, test_tenant};
use helpers::{setup_seeded_app, setup_test_app};
use serde_json::{json, Value};

use gestio_core::constants::DEMO_TENANT_ID;

#[tokio::test]
async fn test_lists_are_scoped_to_the_token_tenant() {
    let app = setup_test_app().await;
    let client = app.client();
    let first = test_tenant();
    let second = test_tenant();

    let created = client
        .post(&api_path("/employees"))
        .add_header("Authorization", format!("Bearer {}", first.token))
        .json(&json!({
            "firstName": "Luca",
            "lastName": "Bianchi",
            "email": "luca.bianchi@azienda.it",
            "role": "Tecnico",
            "hireDate": "2022-03-15"
        }))
        .await;
    assert_eq!(created.status_code(), 201);

    let mine: Value = client
        .get(&api_path("/employees"))
        .add_header("Authorization", format!("Bearer {}", first.token))
        .await
        .json();
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let theirs: Value = client
        .get(&api_path("/employees"))
        .add_header("Authorization", format!("Bearer {}", second.token))
        .await
        .json();
    assert!(theirs.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cross_tenant_reads_writes_and_deletes_all_miss() {
    let app = setup_test_app().await;
    let client = app.client();
    let owner = test_tenant();
    let intruder = test_tenant();

    let created: Value = client
        .post(&api_path("/clients"))
        .add_header("Authorization", format!("Bearer {}", owner.token))
        .json(&json!({
            "name": "Bar Centrale",
            "email": "barcentrale@gmail.com",
            "phone": "+39 0574 456789",
            "address": "Piazza del Duomo 3",
            "city": "Prato",
            "zipCode": "59100",
            "status": "active"
        }))
        .await
        .json();
    let id = created["id"].as_str().unwrap();

    let read = client
        .get(&api_path(&format!("/clients/{}", id)))
        .add_header("Authorization", format!("Bearer {}", intruder.token))
        .await;
    assert_eq!(read.status_code(), 404);

    let update = client
        .put(&api_path(&format!("/clients/{}", id)))
        .add_header("Authorization", format!("Bearer {}", intruder.token))
        .json(&json!({ "name": "Hijacked" }))
        .await;
    assert_eq!(update.status_code(), 404);

    let delete = client
        .delete(&api_path(&format!("/clients/{}", id)))
        .add_header("Authorization", format!("Bearer {}", intruder.token))
        .await;
    assert_eq!(delete.status_code(), 404);

    // The record is untouched for its owner.
    let still_there: Value = client
        .get(&api_path(&format!("/clients/{}", id)))
        .add_header("Authorization", format!("Bearer {}", owner.token))
        .await
        .json();
    assert_eq!(still_there["name"], "Bar Centrale");
}

#[tokio::test]
async fn test_foreign_and_unknown_ids_are_indistinguishable() {
    let app = setup_test_app().await;
    let client = app.client();
    let owner = test_tenant();
    let intruder = test_tenant();

    let created: Value = client
        .post(&api_path("/employees"))
        .add_header("Authorization", format!("Bearer {}", owner.token))
        .json(&json!({
            "firstName": "Sara",
            "lastName": "Moretti",
            "email": "sara.moretti@azienda.it",
            "role": "Amministrazione",
            "hireDate": "2021-09-01"
        }))
        .await
        .json();
    let foreign_id = created["id"].as_str().unwrap();

    let foreign = client
        .get(&api_path(&format!("/employees/{}", foreign_id)))
        .add_header("Authorization", format!("Bearer {}", intruder.token))
        .await;
    let unknown = client
        .get(&api_path("/employees/00000000-0000-0000-0000-0000000000aa"))
        .add_header("Authorization", format!("Bearer {}", intruder.token))
        .await;

    assert_eq!(
        foreign.status_code(),
        404,
        "Should return 404 (not found) to prevent enumeration, not 403 (forbidden)"
    );
    assert_eq!(unknown.status_code(), 404);
    let foreign_body: Value = foreign.json();
    let unknown_body: Value = unknown.json();
    assert_eq!(
        foreign_body, unknown_body,
        "Foreign and unknown ids must produce identical responses"
    );
}

#[tokio::test]
async fn test_appointments_cannot_reference_another_tenants_records() {
    let app = setup_test_app().await;
    let client = app.client();
    let owner = test_tenant();
    let intruder = test_tenant();

    let employee: Value = client
        .post(&api_path("/employees"))
        .add_header("Authorization", format!("Bearer {}", owner.token))
        .json(&json!({
            "firstName": "Luca",
            "lastName": "Bianchi",
            "email": "luca.bianchi@azienda.it",
            "role": "Tecnico",
            "hireDate": "2022-03-15"
        }))
        .await
        .json();
    let customer: Value = client
        .post(&api_path("/clients"))
        .add_header("Authorization", format!("Bearer {}", owner.token))
        .json(&json!({
            "name": "Rossi Impianti SRL",
            "email": "info@rossimpianti.it",
            "phone": "+39 055 2345678",
            "address": "Via della Scala 12",
            "city": "Firenze",
            "zipCode": "50123",
            "status": "active"
        }))
        .await
        .json();

    // Valid ids, wrong tenant: rejected as unknown references.
    let response = client
        .post(&api_path("/appointments"))
        .add_header("Authorization", format!("Bearer {}", intruder.token))
        .json(&json!({
            "clientId": customer["id"],
            "employeeId": employee["id"],
            "date": "2026-09-15",
            "time": "09:00:00"
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_schedule_views_do_not_leak_between_tenants() {
    let app = setup_seeded_app().await;
    let client = app.client();
    let outsider = test_tenant();
    let insider = tenant_with_id(DEMO_TENANT_ID);

    let insider_view: Value = client
        .get(&api_path("/appointments"))
        .add_header("Authorization", format!("Bearer {}", insider.token))
        .await
        .json();
    assert_eq!(insider_view.as_array().unwrap().len(), 5);

    let outsider_view: Value = client
        .get(&api_path("/appointments"))
        .add_header("Authorization", format!("Bearer {}", outsider.token))
        .await
        .json();
    assert!(outsider_view.as_array().unwrap().is_empty());

    let outsider_upcoming: Value = client
        .get(&api_path("/appointments/upcoming"))
        .add_header("Authorization", format!("Bearer {}", outsider.token))
        .await
        .json();
    assert!(outsider_upcoming.as_array().unwrap().is_empty());
}
