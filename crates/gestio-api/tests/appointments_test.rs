//! Appointment API integration tests.
//!
//! The list endpoint returns the joined view (client and employee names
//! resolved); the single-record endpoints return plain appointments.
//!
//! Run with: `cargo test -p gestio-api --test appointments_test`

mod helpers;

use chrono::{Days, Utc};
use helpers::api_path;
use helpers::auth::{tenant_with_id, test_tenant};
use helpers::{setup_seeded_app, setup_test_app};
use serde_json::{json, Value};

use gestio_core::constants::DEMO_TENANT_ID;

async fn create_reference_records(
    client: &axum_test::TestServer,
    token: &str,
) -> (String, String) {
    let employee: Value = client
        .post(&api_path("/employees"))
        .add_header("Authorization", format!("Bearer {}", token))
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
        .add_header("Authorization", format!("Bearer {}", token))
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

    (
        customer["id"].as_str().unwrap().to_string(),
        employee["id"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn test_create_appointment_with_known_references() {
    let app = setup_test_app().await;
    let client = app.client();
    let tenant = test_tenant();
    let (client_id, employee_id) = create_reference_records(client, &tenant.token).await;

    let response = client
        .post(&api_path("/appointments"))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .json(&json!({
            "clientId": client_id,
            "employeeId": employee_id,
            "date": "2026-09-15",
            "time": "09:00:00",
            "notes": "Manutenzione caldaia"
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["status"], "scheduled");
    assert_eq!(body["companyId"], tenant.tenant_id.to_string().as_str());
}

#[tokio::test]
async fn test_create_appointment_rejects_unknown_client() {
    let app = setup_test_app().await;
    let client = app.client();
    let tenant = test_tenant();
    let (_, employee_id) = create_reference_records(client, &tenant.token).await;

    let response = client
        .post(&api_path("/appointments"))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .json(&json!({
            "clientId": "00000000-0000-0000-0000-000000000042",
            "employeeId": employee_id,
            "date": "2026-09-15",
            "time": "09:00:00"
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["errors"]["clientId"][0]["code"], "unknown_reference");
}

#[tokio::test]
async fn test_list_appointments_resolves_names_in_list_view_order() {
    let app = setup_seeded_app().await;
    let client = app.client();
    let tenant = tenant_with_id(DEMO_TENANT_ID);

    let response = client
        .get(&api_path("/appointments"))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let views = body.as_array().unwrap();
    assert_eq!(views.len(), 5);

    // Every view resolves both names.
    for view in views {
        assert!(view["clientName"].as_str().unwrap().len() > 1);
        assert!(view["employeeName"].as_str().unwrap().len() > 1);
    }

    // Newest day first; within a day, morning before afternoon.
    let tomorrow = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap();
    assert_eq!(views[0]["date"], tomorrow.to_string().as_str());
    assert_eq!(views[1]["time"], "09:00:00");
    assert_eq!(views[2]["time"], "14:30:00");
    assert_eq!(views[1]["date"], views[2]["date"]);
}

#[tokio::test]
async fn test_list_appointments_filters() {
    let app = setup_seeded_app().await;
    let client = app.client();
    let tenant = tenant_with_id(DEMO_TENANT_ID);
    let today = Utc::now().date_naive();

    let by_date = client
        .get(&api_path(&format!("/appointments?date={}", today)))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .await;
    assert_eq!(by_date.status_code(), 200);
    let body: Value = by_date.json();
    assert_eq!(body.as_array().unwrap().len(), 2);

    let by_status = client
        .get(&api_path("/appointments?status=completed"))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .await;
    let body: Value = by_status.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
    for view in body.as_array().unwrap() {
        assert_eq!(view["status"], "completed");
    }
}

#[tokio::test]
async fn test_upcoming_appointments_are_chronological_and_scheduled() {
    let app = setup_seeded_app().await;
    let client = app.client();
    let tenant = tenant_with_id(DEMO_TENANT_ID);
    let today = Utc::now().date_naive();

    let response = client
        .get(&api_path("/appointments/upcoming"))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let views = body.as_array().unwrap();
    // Two today plus one tomorrow; past and completed work is excluded.
    assert_eq!(views.len(), 3);
    assert_eq!(views[0]["time"], "09:00:00");
    for view in views {
        assert_eq!(view["status"], "scheduled");
        assert!(view["date"].as_str().unwrap() >= today.to_string().as_str());
    }
}

#[tokio::test]
async fn test_upcoming_respects_limit() {
    let app = setup_seeded_app().await;
    let client = app.client();
    let tenant = tenant_with_id(DEMO_TENANT_ID);

    let response = client
        .get(&api_path("/appointments/upcoming?limit=1"))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let views = body.as_array().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["time"], "09:00:00");
}

#[tokio::test]
async fn test_single_appointment_endpoints_return_plain_records() {
    let app = setup_seeded_app().await;
    let client = app.client();
    let tenant = tenant_with_id(DEMO_TENANT_ID);

    let listed: Value = client
        .get(&api_path("/appointments"))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .await
        .json();
    let id = listed[0]["id"].as_str().unwrap();

    let response = client
        .get(&api_path(&format!("/appointments/{}", id)))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["clientId"].is_string());
    // No joined names on the plain record.
    assert!(body.get("clientName").is_none());
    assert!(body.get("employeeName").is_none());
}

#[tokio::test]
async fn test_deleted_client_shows_placeholder_in_view() {
    let app = setup_seeded_app().await;
    let client = app.client();
    let tenant = tenant_with_id(DEMO_TENANT_ID);

    let listed: Value = client
        .get(&api_path("/appointments"))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .await
        .json();
    let target_client_id = listed[1]["clientId"].as_str().unwrap().to_string();

    let deleted = client
        .delete(&api_path(&format!("/clients/{}", target_client_id)))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .await;
    assert_eq!(deleted.status_code(), 204);

    // The appointment survives; its view renders the missing side as "N/A".
    let after: Value = client
        .get(&api_path("/appointments"))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .await
        .json();
    let views = after.as_array().unwrap();
    assert_eq!(views.len(), 5);
    for view in views {
        if view["clientId"] == target_client_id.as_str() {
            assert_eq!(view["clientName"], "N/A");
        } else {
            assert_ne!(view["clientName"], "N/A");
        }
    }
}

#[tokio::test]
async fn test_update_appointment_checks_new_references() {
    let app = setup_seeded_app().await;
    let client = app.client();
    let tenant = tenant_with_id(DEMO_TENANT_ID);

    let listed: Value = client
        .get(&api_path("/appointments"))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .await
        .json();
    let id = listed[0]["id"].as_str().unwrap();

    let rejected = client
        .put(&api_path(&format!("/appointments/{}", id)))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .json(&json!({ "employeeId": "00000000-0000-0000-0000-000000000042" }))
        .await;
    assert_eq!(rejected.status_code(), 400);
    let body: Value = rejected.json();
    assert_eq!(body["errors"]["employeeId"][0]["code"], "unknown_reference");

    // A status-only change does not require re-checking references.
    let completed = client
        .put(&api_path(&format!("/appointments/{}", id)))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .json(&json!({ "status": "completed" }))
        .await;
    assert_eq!(completed.status_code(), 200);
    let body: Value = completed.json();
    assert_eq!(body["status"], "completed");
}

#[tokio::test]
async fn test_delete_appointment() {
    let app = setup_test_app().await;
    let client = app.client();
    let tenant = test_tenant();
    let (client_id, employee_id) = create_reference_records(client, &tenant.token).await;

    let created: Value = client
        .post(&api_path("/appointments"))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .json(&json!({
            "clientId": client_id,
            "employeeId": employee_id,
            "date": "2026-09-15",
            "time": "09:00:00"
        }))
        .await
        .json();
    let id = created["id"].as_str().unwrap();

    let deleted = client
        .delete(&api_path(&format!("/appointments/{}", id)))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .await;
    assert_eq!(deleted.status_code(), 204);

    let gone = client
        .get(&api_path(&format!("/appointments/{}", id)))
        .add_header("Authorization", format!("Bearer {}", tenant.token))
        .await;
    assert_eq!(gone.status_code(), 404);
}
