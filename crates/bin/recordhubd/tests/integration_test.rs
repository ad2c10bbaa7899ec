//! End-to-end smoke tests for the full recordhub stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real
//! repositories, real services, real axum router) and exercises the HTTP
//! layer via `tower::ServiceExt::oneshot` — no TCP port is bound.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use recordhub_adapter_storage_sqlite_sqlx::Config;
use recordhub_domain::schema::{CARS, CollectionSchema, EMPLOYEES};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app(schema: CollectionSchema) -> Router {
    let db = Config::new("sqlite::memory:")
        .build()
        .await
        .expect("in-memory database should initialise");

    recordhubd::app(&db, schema, Duration::from_secs(5))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

fn corolla() -> Value {
    json!({
        "brand": "Toyota",
        "model": "Corolla",
        "year": 2020,
        "price": 18000,
        "mileage": 12000,
        "color": "blue",
        "engine_type": "petrol",
        "transmission_type": "manual"
    })
}

fn civic() -> Value {
    json!({
        "brand": "Honda",
        "model": "Civic",
        "year": 2017,
        "price": 13500,
        "mileage": 61000,
        "color": "grey",
        "engine_type": "petrol",
        "transmission_type": "automatic"
    })
}

fn with_id(mut value: Value, id: i64) -> Value {
    value["_id"] = json!(id);
    value
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let app = app(CARS).await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));
}

// ---------------------------------------------------------------------------
// Cars
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_create_car_with_first_id_on_fresh_counter() {
    let app = app(CARS).await;

    let (status, body) = send(&app, "POST", "/cars", Some(&corolla())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, with_id(corolla(), 1));
}

#[tokio::test]
async fn should_fetch_created_car_by_id() {
    let app = app(CARS).await;
    send(&app, "POST", "/cars", Some(&corolla())).await;
    let (_, created) = send(&app, "POST", "/cars", Some(&civic())).await;
    assert_eq!(created["_id"], json!(2));

    let (status, body) = send(&app, "GET", "/cars/2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn should_reject_incomplete_car_without_spending_an_id() {
    let app = app(CARS).await;
    let mut incomplete = corolla();
    incomplete.as_object_mut().unwrap().remove("color");

    let (status, body) = send(&app, "POST", "/cars", Some(&incomplete)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("color"));

    let (status, body) = send(&app, "POST", "/cars", Some(&corolla())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["_id"], json!(1));
}

#[tokio::test]
async fn should_filter_cars_by_integer_query_value() {
    let app = app(CARS).await;
    send(&app, "POST", "/cars", Some(&corolla())).await;
    send(&app, "POST", "/cars", Some(&civic())).await;

    let (status, body) = send(&app, "GET", "/cars?year=2020", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([with_id(corolla(), 1)]));
}

#[tokio::test]
async fn should_filter_cars_by_text_query_value() {
    let app = app(CARS).await;
    send(&app, "POST", "/cars", Some(&corolla())).await;
    send(&app, "POST", "/cars", Some(&civic())).await;

    let (status, body) = send(&app, "GET", "/cars?engine_type=petrol&brand=Honda", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([with_id(civic(), 2)]));
}

#[tokio::test]
async fn should_use_first_value_of_repeated_query_key() {
    let app = app(CARS).await;
    send(&app, "POST", "/cars", Some(&corolla())).await;
    send(&app, "POST", "/cars", Some(&civic())).await;

    let (status, body) = send(&app, "GET", "/cars?color=blue&color=grey", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([with_id(corolla(), 1)]));
}

#[tokio::test]
async fn should_list_all_cars_without_query() {
    let app = app(CARS).await;
    send(&app, "POST", "/cars", Some(&corolla())).await;
    send(&app, "POST", "/cars", Some(&civic())).await;

    let (status, body) = send(&app, "GET", "/cars", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn should_return_not_found_when_no_car_matches() {
    let app = app(CARS).await;

    let (status, _) = send(&app, "GET", "/cars", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, "POST", "/cars", Some(&corolla())).await;
    let (status, _) = send(&app, "GET", "/cars?year=1999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_update_only_given_car_fields() {
    let app = app(CARS).await;
    send(&app, "POST", "/cars", Some(&corolla())).await;

    let (status, body) = send(&app, "PUT", "/cars/1", Some(&json!({"price": 15000}))).await;

    let mut expected = with_id(corolla(), 1);
    expected["price"] = json!(15000);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);

    let (_, fetched) = send(&app, "GET", "/cars/1", None).await;
    assert_eq!(fetched, expected);
}

#[tokio::test]
async fn should_return_not_found_when_updating_unknown_car() {
    let app = app(CARS).await;
    let (status, _) = send(&app, "PUT", "/cars/9", Some(&json!({"price": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_delete_car_and_return_snapshot() {
    let app = app(CARS).await;
    send(&app, "POST", "/cars", Some(&corolla())).await;
    send(&app, "PUT", "/cars/1", Some(&json!({"mileage": 13000}))).await;

    let (status, body) = send(&app, "DELETE", "/cars/1", None).await;

    let mut expected = with_id(corolla(), 1);
    expected["mileage"] = json!(13000);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);

    let (status, _) = send(&app, "GET", "/cars/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", "/cars/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_never_reuse_deleted_car_id() {
    let app = app(CARS).await;
    send(&app, "POST", "/cars", Some(&corolla())).await;
    send(&app, "DELETE", "/cars/1", None).await;

    let (_, body) = send(&app, "POST", "/cars", Some(&civic())).await;

    assert_eq!(body["_id"], json!(2));
}

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

fn employee() -> Value {
    json!({
        "name": "Grace Hopper",
        "position": "Engineer",
        "salary": 7200,
        "hire_date": "2019-09-01",
        "address": "Harbour Road 5"
    })
}

#[tokio::test]
async fn should_run_full_employee_lifecycle() {
    let app = app(EMPLOYEES).await;

    let (status, created) = send(&app, "POST", "/employees", Some(&employee())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, with_id(employee(), 1));

    let (status, found) = send(&app, "GET", "/employees?salary=7200", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!([created.clone()]));

    let (status, updated) = send(
        &app,
        "PUT",
        "/employees/1",
        Some(&json!({"position": "Rear Admiral"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["position"], json!("Rear Admiral"));
    assert_eq!(updated["salary"], json!(7200));

    let (status, deleted) = send(&app, "DELETE", "/employees/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, updated);
}

#[tokio::test]
async fn should_reject_employee_missing_required_fields() {
    let app = app(EMPLOYEES).await;
    let (status, _) = send(&app, "POST", "/employees", Some(&json!({"name": "Ada"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_not_serve_cars_from_employee_service() {
    let app = app(EMPLOYEES).await;
    let (status, _) = send(&app, "POST", "/cars", Some(&corolla())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
