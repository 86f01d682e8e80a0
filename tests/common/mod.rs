#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tower::ServiceExt;

use loan_tracker::{db, rest, AppState};

/// In-memory SQLite pool with migrations applied.
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    // In-memory needs a single connection that never gets recycled
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn create_test_app() -> (Router, SqlitePool) {
    let pool = create_test_pool().await;
    let app = rest::router(AppState { db: pool.clone() });
    (app, pool)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub fn user_payload(email: &str) -> Value {
    json!({
        "email": email,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "creation_date": "2024-01-01",
        "birth_date": "1990-12-10",
        "password": "passwordtest123-_",
    })
}

/// Registers a user and returns its id.
pub async fn create_test_user(app: &Router, email: &str) -> i64 {
    let (status, json) = send(app, "POST", "/users/", Some(user_payload(email))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);
    json["id"].as_i64().unwrap()
}

/// Creates a loan for `user_id` and returns its id.
pub async fn create_test_loan(
    app: &Router,
    user_id: i64,
    amount: f64,
    rate: f64,
    term: i64,
) -> i64 {
    let (status, json) = send(
        app,
        "POST",
        &format!("/users/{}/loans/", user_id),
        Some(json!({
            "amount": amount,
            "annual_interest_rate": rate,
            "loan_terms_months": term,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);
    json["id"].as_i64().unwrap()
}
