//! Integration tests for user endpoints
mod common;

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{create_test_app, create_test_loan, create_test_user, send, user_payload};

#[tokio::test]
async fn test_create_user() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = send(&app, "POST", "/users/", Some(user_payload("ada@example.com"))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["first_name"], "Ada");
    assert_eq!(json["is_active"], true);
    assert_eq!(json["loans"], json!([]));
    assert!(json.get("hashed_password").is_none());
}

#[tokio::test]
async fn test_password_is_stored_hashed() {
    let (app, pool) = create_test_app().await;
    let user_id = create_test_user(&app, "ada@example.com").await;

    let hash: String = sqlx::query_scalar("SELECT hashed_password FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();

    assert!(hash.starts_with("$argon2"));
    assert!(!hash.contains("passwordtest123"));
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let (app, _pool) = create_test_app().await;
    create_test_user(&app, "ada@example.com").await;

    let (status, json) = send(&app, "POST", "/users/", Some(user_payload("ada@example.com"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Email already registered");
}

#[tokio::test]
async fn test_invalid_registration_rejected() {
    let (app, _pool) = create_test_app().await;

    let mut weak = user_payload("ada@example.com");
    weak["password"] = json!("short");
    let (status, json) = send(&app, "POST", "/users/", Some(weak)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Password"));

    let (status, _) = send(&app, "POST", "/users/", Some(user_payload("not-an-email"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bad_name = user_payload("grace@example.com");
    bad_name["first_name"] = json!("G");
    let (status, _) = send(&app, "POST", "/users/", Some(bad_name)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_user_includes_loans() {
    let (app, _pool) = create_test_app().await;
    let user_id = create_test_user(&app, "ada@example.com").await;
    let loan_id = create_test_loan(&app, user_id, 12000.0, 0.06, 12).await;

    let (status, json) = send(&app, "GET", &format!("/users/{}", user_id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], user_id);
    let loans = json["loans"].as_array().unwrap();
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0]["id"], loan_id);
    assert_eq!(loans[0]["owner_id"], user_id);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = send(&app, "GET", "/users/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "User not found");
}

#[tokio::test]
async fn test_list_users_paginates() {
    let (app, _pool) = create_test_app().await;
    create_test_user(&app, "a@example.com").await;
    let second = create_test_user(&app, "b@example.com").await;
    create_test_user(&app, "c@example.com").await;

    let (status, json) = send(&app, "GET", "/users/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);

    let (status, json) = send(&app, "GET", "/users/?skip=1&limit=1", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = json.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], second);

    let (status, _) = send(&app, "GET", "/users/?skip=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let (app, _pool) = create_test_app().await;

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}
