use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::handlers::{loans, users};
use crate::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/", get(users::list_users).post(users::create_user))
        .route("/users/:user_id", get(users::get_user))
        .route(
            "/users/:user_id/loans",
            get(loans::list_user_loans).post(loans::create_user_loan),
        )
        .route(
            "/users/:user_id/loans/",
            get(loans::list_user_loans).post(loans::create_user_loan),
        )
        .route("/users/:user_id/loans/:loan_id", get(loans::get_loan_schedule))
        .route(
            "/users/:user_id/loans/:loan_id/:month",
            get(loans::get_loan_month),
        )
        .route(
            "/users/:user_id/loans/:loan_id/share/:other_user_id",
            get(loans::share_loan),
        )
        .route("/loans", get(loans::list_loans))
        .route("/loans/", get(loans::list_loans))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
