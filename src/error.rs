use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures the loan domain reports to its callers.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LoanError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Month {month} is out of range for a {term} month loan")]
    OutOfRange { month: i64, term: i64 },
    #[error("{0}")]
    Computation(String),
    #[error("{0} functionality unavailable")]
    NotImplementedFeature(&'static str),
}

#[derive(Debug)]
pub enum AppError {
    Domain(LoanError),
    Sqlx(sqlx::Error),
    PasswordHash(argon2::password_hash::Error),
    Serialization(serde_json::Error),
}

impl From<LoanError> for AppError {
    fn from(inner: LoanError) -> Self {
        AppError::Domain(inner)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(inner: sqlx::Error) -> Self {
        AppError::Sqlx(inner)
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(inner: argon2::password_hash::Error) -> Self {
        AppError::PasswordHash(inner)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(inner: serde_json::Error) -> Self {
        AppError::Serialization(inner)
    }
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::Domain(e) => {
                let status = match e {
                    LoanError::NotFound(_) | LoanError::NotImplementedFeature(_) => {
                        StatusCode::NOT_FOUND
                    }
                    LoanError::Validation(_)
                    | LoanError::OutOfRange { .. }
                    | LoanError::Computation(_) => StatusCode::BAD_REQUEST,
                };
                (status, e.to_string())
            }
            AppError::Sqlx(e) => {
                // Lost race between the email check and the insert
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return (
                            StatusCode::BAD_REQUEST,
                            "Email already registered".to_string(),
                        );
                    }
                }
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::PasswordHash(e) => {
                tracing::error!("Password hashing error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password hashing error".to_string(),
                )
            }
            AppError::Serialization(e) => {
                tracing::error!("Schedule serialization error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
