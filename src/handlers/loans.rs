use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};

use crate::{
    amortization::MonthSummary,
    db::DbConn,
    error::AppError,
    handlers::Pagination,
    models::loan::{CreateLoan, Loan, LoanTerms},
    schedule::Schedule,
    service,
};

/// POST /users/:user_id/loans/
#[tracing::instrument(skip(conn))]
pub async fn create_user_loan(
    mut conn: DbConn,
    Path(user_id): Path<i64>,
    Json(payload): Json<CreateLoan>,
) -> Result<(StatusCode, Json<Loan>), AppError> {
    let terms = LoanTerms::try_from(payload)?;
    let loan = service::create_loan(&mut conn, user_id, terms).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// GET /loans/
#[tracing::instrument(skip(conn))]
pub async fn list_loans(
    mut conn: DbConn,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Loan>>, AppError> {
    let (skip, limit) = page.checked()?;
    Ok(Json(service::list_loans(&mut conn, skip, limit).await?))
}

/// GET /users/:user_id/loans
#[tracing::instrument(skip(conn))]
pub async fn list_user_loans(
    mut conn: DbConn,
    Path(user_id): Path<i64>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Loan>>, AppError> {
    let (skip, limit) = page.checked()?;
    Ok(Json(service::list_user_loans(&mut conn, user_id, skip, limit).await?))
}

/// GET /users/:user_id/loans/:loan_id
#[tracing::instrument(skip(conn))]
pub async fn get_loan_schedule(
    mut conn: DbConn,
    Path((user_id, loan_id)): Path<(i64, i64)>,
) -> Result<Json<Schedule>, AppError> {
    Ok(Json(service::loan_schedule(&mut conn, user_id, loan_id).await?))
}

/// GET /users/:user_id/loans/:loan_id/:month
#[tracing::instrument(skip(conn))]
pub async fn get_loan_month(
    mut conn: DbConn,
    Path((user_id, loan_id, month)): Path<(i64, i64, i64)>,
) -> Result<Json<MonthSummary>, AppError> {
    Ok(Json(service::loan_month(&mut conn, user_id, loan_id, month).await?))
}

/// GET /users/:user_id/loans/:loan_id/share/:other_user_id
#[tracing::instrument]
pub async fn share_loan(
    Path((user_id, loan_id, other_user_id)): Path<(i64, i64, i64)>,
) -> Result<StatusCode, AppError> {
    service::share_loan(user_id, loan_id, other_user_id)?;
    Ok(StatusCode::NO_CONTENT)
}
