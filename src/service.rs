//! Operations the HTTP layer calls. Each takes the request's connection
//! and runs its writes inside a single transaction.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use sqlx::{Connection, SqliteConnection};

use crate::amortization::MonthSummary;
use crate::error::{AppError, LoanError};
use crate::models::loan::{Loan, LoanTerms};
use crate::models::user::{NewUser, Password, User, UserResponse};
use crate::repos::{LoanRepo, UserRepo};
use crate::schedule::Schedule;

fn hash_password(password: &Password) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

async fn require_user(conn: &mut SqliteConnection, user_id: i64) -> Result<User, AppError> {
    UserRepo::get_by_id(conn, user_id)
        .await?
        .ok_or_else(|| LoanError::NotFound("User not found".to_string()).into())
}

pub async fn register_user(
    conn: &mut SqliteConnection,
    new_user: NewUser,
) -> Result<UserResponse, AppError> {
    let mut tx = conn.begin().await?;

    if UserRepo::get_by_email(&mut tx, new_user.email.as_str())
        .await?
        .is_some()
    {
        return Err(LoanError::Validation("Email already registered".to_string()).into());
    }

    let hashed_password = hash_password(&new_user.password)?;
    let user = UserRepo::create(&mut tx, &new_user, &hashed_password).await?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, "Registered user");
    Ok(UserResponse::new(user, Vec::new()))
}

pub async fn get_user(conn: &mut SqliteConnection, user_id: i64) -> Result<UserResponse, AppError> {
    let user = require_user(conn, user_id).await?;
    let loans = LoanRepo::list_for_owner(conn, user.id, 0, -1).await?;
    Ok(UserResponse::new(user, loans))
}

pub async fn list_users(
    conn: &mut SqliteConnection,
    skip: i64,
    limit: i64,
) -> Result<Vec<UserResponse>, AppError> {
    let users = UserRepo::list(conn, skip, limit).await?;
    let mut out = Vec::with_capacity(users.len());
    for user in users {
        let loans = LoanRepo::list_for_owner(conn, user.id, 0, -1).await?;
        out.push(UserResponse::new(user, loans));
    }
    Ok(out)
}

/// Records a loan and caches its schedule alongside it.
pub async fn create_loan(
    conn: &mut SqliteConnection,
    user_id: i64,
    terms: LoanTerms,
) -> Result<Loan, AppError> {
    let mut tx = conn.begin().await?;
    require_user(&mut tx, user_id).await?;

    let schedule = Schedule::build(
        terms.amount(),
        terms.annual_interest_rate(),
        terms.loan_terms_months(),
    )?;
    let loan = LoanRepo::create(&mut tx, user_id, &terms, &schedule.to_json()?).await?;
    tx.commit().await?;

    tracing::info!(loan_id = loan.id, user_id, "Created loan");
    Ok(loan)
}

pub async fn list_loans(
    conn: &mut SqliteConnection,
    skip: i64,
    limit: i64,
) -> Result<Vec<Loan>, AppError> {
    Ok(LoanRepo::list(conn, skip, limit).await?)
}

pub async fn list_user_loans(
    conn: &mut SqliteConnection,
    user_id: i64,
    skip: i64,
    limit: i64,
) -> Result<Vec<Loan>, AppError> {
    require_user(conn, user_id).await?;
    Ok(LoanRepo::list_for_owner(conn, user_id, skip, limit).await?)
}

/// Full schedule of one of the user's loans. A missing or stale cached
/// schedule is rebuilt and written back.
pub async fn loan_schedule(
    conn: &mut SqliteConnection,
    user_id: i64,
    loan_id: i64,
) -> Result<Schedule, AppError> {
    require_user(conn, user_id).await?;

    let loan = LoanRepo::list_for_owner(conn, user_id, 0, -1)
        .await?
        .into_iter()
        .find(|loan| loan.id == loan_id)
        .ok_or_else(|| LoanError::NotFound("Loan not found".to_string()))?;

    if let Some(schedule) = Schedule::from_cache(loan.schedule.as_deref(), loan.loan_terms_months)
    {
        return Ok(schedule);
    }

    tracing::debug!(loan_id, "Rebuilding schedule");
    let schedule = Schedule::build(
        loan.amount,
        loan.annual_interest_rate,
        loan.loan_terms_months,
    )?;
    LoanRepo::set_schedule(conn, loan.id, &schedule.to_json()?).await?;
    Ok(schedule)
}

pub async fn loan_month(
    conn: &mut SqliteConnection,
    user_id: i64,
    loan_id: i64,
    month: i64,
) -> Result<MonthSummary, AppError> {
    let schedule = loan_schedule(conn, user_id, loan_id).await?;
    Ok(*schedule.month(month)?)
}

/// Co-signing a loan with another user is not offered.
pub fn share_loan(user_id: i64, loan_id: i64, other_user_id: i64) -> Result<(), AppError> {
    tracing::debug!(user_id, loan_id, other_user_id, "Loan sharing requested");
    Err(LoanError::NotImplementedFeature("Loan sharing").into())
}
