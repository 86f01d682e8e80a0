use sqlx::SqliteConnection;

use crate::models::loan::{Loan, LoanTerms};

const LOAN_COLUMNS: &str =
    "id, amount, annual_interest_rate, loan_terms_months, owner_id, schedule";

pub struct LoanRepo;

impl LoanRepo {
    pub async fn create(
        conn: &mut SqliteConnection,
        owner_id: i64,
        terms: &LoanTerms,
        schedule: &str,
    ) -> sqlx::Result<Loan> {
        sqlx::query_as::<_, Loan>(&format!(
            "INSERT INTO loans \
             (amount, annual_interest_rate, loan_terms_months, owner_id, schedule) \
             VALUES (?, ?, ?, ?, ?) RETURNING {}",
            LOAN_COLUMNS
        ))
        .bind(terms.amount())
        .bind(terms.annual_interest_rate())
        .bind(terms.loan_terms_months())
        .bind(owner_id)
        .bind(schedule)
        .fetch_one(conn)
        .await
    }

    pub async fn list(
        conn: &mut SqliteConnection,
        skip: i64,
        limit: i64,
    ) -> sqlx::Result<Vec<Loan>> {
        sqlx::query_as::<_, Loan>(&format!(
            "SELECT {} FROM loans ORDER BY id LIMIT ? OFFSET ?",
            LOAN_COLUMNS
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(conn)
        .await
    }

    /// Loans owned by `owner_id`. A negative `limit` means no limit.
    pub async fn list_for_owner(
        conn: &mut SqliteConnection,
        owner_id: i64,
        skip: i64,
        limit: i64,
    ) -> sqlx::Result<Vec<Loan>> {
        sqlx::query_as::<_, Loan>(&format!(
            "SELECT {} FROM loans WHERE owner_id = ? ORDER BY id LIMIT ? OFFSET ?",
            LOAN_COLUMNS
        ))
        .bind(owner_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(conn)
        .await
    }

    pub async fn set_schedule(
        conn: &mut SqliteConnection,
        loan_id: i64,
        schedule: &str,
    ) -> sqlx::Result<()> {
        sqlx::query("UPDATE loans SET schedule = ? WHERE id = ?")
            .bind(schedule)
            .bind(loan_id)
            .execute(conn)
            .await?;
        Ok(())
    }
}
