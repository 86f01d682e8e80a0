use sqlx::SqliteConnection;

use crate::models::user::{NewUser, User};

const USER_COLUMNS: &str =
    "id, email, first_name, last_name, creation_date, birth_date, hashed_password, is_active";

pub struct UserRepo;

impl UserRepo {
    pub async fn create(
        conn: &mut SqliteConnection,
        user: &NewUser,
        hashed_password: &str,
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users \
             (email, first_name, last_name, creation_date, birth_date, hashed_password) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(user.email.as_str())
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.creation_date)
        .bind(user.birth_date)
        .bind(hashed_password)
        .fetch_one(conn)
        .await
    }

    pub async fn get_by_id(
        conn: &mut SqliteConnection,
        user_id: i64,
    ) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(user_id)
            .fetch_optional(conn)
            .await
    }

    pub async fn get_by_email(
        conn: &mut SqliteConnection,
        email: &str,
    ) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS))
            .bind(email)
            .fetch_optional(conn)
            .await
    }

    pub async fn list(
        conn: &mut SqliteConnection,
        skip: i64,
        limit: i64,
    ) -> sqlx::Result<Vec<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY id LIMIT ? OFFSET ?",
            USER_COLUMNS
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(conn)
        .await
    }
}
