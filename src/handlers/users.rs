use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};

use crate::{
    db::DbConn,
    error::AppError,
    handlers::Pagination,
    models::user::{CreateUser, NewUser, UserResponse},
    service,
};

/// POST /users/
#[tracing::instrument(skip_all)]
pub async fn create_user(
    mut conn: DbConn,
    Json(payload): Json<CreateUser>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let new_user = NewUser::try_from(payload)?;
    let user = service::register_user(&mut conn, new_user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/
#[tracing::instrument(skip(conn))]
pub async fn list_users(
    mut conn: DbConn,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let (skip, limit) = page.checked()?;
    Ok(Json(service::list_users(&mut conn, skip, limit).await?))
}

/// GET /users/:user_id
#[tracing::instrument(skip(conn))]
pub async fn get_user(
    mut conn: DbConn,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(service::get_user(&mut conn, user_id).await?))
}
