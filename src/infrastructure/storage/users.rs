//! Data access for the `users` table. Lookups return `Ok(None)` when no row
//! matches; errors are reserved for the database itself. Every write is a
//! single autocommitted statement, so it is durable once the call returns.

use super::Session;
use super::schema::{UserRow, user_columns};
use crate::core::errors::AppError;
use crate::core::models::{User, UserCreate};

pub async fn get_user(session: &mut Session, user_id: i64) -> Result<Option<User>, AppError> {
    let row = sqlx::query_as::<_, UserRow>(concat!("SELECT ", user_columns!(), " FROM users WHERE id = ?"))
        .bind(user_id)
        .fetch_optional(session.conn())
        .await?;
    Ok(row.map(User::from))
}

pub async fn get_user_by_email(session: &mut Session, email: &str) -> Result<Option<User>, AppError> {
    let row = sqlx::query_as::<_, UserRow>(concat!("SELECT ", user_columns!(), " FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(session.conn())
        .await?;
    Ok(row.map(User::from))
}

/// Users in insertion order, skipping the first `skip` and returning at most `limit`.
pub async fn get_users(session: &mut Session, skip: u32, limit: u32) -> Result<Vec<User>, AppError> {
    let rows = sqlx::query_as::<_, UserRow>(concat!(
        "SELECT ",
        user_columns!(),
        " FROM users ORDER BY id LIMIT ? OFFSET ?"
    ))
    .bind(i64::from(limit))
    .bind(i64::from(skip))
    .fetch_all(session.conn())
    .await?;
    Ok(rows.into_iter().map(User::from).collect())
}

pub async fn create_user(session: &mut Session, user: &UserCreate) -> Result<User, AppError> {
    let row = sqlx::query_as::<_, UserRow>(concat!(
        "INSERT INTO users (name, email, phone_number, address) VALUES (?, ?, ?, ?) RETURNING ",
        user_columns!()
    ))
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.phone_number)
    .bind(&user.address)
    .fetch_one(session.conn())
    .await
    .map_err(email_conflict)?;
    Ok(row.into())
}

// A concurrent create can slip past the route's email pre-check; the unique
// index on users.email then rejects the insert.
fn email_conflict(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::EmailAlreadyRegistered;
        }
    }
    AppError::Database(err)
}

/// Replaces every mutable field. `id` and `created_at` are left untouched.
pub async fn update_user(session: &mut Session, user_id: i64, update: &UserCreate) -> Result<Option<User>, AppError> {
    let row = sqlx::query_as::<_, UserRow>(concat!(
        "UPDATE users SET name = ?, email = ?, phone_number = ?, address = ? WHERE id = ? RETURNING ",
        user_columns!()
    ))
    .bind(&update.name)
    .bind(&update.email)
    .bind(&update.phone_number)
    .bind(&update.address)
    .bind(user_id)
    .fetch_optional(session.conn())
    .await?;
    Ok(row.map(User::from))
}

/// Hard delete. Returns the row as it was just before removal.
pub async fn delete_user(session: &mut Session, user_id: i64) -> Result<Option<User>, AppError> {
    let row = sqlx::query_as::<_, UserRow>(concat!("DELETE FROM users WHERE id = ? RETURNING ", user_columns!()))
        .bind(user_id)
        .fetch_optional(session.conn())
        .await?;
    Ok(row.map(User::from))
}
