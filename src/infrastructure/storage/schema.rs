use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::core::models::User;

/// Column list shared by every query that materialises a [`UserRow`].
macro_rules! user_columns {
    () => {
        "id, name, email, created_at, phone_number, address"
    };
}
pub(crate) use user_columns;

/// One row of the `users` table.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            phone_number: row.phone_number,
            address: row.address,
            created_at: row.created_at,
        }
    }
}
