use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Another user already owns this email
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    /// No user row has the requested id
    #[error("User not found")]
    UserNotFound,

    /// Request body, path or query failed validation
    #[error("Invalid input for field `{}`: {}", .0.field, .0.description)]
    InvalidInput(FieldError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
