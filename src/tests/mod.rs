mod api_tests;

use crate::core::models::user::UserCreate;
use crate::infrastructure::storage::Database;

pub async fn create_test_db() -> Database {
    Database::in_memory().await.unwrap()
}

pub fn new_user(name: &str, email: &str) -> UserCreate {
    UserCreate {
        name: name.to_string(),
        email: email.to_string(),
        phone_number: None,
        address: None,
    }
}
