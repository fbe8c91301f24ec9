use utoipa::OpenApi;

use crate::{
    api::models::{ErrorResponse, RootMessage},
    core::models::user::{User, UserCreate},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::read_root,
        super::handlers::create_user,
        super::handlers::read_users,
        super::handlers::read_user,
        super::handlers::update_user_details,
        super::handlers::delete_user_details
    ),
    components(schemas(UserCreate, User, ErrorResponse, RootMessage)),
    info(
        title = "User Registry API",
        description = "API for creating, reading, updating and deleting users",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
