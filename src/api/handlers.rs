use crate::{
    api::{
        extract::{AppJson, AppPath, AppQuery},
        models::*,
    },
    core::{
        errors::AppError,
        models::user::{User, UserCreate},
    },
    infrastructure::storage::{Database, Session, users},
};
use axum::{
    Json, Router,
    routing::{get, post},
};
use tracing::info;

pub const ROOT_MESSAGE: &str = "User management API: create, read, update and delete users at /users/.";

// Define API routes
pub fn api_routes() -> Router<Database> {
    Router::new()
        .route("/", get(read_root))
        .route("/users/", post(create_user).get(read_users))
        .route(
            "/users/{user_id}",
            get(read_user).put(update_user_details).delete(delete_user_details),
        )
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = RootMessage)
    )
)]
pub(crate) async fn read_root() -> Json<RootMessage> {
    Json(RootMessage {
        message: ROOT_MESSAGE.to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/users/",
    request_body = UserCreate,
    responses(
        (status = 200, description = "User created", body = User),
        (status = 400, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn create_user(
    mut session: Session,
    AppJson(req): AppJson<UserCreate>,
) -> Result<Json<User>, ApiError> {
    req.validate()?;
    if users::get_user_by_email(&mut session, &req.email).await?.is_some() {
        return Err(AppError::EmailAlreadyRegistered.into());
    }
    let user = users::create_user(&mut session, &req).await?;
    info!(user_id = user.id, "user created");
    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/users/",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users in insertion order", body = [User]),
        (status = 422, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn read_users(
    mut session: Session,
    AppQuery(query): AppQuery<ListUsersQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let page = users::get_users(&mut session, query.skip, query.limit).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(
        ("user_id" = i64, Path, description = "ID of the user to retrieve")
    ),
    responses(
        (status = 200, description = "User retrieved", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn read_user(
    mut session: Session,
    AppPath(user_id): AppPath<i64>,
) -> Result<Json<User>, ApiError> {
    let user = users::get_user(&mut session, user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}",
    params(
        ("user_id" = i64, Path, description = "ID of the user to update")
    ),
    request_body = UserCreate,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn update_user_details(
    mut session: Session,
    AppPath(user_id): AppPath<i64>,
    AppJson(req): AppJson<UserCreate>,
) -> Result<Json<User>, ApiError> {
    req.validate()?;
    let user = users::update_user(&mut session, user_id, &req)
        .await?
        .ok_or(AppError::UserNotFound)?;
    info!(user_id, "user updated");
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    params(
        ("user_id" = i64, Path, description = "ID of the user to delete")
    ),
    responses(
        (status = 200, description = "User deleted; body is the removed record", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn delete_user_details(
    mut session: Session,
    AppPath(user_id): AppPath<i64>,
) -> Result<Json<User>, ApiError> {
    let user = users::delete_user(&mut session, user_id)
        .await?
        .ok_or(AppError::UserNotFound)?;
    info!(user_id, "user deleted");
    Ok(Json(user))
}
