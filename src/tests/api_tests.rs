use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use crate::api::handlers::ROOT_MESSAGE;
use crate::config::Config;
use crate::infrastructure::storage::{Database, users};
use crate::tests::create_test_db;

async fn create_test_app() -> (Router, Database) {
    let db = create_test_db().await;
    let app = crate::api::router(db.clone(), &Config::default());
    (app, db)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_root_returns_message() {
    let (app, _db) = create_test_app().await;
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": ROOT_MESSAGE }));
}

#[tokio::test]
async fn test_create_and_read_user() {
    let (app, _db) = create_test_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/users/",
        Some(json!({ "name": "Ada", "email": "ada@example.com", "phone_number": "555-0101" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(created["id"].as_i64().unwrap() > 0);
    assert!(created["created_at"].is_string());
    assert_eq!(created["name"], "Ada");
    assert_eq!(created["email"], "ada@example.com");
    assert_eq!(created["phone_number"], "555-0101");
    assert_eq!(created["address"], Value::Null);

    let uri = format!("/users/{}", created["id"]);
    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_duplicate_email_returns_400() {
    let (app, db) = create_test_app().await;
    let body = json!({ "name": "Ada", "email": "ada@example.com" });

    let (status, _) = send(&app, "POST", "/users/", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = send(&app, "POST", "/users/", Some(json!({ "name": "Other", "email": "ada@example.com" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, json!({ "detail": "Email already registered" }));

    let mut session = db.session().await.unwrap();
    let all = users::get_users(&mut session, 0, 100).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Ada");
}

#[tokio::test]
async fn test_missing_user_returns_404() {
    let (app, db) = create_test_app().await;
    let not_found = json!({ "detail": "User not found" });

    let (status, body) = send(&app, "GET", "/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found);

    let (status, body) = send(
        &app,
        "PUT",
        "/users/999",
        Some(json!({ "name": "Ghost", "email": "ghost@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found);

    let (status, body) = send(&app, "DELETE", "/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found);

    let mut session = db.session().await.unwrap();
    assert!(users::get_users(&mut session, 0, 100).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_user_replaces_fields() {
    let (app, _db) = create_test_app().await;

    let (_, created) = send(
        &app,
        "POST",
        "/users/",
        Some(json!({ "name": "Grace", "email": "grace@example.com", "address": "Arlington" })),
    )
    .await;
    let uri = format!("/users/{}", created["id"]);

    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "name": "Grace Hopper", "email": "hopper@example.com", "phone_number": "555-0199" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_eq!(updated["name"], "Grace Hopper");
    assert_eq!(updated["email"], "hopper@example.com");
    assert_eq!(updated["phone_number"], "555-0199");
    assert_eq!(updated["address"], Value::Null);

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_delete_user_returns_snapshot() {
    let (app, _db) = create_test_app().await;

    let (_, created) = send(&app, "POST", "/users/", Some(json!({ "name": "Ken", "email": "ken@example.com" }))).await;
    let uri = format!("/users/{}", created["id"]);

    let (status, deleted) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, created);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_users_with_skip_and_limit() {
    let (app, _db) = create_test_app().await;
    for name in ["A", "B", "C", "D", "E"] {
        let email = format!("{}@example.com", name.to_lowercase());
        let (status, _) = send(&app, "POST", "/users/", Some(json!({ "name": name, "email": email }))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let names = |body: &Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|u| u["name"].as_str().unwrap().to_string())
            .collect()
    };

    let (status, body) = send(&app, "GET", "/users/?skip=0&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["A", "B"]);

    let (_, body) = send(&app, "GET", "/users/?skip=2&limit=2", None).await;
    assert_eq!(names(&body), vec!["C", "D"]);

    let (_, body) = send(&app, "GET", "/users/", None).await;
    assert_eq!(names(&body), vec!["A", "B", "C", "D", "E"]);
}

#[tokio::test]
async fn test_invalid_input_returns_422() {
    let (app, db) = create_test_app().await;

    let (status, body) = send(&app, "POST", "/users/", Some(json!({ "name": "Bad", "email": "not-an-email" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().starts_with("email:"));

    let (status, body) = send(&app, "POST", "/users/", Some(json!({ "email": "noname@example.com" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let (status, _) = send(&app, "GET", "/users/?skip=-1", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "GET", "/users/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut session = db.session().await.unwrap();
    assert!(users::get_users(&mut session, 0, 100).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_openapi_document_lists_user_routes() {
    let (app, _db) = create_test_app().await;
    let (status, doc) = send(&app, "GET", "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/users/"].is_object());
    assert!(doc["paths"]["/users/{user_id}"]["put"].is_object());
    assert!(doc["components"]["schemas"]["User"].is_object());
}

#[tokio::test]
async fn test_update_with_invalid_email_returns_422() {
    let (app, _db) = create_test_app().await;

    let (_, created) = send(&app, "POST", "/users/", Some(json!({ "name": "Ada", "email": "ada@example.com" }))).await;
    let uri = format!("/users/{}", created["id"]);

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "name": "Ada L.", "email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().starts_with("email:"));

    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_update_to_taken_email_is_a_server_error() {
    let (app, _db) = create_test_app().await;

    let (_, first) = send(&app, "POST", "/users/", Some(json!({ "name": "A", "email": "a@example.com" }))).await;
    let (_, second) = send(&app, "POST", "/users/", Some(json!({ "name": "B", "email": "b@example.com" }))).await;
    let uri = format!("/users/{}", second["id"]);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "name": "B", "email": first["email"] }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "detail": "Internal server error" }));

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched, second);
}
