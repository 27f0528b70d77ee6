//! Handler tests for Users domain
//!
//! These drive the registered routes against a real MongoDB container:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes across a full resource lifecycle
//!
//! Require Docker: `cargo test -p domain_users -- --ignored`

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::ResourceHandler;
use domain_users::{CreatedResponse, MongoUserStorage, UserHandler, UserResponse};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::{TestDataBuilder, TestMongo, assertions::assert_object_id};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(mongo: &TestMongo, builder: &TestDataBuilder) -> Router {
    let storage = MongoUserStorage::new(&mongo.database(&builder.database()), "users");
    UserHandler::new(storage).register(Router::new())
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_user_lifecycle() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("handler_lifecycle");
    let app = app(&mongo, &builder);

    let username = builder.username("alice");
    let email = builder.email("alice");

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/users",
            Some(json!({"username": username, "email": email, "passwordHash": "hash"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: CreatedResponse = json_body(response.into_body()).await;
    assert_object_id(&created.id, "POST /users");
    let uri = format!("/users/{}", created.id);

    let response = app.clone().oneshot(request("GET", &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let user: UserResponse = json_body(response.into_body()).await;
    assert_eq!(user.id, created.id);
    assert_eq!(user.username, username);
    assert_eq!(user.email, email);

    let response = app.clone().oneshot(request("DELETE", &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(request("GET", &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_put_and_patch_return_204_and_persist() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("handler_updates");
    let app = app(&mongo, &builder);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/users",
            Some(json!({"username": "alice", "email": "alice@example.com", "passwordHash": "h"})),
        ))
        .await
        .unwrap();
    let created: CreatedResponse = json_body(response.into_body()).await;
    let uri = format!("/users/{}", created.id);

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &uri,
            Some(json!({"username": "alice2", "email": "alice2@example.com", "passwordHash": "h2"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(request("PATCH", &uri, Some(json!({"username": "alice3"}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(request("GET", &uri, None)).await.unwrap();
    let user: UserResponse = json_body(response.into_body()).await;
    assert_eq!(user.username, "alice3");
    assert_eq!(user.email, "alice2@example.com");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_error_statuses() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("handler_errors");
    let app = app(&mongo, &builder);

    let response = app
        .clone()
        .oneshot(request("GET", "/users/not-a-valid-id", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(request("DELETE", "/users/65f1c0ffee0000000000abcd", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            "/users/65f1c0ffee0000000000abcd",
            Some(json!({"username": "ghost", "email": "ghost@example.com", "passwordHash": "h"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(request("GET", "/users", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<UserResponse> = json_body(response.into_body()).await;
    assert!(users.is_empty());
}
