//! End-to-end API tests driving the router directly, no live server needed.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use recipehub_backend::auth::{AccountStore, AuthState, JwtHandler};
use recipehub_backend::recipes::RecipeStore;
use recipehub_backend::routes::build_router;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

fn test_app() -> (Router, NamedTempFile) {
    let temp = NamedTempFile::new().unwrap();
    let db_path = temp.path().to_str().unwrap();

    let account_store = Arc::new(AccountStore::new(db_path).unwrap());
    let recipe_store = Arc::new(RecipeStore::new(db_path).unwrap());
    let jwt_handler = Arc::new(JwtHandler::new("test-secret-key-12345".to_string()));
    let auth_state = AuthState::new(account_store, jwt_handler);

    (build_router(auth_state, recipe_store), temp)
}

async fn send(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, value)
}

async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/users",
        None,
        Some(json!({ "username": username, "password": password, "email": "u@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_login_and_recipe_lifecycle() {
    let (app, _temp) = test_app();

    // Register ana.
    let (status, _) = send(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({ "username": "ana", "password": "secret1", "email": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Duplicate username, different everything else.
    let (status, body) = send(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({ "username": "ana", "password": "other", "email": "b@y.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already exists");

    // Wrong password.
    let (status, _) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "ana", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Unknown user gets the identical response.
    let (status, body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "nobody", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");

    // Correct credentials.
    let (status, body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "ana", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "ana");
    let token = body["token"].as_str().unwrap().to_string();

    // Posting without a token is rejected before anything else runs.
    let soup = json!({ "name": "Soup", "description": "Hot", "ingredients": ["water"] });
    let (status, _) = send(&app, "POST", "/contents", None, Some(soup.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // With the token it succeeds and returns the stored record.
    let (status, body) = send(&app, "POST", "/contents", Some(&token), Some(soup)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Soup");
    let recipe_id = body["id"].as_str().unwrap().to_string();

    // Listed for the owner.
    let (status, body) = send(&app, "GET", "/contents", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], recipe_id.as_str());

    // A different user's fresh token sees a 404, not a 403.
    let bruno_token = register_and_login(&app, "bruno", "secret2").await;
    let (status, _) = send(
        &app,
        "GET",
        &format!("/contents/{recipe_id}"),
        Some(&bruno_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/contents/{recipe_id}"),
        Some(&bruno_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The owner can still fetch it, then delete it.
    let (status, body) = send(
        &app,
        "GET",
        &format!("/contents/{recipe_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Hot");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/contents/{recipe_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Gone for everyone, including the owner.
    let (status, _) = send(
        &app,
        "GET",
        &format!("/contents/{recipe_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/contents", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_validation_errors_name_the_field() {
    let (app, _temp) = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({ "username": "ana", "password": "secret1", "email": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Field 'email' is required");

    // A field that is absent entirely behaves like an empty one.
    let (status, body) = send(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({ "username": "ana", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Field 'email' is required");

    let (status, body) = send(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "ana", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Field 'password' is required");

    let token = register_and_login(&app, "ana", "secret1").await;
    let (status, body) = send(
        &app,
        "POST",
        "/contents",
        Some(&token),
        Some(json!({ "name": "Soup", "description": "Hot", "ingredients": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Field 'ingredients' is required");
}

#[tokio::test]
async fn test_session_check_and_logout() {
    let (app, _temp) = test_app();

    // No token.
    let (status, _) = send(&app, "GET", "/login", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = register_and_login(&app, "ana", "secret1").await;

    let (status, body) = send(&app, "GET", "/login", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logged_in"], true);
    assert_eq!(body["username"], "ana");

    // Logout is client-side only; the endpoint always succeeds and the token
    // keeps working until it expires.
    let (status, _) = send(&app, "DELETE", "/login", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/login", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let (app, _temp) = test_app();

    let token = register_and_login(&app, "ana", "secret1").await;

    // Flip the final character of the signature.
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let (status, _) = send(&app, "GET", "/contents", Some(&tampered), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A token signed with a different secret fails the same way.
    let foreign = JwtHandler::new("another-secret".to_string());
    let account = recipehub_backend::auth::models::Account {
        id: uuid::Uuid::new_v4(),
        username: "ana".to_string(),
        password_hash: String::new(),
        email: "a@x.com".to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };
    let forged = foreign.issue_token(&account).unwrap();
    let (status, _) = send(&app, "GET", "/contents", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_returns_all_items_newest_first() {
    let (app, _temp) = test_app();
    let token = register_and_login(&app, "ana", "secret1").await;

    for name in ["Soup", "Salad", "Cake"] {
        let (status, _) = send(
            &app,
            "POST",
            "/contents",
            Some(&token),
            Some(json!({ "name": name, "description": "d", "ingredients": ["x"] })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/contents", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Cake", "Salad", "Soup"]);
}
