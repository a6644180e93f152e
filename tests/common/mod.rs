//! Shared helpers for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use forum::db::UserRepository;
use forum::web::{create_router, AppState};
use forum::{Database, Role};
use serde_json::{json, Value};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Create a test server over an in-memory database.
pub async fn create_test_server() -> (TestServer, Database) {
    create_test_server_with_ttl(Duration::from_secs(900)).await
}

/// Create a test server whose tokens live for `ttl`.
pub async fn create_test_server_with_ttl(ttl: Duration) -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let app_state = Arc::new(AppState::new(db.clone(), TEST_SECRET, ttl));
    let router = create_router(app_state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");
    (server, db)
}

/// Build a bearer `Authorization` header value.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Register an account and return the response body.
pub async fn register(server: &TestServer, email: &str, password: &str, name: &str) -> Value {
    server
        .post("/api/auth/register")
        .json(&json!({
            "email": email,
            "password": password,
            "confirm_password": password,
            "display_name": name
        }))
        .await
        .json::<Value>()
}

/// Log in and return the access token.
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["data"]["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Register and log in, returning (user id, token).
pub async fn register_and_login(server: &TestServer, email: &str, name: &str) -> (i64, String) {
    let body = register(server, email, "password123", name).await;
    let id = body["data"]["id"].as_i64().unwrap();
    let token = login(server, email, "password123").await;
    (id, token)
}

/// Register an admin and return its token.
pub async fn admin_token(server: &TestServer, db: &Database) -> String {
    let (id, _) = register_and_login(server, "admin@example.com", "Admin").await;
    {
        let mut conn = db.pool().acquire().await.unwrap();
        UserRepository::new(&mut conn)
            .set_role(id, Role::Admin)
            .await
            .unwrap();
    }
    login(server, "admin@example.com", "password123").await
}

/// Create a board as admin and return its ID.
pub async fn create_board(server: &TestServer, admin_token: &str, name: &str) -> i64 {
    let response = server
        .post("/api/boards")
        .add_header(AUTHORIZATION, bearer(admin_token))
        .json(&json!({ "name": name, "description": "test board" }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["data"]["id"].as_i64().unwrap()
}

/// Create a post and return its ID.
pub async fn create_post(server: &TestServer, token: &str, board_id: i64, title: &str) -> i64 {
    let response = server
        .post(&format!("/api/boards/{}/posts", board_id))
        .add_header(AUTHORIZATION, bearer(token))
        .json(&json!({ "title": title, "body": "hello" }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["data"]["id"].as_i64().unwrap()
}
