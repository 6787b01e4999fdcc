// Helpers shared by handler unit tests: mock-backed app, signed requests
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::Request,
    response::Response,
    Router,
};
use chrono::{Duration, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::auth::{PasetoMaker, TokenMaker};
use crate::config::AppConfig;
use crate::database::models::User;
use crate::database::MockStore;
use crate::routes;
use crate::state::AppState;

pub const TEST_KEY: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz012345";

pub fn test_token_maker() -> PasetoMaker {
    PasetoMaker::new(TEST_KEY).unwrap()
}

pub fn test_state(store: MockStore) -> AppState {
    let mut config = AppConfig::development();
    config.security.password_hash_cost = 4;
    config.server.enable_request_logging = false;

    AppState::new(Arc::new(store), Arc::new(test_token_maker()), config)
}

pub fn test_app(store: MockStore) -> Router {
    routes::app(test_state(store))
}

pub fn sample_user(email: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        first_name: "Test".to_string(),
        email: email.to_string(),
        password: String::new(),
        family_id: None,
    }
}

/// `Authorization` header value for a fresh one-hour token
pub fn bearer(subject: &str) -> String {
    let token = test_token_maker()
        .create_token(subject, Duration::hours(1))
        .unwrap();
    format!("Bearer {}", token)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed_request(method: &str, uri: &str, subject: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", bearer(subject))
        .body(Body::empty())
        .unwrap()
}

pub fn authed_json_request(method: &str, uri: &str, subject: &str, body: Value) -> Request<Body> {
    let mut request = json_request(method, uri, body);
    request
        .headers_mut()
        .insert("authorization", bearer(subject).parse().unwrap());
    request
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
