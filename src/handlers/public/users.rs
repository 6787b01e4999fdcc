// handlers/public/users.rs - POST /users, POST /users/login
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::{hash_password, verify_password};
use crate::database::models::{CreateUserParams, UserResponse};
use crate::database::StoreError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "invalid email or password";

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3))]
    pub first_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
    pub user: UserResponse,
}

/// POST /users - create an account; the password is stored as a bcrypt hash
pub async fn register_post(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<UserResponse> {
    let password = hash_password(&request.password, state.config.security.password_hash_cost).await?;

    let user = state
        .store
        .create_user(CreateUserParams {
            first_name: request.first_name,
            email: request.email,
            password,
        })
        .await?;

    tracing::info!("Registered user {}", user.id);
    Ok(ApiResponse::created(user.into()))
}

/// POST /users/login - exchange credentials for a bearer token.
///
/// Unknown email and wrong password produce the same 401.
pub async fn login_post(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user = match state.store.get_user_by_email(&request.email).await {
        Ok(user) => user,
        Err(StoreError::NotFound(_)) => return Err(ApiError::unauthorized(INVALID_CREDENTIALS)),
        Err(e) => return Err(e.into()),
    };

    if !verify_password(&request.password, &user.password).await? {
        tracing::debug!("Failed login for user {}", user.id);
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let duration = state.config.security.token_duration()?;
    let access_token = state.token_maker.create_token(&user.email, duration)?;

    Ok(ApiResponse::success(LoginResponse {
        access_token,
        expires_in: duration.num_seconds(),
        user: user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::auth::TokenMaker;
    use crate::database::MockStore;
    use crate::testing::{
        body_json, json_request, sample_user, test_app, test_state, test_token_maker,
    };

    #[tokio::test]
    async fn register_hashes_password_and_returns_created() {
        let mut store = MockStore::new();
        store
            .expect_create_user()
            .withf(|params| params.email == "cook@example.com" && params.password != "secret-pw")
            .returning(|params| {
                let mut user = sample_user(&params.email);
                user.first_name = params.first_name;
                user.password = params.password;
                Ok(user)
            });

        let response = test_app(store)
            .oneshot(json_request(
                "POST",
                "/users",
                json!({ "first_name": "Andrei", "email": "cook@example.com", "password": "secret-pw" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), 201);
        let body = body_json(response).await;
        assert_eq!(body["email"], "cook@example.com");
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn register_rejects_invalid_fields() {
        let response = test_app(MockStore::new())
            .oneshot(json_request(
                "POST",
                "/users",
                json!({ "first_name": "Al", "email": "not-an-email", "password": "123" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        let body = body_json(response).await;
        assert!(body["field_errors"].get("email").is_some());
        assert!(body["field_errors"].get("first_name").is_some());
    }

    #[tokio::test]
    async fn register_duplicate_email_conflicts() {
        let mut store = MockStore::new();
        store
            .expect_create_user()
            .returning(|_| Err(StoreError::DuplicateKey("user already exists".into())));

        let response = test_app(store)
            .oneshot(json_request(
                "POST",
                "/users",
                json!({ "first_name": "Andrei", "email": "cook@example.com", "password": "secret-pw" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), 409);
    }

    #[tokio::test]
    async fn register_rejects_malformed_json() {
        let request = Request::post("/users")
            .header("content-type", "application/json")
            .body(Body::from("{\"first_name\": "))
            .unwrap();

        let response = test_app(MockStore::new()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), 400);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn login_returns_token_for_subject() {
        let hashed = hash_password("secret-pw", 4).await.unwrap();
        let mut store = MockStore::new();
        store.expect_get_user_by_email().returning(move |email| {
            let mut user = sample_user(email);
            user.password = hashed.clone();
            Ok(user)
        });

        let response = test_app(store)
            .oneshot(json_request(
                "POST",
                "/users/login",
                json!({ "email": "cook@example.com", "password": "secret-pw" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: LoginResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(body.user.email, "cook@example.com");
        assert_eq!(body.expires_in, 24 * 60 * 60);

        let payload = test_token_maker().verify_token(&body.access_token).unwrap();
        assert_eq!(payload.subject, "cook@example.com");
    }

    #[tokio::test]
    async fn login_refuses_to_issue_token_with_invalid_duration() {
        let hashed = hash_password("secret-pw", 4).await.unwrap();
        let mut store = MockStore::new();
        store.expect_get_user_by_email().returning(move |email| {
            let mut user = sample_user(email);
            user.password = hashed.clone();
            Ok(user)
        });

        let mut state = test_state(store);
        let mut config = (*state.config).clone();
        config.security.token_duration_minutes = 0;
        state.config = Arc::new(config);

        let response = crate::routes::app(state)
            .oneshot(json_request(
                "POST",
                "/users/login",
                json!({ "email": "cook@example.com", "password": "secret-pw" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), 500);
        assert!(body_json(response).await.get("access_token").is_none());
    }

    #[tokio::test]
    async fn login_failures_share_one_message() {
        let hashed = hash_password("secret-pw", 4).await.unwrap();
        let mut store = MockStore::new();
        store.expect_get_user_by_email().returning(move |email| {
            if email == "cook@example.com" {
                let mut user = sample_user(email);
                user.password = hashed.clone();
                Ok(user)
            } else {
                Err(StoreError::NotFound("user not found".into()))
            }
        });
        let app = test_app(store);

        let wrong_password = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/users/login",
                json!({ "email": "cook@example.com", "password": "wrong-pw" }),
            ))
            .await
            .unwrap();
        let unknown_email = app
            .oneshot(json_request(
                "POST",
                "/users/login",
                json!({ "email": "nobody@example.com", "password": "secret-pw" }),
            ))
            .await
            .unwrap();

        assert_eq!(wrong_password.status(), 401);
        assert_eq!(unknown_email.status(), 401);
        assert_eq!(body_json(wrong_password).await, body_json(unknown_email).await);
    }
}
