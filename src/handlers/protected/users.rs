// handlers/protected/users.rs - /users/* routes for authenticated callers
use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use super::current_user;
use crate::auth::hash_password;
use crate::database::models::{
    UpdateUserEmailParams, UpdateUserInfoParams, UpdateUserPasswordParams, User, UserResponse,
};
use crate::error::ApiError;
use crate::handlers::{deleted, require_id};
use crate::middleware::{ApiPath, ApiResponse, ApiResult, AuthPayload, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEmailRequest {
    pub id: Uuid,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    pub id: Uuid,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInfoRequest {
    pub id: Uuid,
    #[validate(length(min = 3))]
    pub first_name: String,
}

/// Resolve the caller and require that they are the account being modified
async fn require_self(state: &AppState, auth: &AuthPayload, id: Uuid) -> Result<User, ApiError> {
    let id = require_id(id, "id")?;
    let user = current_user(state, auth).await?;
    if user.id != id {
        return Err(ApiError::forbidden("you can only modify your own account"));
    }
    Ok(user)
}

/// GET /users/me
pub async fn user_me(State(state): State<AppState>, auth: AuthPayload) -> ApiResult<UserResponse> {
    let user = current_user(&state, &auth).await?;
    Ok(ApiResponse::success(user.into()))
}

pub async fn users_list(State(state): State<AppState>) -> ApiResult<Vec<UserResponse>> {
    let users = state.store.get_users().await?;
    Ok(ApiResponse::success(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn user_get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<UserResponse> {
    let user = state.store.get_user_by_id(require_id(id, "id")?).await?;
    Ok(ApiResponse::success(user.into()))
}

pub async fn user_put_email(
    State(state): State<AppState>,
    auth: AuthPayload,
    ValidatedJson(request): ValidatedJson<UpdateEmailRequest>,
) -> ApiResult<UserResponse> {
    require_self(&state, &auth, request.id).await?;

    let user = state
        .store
        .update_user_email(UpdateUserEmailParams {
            id: request.id,
            email: request.email,
        })
        .await?;

    // Existing tokens still name the old email and stop resolving
    tracing::info!("User {} changed email", user.id);
    Ok(ApiResponse::success(user.into()))
}

pub async fn user_put_password(
    State(state): State<AppState>,
    auth: AuthPayload,
    ValidatedJson(request): ValidatedJson<UpdatePasswordRequest>,
) -> ApiResult<UserResponse> {
    require_self(&state, &auth, request.id).await?;

    let password = hash_password(&request.password, state.config.security.password_hash_cost).await?;
    let user = state
        .store
        .update_user_password(UpdateUserPasswordParams {
            id: request.id,
            password,
        })
        .await?;

    Ok(ApiResponse::success(user.into()))
}

pub async fn user_put_info(
    State(state): State<AppState>,
    auth: AuthPayload,
    ValidatedJson(request): ValidatedJson<UpdateInfoRequest>,
) -> ApiResult<UserResponse> {
    require_self(&state, &auth, request.id).await?;

    let user = state
        .store
        .update_user_info(UpdateUserInfoParams {
            id: request.id,
            first_name: request.first_name,
        })
        .await?;

    Ok(ApiResponse::success(user.into()))
}

pub async fn user_delete(
    State(state): State<AppState>,
    auth: AuthPayload,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Value> {
    require_self(&state, &auth, id).await?;

    state.store.delete_user(id).await?;
    tracing::info!("Deleted user {}", id);
    Ok(ApiResponse::success(deleted("user", id)))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use mockall::predicate::eq;
    use serde_json::json;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::database::{MockStore, StoreError};
    use crate::testing::{authed_json_request, authed_request, bearer, body_json, sample_user, test_app};

    const EMAIL: &str = "cook@example.com";

    fn store_with_caller(id: Uuid) -> MockStore {
        let mut store = MockStore::new();
        store.expect_get_user_by_email().returning(move |email| {
            let mut user = sample_user(email);
            user.id = id;
            Ok(user)
        });
        store
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let response = test_app(MockStore::new())
            .oneshot(Request::get("/users/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 401);
        assert_eq!(
            body_json(response).await["error"],
            "authorization header is not provided"
        );
    }

    #[tokio::test]
    async fn me_resolves_token_subject() {
        let id = Uuid::new_v4();
        let response = test_app(store_with_caller(id))
            .oneshot(authed_request("GET", "/users/me", EMAIL))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = body_json(response).await;
        assert_eq!(body["email"], EMAIL);
        assert_eq!(body["id"], id.to_string());
    }

    #[tokio::test]
    async fn me_with_deleted_account_is_unauthorized() {
        let mut store = MockStore::new();
        store
            .expect_get_user_by_email()
            .returning(|_| Err(StoreError::NotFound("user not found".into())));

        let response = test_app(store)
            .oneshot(authed_request("GET", "/users/me", EMAIL))
            .await
            .unwrap();

        assert_eq!(response.status(), 401);
    }

    #[tokio::test]
    async fn get_user_rejects_nil_and_reports_missing() {
        let missing = Uuid::new_v4();
        let mut store = MockStore::new();
        store
            .expect_get_user_by_id()
            .with(eq(missing))
            .returning(|_| Err(StoreError::NotFound("user not found".into())));
        let app = test_app(store);

        let nil = app
            .clone()
            .oneshot(authed_request("GET", &format!("/users/{}", Uuid::nil()), EMAIL))
            .await
            .unwrap();
        let not_found = app
            .oneshot(authed_request("GET", &format!("/users/{}", missing), EMAIL))
            .await
            .unwrap();

        assert_eq!(nil.status(), 400);
        assert_eq!(not_found.status(), 404);
    }

    #[tokio::test]
    async fn update_info_on_own_account() {
        let id = Uuid::new_v4();
        let mut store = store_with_caller(id);
        store
            .expect_update_user_info()
            .withf(move |params| params.id == id && params.first_name == "Andrei")
            .returning(|params| {
                let mut user = sample_user(EMAIL);
                user.id = params.id;
                user.first_name = params.first_name;
                Ok(user)
            });

        let response = test_app(store)
            .oneshot(authed_json_request(
                "PUT",
                "/users/info",
                EMAIL,
                json!({ "id": id, "first_name": "Andrei" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(body_json(response).await["first_name"], "Andrei");
    }

    #[tokio::test]
    async fn cannot_modify_another_account() {
        let app = test_app(store_with_caller(Uuid::new_v4()));
        let other = Uuid::new_v4();

        let email = app
            .clone()
            .oneshot(authed_json_request(
                "PUT",
                "/users/email",
                EMAIL,
                json!({ "id": other, "email": "new@example.com" }),
            ))
            .await
            .unwrap();
        let delete = app
            .oneshot(authed_request("DELETE", &format!("/users/{}", other), EMAIL))
            .await
            .unwrap();

        assert_eq!(email.status(), 403);
        assert_eq!(delete.status(), 403);
    }

    #[tokio::test]
    async fn password_update_is_hashed() {
        let id = Uuid::new_v4();
        let mut store = store_with_caller(id);
        store
            .expect_update_user_password()
            .withf(|params| params.password.starts_with("$2"))
            .returning(|params| {
                let mut user = sample_user(EMAIL);
                user.id = params.id;
                user.password = params.password;
                Ok(user)
            });

        let response = test_app(store)
            .oneshot(authed_json_request(
                "PUT",
                "/users/password",
                EMAIL,
                json!({ "id": id, "password": "new-secret" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert!(body_json(response).await.get("password").is_none());
    }

    #[tokio::test]
    async fn delete_own_account() {
        let id = Uuid::new_v4();
        let mut store = store_with_caller(id);
        store.expect_delete_user().with(eq(id)).returning(|_| Ok(()));

        let request = Request::delete(format!("/users/{}", id))
            .header("authorization", bearer(EMAIL))
            .body(Body::empty())
            .unwrap();
        let response = test_app(store).oneshot(request).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(
            body_json(response).await["message"],
            format!("deleted user with id {}", id)
        );
    }
}
