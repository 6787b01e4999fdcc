// handlers/protected/families.rs - /families routes
use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use super::current_user;
use crate::database::models::{CreateFamilyParams, Family, UpdateFamilyParams};
use crate::error::ApiError;
use crate::handlers::{deleted, require_id};
use crate::middleware::{ApiPath, ApiResponse, ApiResult, AuthPayload, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFamilyRequest {
    #[validate(length(min = 2))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFamilyRequest {
    pub id: Uuid,
    #[validate(length(min = 2))]
    pub name: String,
}

/// Load a family and require that the caller created it
async fn require_creator(state: &AppState, auth: &AuthPayload, id: Uuid) -> Result<Family, ApiError> {
    let id = require_id(id, "id")?;
    let user = current_user(state, auth).await?;
    let family = state.store.get_family_by_id(id).await?;

    if family.created_by_user_id != user.id {
        return Err(ApiError::forbidden("only the family creator can modify it"));
    }
    Ok(family)
}

/// POST /families - the caller becomes the creator
pub async fn family_post(
    State(state): State<AppState>,
    auth: AuthPayload,
    ValidatedJson(request): ValidatedJson<CreateFamilyRequest>,
) -> ApiResult<Family> {
    let user = current_user(&state, &auth).await?;

    let family = state
        .store
        .create_family(CreateFamilyParams {
            name: request.name,
            created_by_user_id: user.id,
        })
        .await?;

    tracing::info!("User {} created family {}", user.id, family.id);
    Ok(ApiResponse::created(family))
}

pub async fn families_list(State(state): State<AppState>) -> ApiResult<Vec<Family>> {
    Ok(ApiResponse::success(state.store.get_families().await?))
}

pub async fn family_get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Family> {
    let family = state.store.get_family_by_id(require_id(id, "id")?).await?;
    Ok(ApiResponse::success(family))
}

pub async fn family_get_by_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> ApiResult<Family> {
    let family = state
        .store
        .get_family_by_user_id(require_id(user_id, "user_id")?)
        .await?;
    Ok(ApiResponse::success(family))
}

pub async fn family_put(
    State(state): State<AppState>,
    auth: AuthPayload,
    ValidatedJson(request): ValidatedJson<UpdateFamilyRequest>,
) -> ApiResult<Family> {
    require_creator(&state, &auth, request.id).await?;

    let family = state
        .store
        .update_family(UpdateFamilyParams {
            id: request.id,
            name: request.name,
        })
        .await?;

    Ok(ApiResponse::success(family))
}

pub async fn family_delete(
    State(state): State<AppState>,
    auth: AuthPayload,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Value> {
    require_creator(&state, &auth, id).await?;

    state.store.delete_family(id).await?;
    tracing::info!("Deleted family {}", id);
    Ok(ApiResponse::success(deleted("family", id)))
}
