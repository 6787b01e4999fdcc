// handlers/protected/ingredients.rs - ingredient writes
use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::database::models::{CreateIngredientParams, Ingredient, UpdateIngredientParams};
use crate::handlers::deleted;
use crate::middleware::{ApiPath, ApiResponse, ApiResult, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateIngredientRequest {
    #[validate(length(min = 2))]
    pub name: String,
    /// g/mL
    #[validate(range(exclusive_min = 0.0))]
    pub density: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateIngredientRequest {
    pub id: i32,
    #[validate(length(min = 2))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0))]
    pub density: f64,
}

pub async fn ingredient_post(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateIngredientRequest>,
) -> ApiResult<Ingredient> {
    let ingredient = state
        .store
        .create_ingredient(CreateIngredientParams {
            name: request.name,
            density: request.density,
        })
        .await?;

    Ok(ApiResponse::created(ingredient))
}

pub async fn ingredient_put(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateIngredientRequest>,
) -> ApiResult<Ingredient> {
    let ingredient = state
        .store
        .update_ingredient(UpdateIngredientParams {
            id: request.id,
            name: request.name,
            density: request.density,
        })
        .await?;

    Ok(ApiResponse::success(ingredient))
}

pub async fn ingredient_delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Value> {
    state.store.delete_ingredient(id).await?;
    Ok(ApiResponse::success(deleted("ingredient", id)))
}
