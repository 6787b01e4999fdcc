// handlers/protected/recipes.rs - /recipes routes and GET /families/:id/recipes
use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::database::models::{CreateRecipeParams, Recipe, RecipeItem, UpdateRecipeParams};
use crate::error::ApiError;
use crate::handlers::{deleted, require_id};
use crate::middleware::{ApiPath, ApiResponse, ApiResult, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecipeRequest {
    #[validate(length(min = 2))]
    pub name: String,
    pub cooking_process: String,
    pub family_id: Uuid,
    #[serde(default)]
    pub items: Vec<RecipeItem>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecipeRequest {
    pub id: Uuid,
    #[validate(length(min = 2))]
    pub name: String,
    pub cooking_process: String,
    #[serde(default)]
    pub items: Vec<RecipeItem>,
}

fn check_items(items: &[RecipeItem]) -> Result<(), ApiError> {
    for (index, item) in items.iter().enumerate() {
        if item.quantity <= 0.0 || !item.quantity.is_finite() {
            return Err(ApiError::validation_error(format!(
                "items[{}].quantity must be greater than 0",
                index
            )));
        }
    }
    Ok(())
}

pub async fn recipe_post(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateRecipeRequest>,
) -> ApiResult<Recipe> {
    let family_id = require_id(request.family_id, "family_id")?;
    check_items(&request.items)?;

    let recipe = state
        .store
        .create_recipe(CreateRecipeParams {
            name: request.name,
            cooking_process: request.cooking_process,
            family_id,
            items: request.items,
        })
        .await?;

    Ok(ApiResponse::created(recipe))
}

pub async fn recipes_list(State(state): State<AppState>) -> ApiResult<Vec<Recipe>> {
    Ok(ApiResponse::success(state.store.get_recipes().await?))
}

pub async fn recipe_get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Recipe> {
    let recipe = state.store.get_recipe_by_id(require_id(id, "id")?).await?;
    Ok(ApiResponse::success(recipe))
}

/// GET /families/:id/recipes
pub async fn family_recipes_list(
    State(state): State<AppState>,
    ApiPath(family_id): ApiPath<Uuid>,
) -> ApiResult<Vec<Recipe>> {
    let recipes = state
        .store
        .get_recipes_by_family_id(require_id(family_id, "id")?)
        .await?;
    Ok(ApiResponse::success(recipes))
}

pub async fn recipe_put(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UpdateRecipeRequest>,
) -> ApiResult<Recipe> {
    let id = require_id(request.id, "id")?;
    check_items(&request.items)?;

    let recipe = state
        .store
        .update_recipe(UpdateRecipeParams {
            id,
            name: request.name,
            cooking_process: request.cooking_process,
            items: request.items,
        })
        .await?;

    Ok(ApiResponse::success(recipe))
}

pub async fn recipe_delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Value> {
    state.store.delete_recipe(require_id(id, "id")?).await?;
    Ok(ApiResponse::success(deleted("recipe", id)))
}
