// handlers/public/ingredients.rs - GET /ingredients, GET /ingredients/:id
use axum::extract::State;

use crate::database::models::Ingredient;
use crate::middleware::{ApiPath, ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn ingredients_list(State(state): State<AppState>) -> ApiResult<Vec<Ingredient>> {
    Ok(ApiResponse::success(state.store.get_ingredients().await?))
}

pub async fn ingredient_get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Ingredient> {
    Ok(ApiResponse::success(state.store.get_ingredient_by_id(id).await?))
}
