use async_trait::async_trait;
use uuid::Uuid;

use super::error::StoreError;
use super::models::*;

/// Record-oriented persistence for every entity the API manages.
///
/// Lookups that match nothing return `StoreError::NotFound`, as do deletes
/// that remove no rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    async fn health_check(&self) -> Result<(), StoreError>;

    // Users
    async fn create_user(&self, params: CreateUserParams) -> Result<User, StoreError>;
    async fn get_users(&self) -> Result<Vec<User>, StoreError>;
    async fn get_user_by_id(&self, id: Uuid) -> Result<User, StoreError>;
    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError>;
    async fn update_user_email(&self, params: UpdateUserEmailParams) -> Result<User, StoreError>;
    async fn update_user_info(&self, params: UpdateUserInfoParams) -> Result<User, StoreError>;
    async fn update_user_password(&self, params: UpdateUserPasswordParams) -> Result<User, StoreError>;
    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError>;

    // Families
    async fn create_family(&self, params: CreateFamilyParams) -> Result<Family, StoreError>;
    async fn get_families(&self) -> Result<Vec<Family>, StoreError>;
    async fn get_family_by_id(&self, id: Uuid) -> Result<Family, StoreError>;
    async fn get_family_by_user_id(&self, user_id: Uuid) -> Result<Family, StoreError>;
    async fn update_family(&self, params: UpdateFamilyParams) -> Result<Family, StoreError>;
    async fn delete_family(&self, id: Uuid) -> Result<(), StoreError>;

    // Ingredients
    async fn create_ingredient(&self, params: CreateIngredientParams) -> Result<Ingredient, StoreError>;
    async fn get_ingredients(&self) -> Result<Vec<Ingredient>, StoreError>;
    async fn get_ingredient_by_id(&self, id: i32) -> Result<Ingredient, StoreError>;
    async fn get_ingredient_by_name(&self, name: &str) -> Result<Ingredient, StoreError>;
    async fn update_ingredient(&self, params: UpdateIngredientParams) -> Result<Ingredient, StoreError>;
    async fn delete_ingredient(&self, id: i32) -> Result<(), StoreError>;

    // Recipes
    async fn create_recipe(&self, params: CreateRecipeParams) -> Result<Recipe, StoreError>;
    async fn get_recipes(&self) -> Result<Vec<Recipe>, StoreError>;
    async fn get_recipe_by_id(&self, id: Uuid) -> Result<Recipe, StoreError>;
    async fn get_recipes_by_family_id(&self, family_id: Uuid) -> Result<Vec<Recipe>, StoreError>;
    async fn update_recipe(&self, params: UpdateRecipeParams) -> Result<Recipe, StoreError>;
    async fn delete_recipe(&self, id: Uuid) -> Result<(), StoreError>;
}
