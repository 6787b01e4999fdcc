use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use super::error::StoreError;
use super::models::recipe::RecipeRow;
use super::models::*;
use super::store::Store;
use crate::config::DatabaseConfig;

const USER_COLUMNS: &str = "id, created_at, updated_at, first_name, email, password, family_id";
const FAMILY_COLUMNS: &str = "id, created_at, updated_at, name, created_by_user_id";
const INGREDIENT_COLUMNS: &str = "id, name, density::float8 AS density";
const RECIPE_COLUMNS: &str = "id, created_at, updated_at, name, cooking_process, family_id, items";

/// Postgres-backed store over a shared connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.url)
            .await
            .map_err(StoreError::Database)?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(Self::new(pool))
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn delete_by_id<T>(&self, table: &str, id: T, entity: &str) -> Result<(), StoreError>
    where
        T: for<'q> sqlx::Encode<'q, sqlx::Postgres> + sqlx::Type<sqlx::Postgres> + Send + 'static,
    {
        let query = format!("DELETE FROM {} WHERE id = $1", table);
        let result = sqlx::query(&query)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, entity))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("{} not found", entity)));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, params: CreateUserParams) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (first_name, email, password) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&query)
            .bind(params.first_name)
            .bind(params.email)
            .bind(params.password)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "user"))
    }

    async fn get_users(&self) -> Result<Vec<User>, StoreError> {
        let query = format!("SELECT {} FROM users ORDER BY created_at", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&query).fetch_all(&self.pool).await?)
    }

    async fn get_user_by_id(&self, id: Uuid) -> Result<User, StoreError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "user"))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "user"))
    }

    async fn update_user_email(&self, params: UpdateUserEmailParams) -> Result<User, StoreError> {
        let query = format!(
            "UPDATE users SET email = $2, updated_at = now() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&query)
            .bind(params.id)
            .bind(params.email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "user"))
    }

    async fn update_user_info(&self, params: UpdateUserInfoParams) -> Result<User, StoreError> {
        let query = format!(
            "UPDATE users SET first_name = $2, updated_at = now() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&query)
            .bind(params.id)
            .bind(params.first_name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "user"))
    }

    async fn update_user_password(&self, params: UpdateUserPasswordParams) -> Result<User, StoreError> {
        let query = format!(
            "UPDATE users SET password = $2, updated_at = now() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&query)
            .bind(params.id)
            .bind(params.password)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "user"))
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete_by_id("users", id, "user").await
    }

    async fn create_family(&self, params: CreateFamilyParams) -> Result<Family, StoreError> {
        let query = format!(
            "INSERT INTO families (name, created_by_user_id) VALUES ($1, $2) RETURNING {}",
            FAMILY_COLUMNS
        );
        sqlx::query_as::<_, Family>(&query)
            .bind(params.name)
            .bind(params.created_by_user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "family"))
    }

    async fn get_families(&self) -> Result<Vec<Family>, StoreError> {
        let query = format!("SELECT {} FROM families ORDER BY created_at", FAMILY_COLUMNS);
        Ok(sqlx::query_as::<_, Family>(&query).fetch_all(&self.pool).await?)
    }

    async fn get_family_by_id(&self, id: Uuid) -> Result<Family, StoreError> {
        let query = format!("SELECT {} FROM families WHERE id = $1", FAMILY_COLUMNS);
        sqlx::query_as::<_, Family>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "family"))
    }

    async fn get_family_by_user_id(&self, user_id: Uuid) -> Result<Family, StoreError> {
        let query = format!(
            "SELECT {} FROM families WHERE created_by_user_id = $1 LIMIT 1",
            FAMILY_COLUMNS
        );
        sqlx::query_as::<_, Family>(&query)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "family"))
    }

    async fn update_family(&self, params: UpdateFamilyParams) -> Result<Family, StoreError> {
        let query = format!(
            "UPDATE families SET name = $2, updated_at = now() WHERE id = $1 RETURNING {}",
            FAMILY_COLUMNS
        );
        sqlx::query_as::<_, Family>(&query)
            .bind(params.id)
            .bind(params.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "family"))
    }

    async fn delete_family(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete_by_id("families", id, "family").await
    }

    async fn create_ingredient(&self, params: CreateIngredientParams) -> Result<Ingredient, StoreError> {
        let query = format!(
            "INSERT INTO ingredients (name, density) VALUES ($1, $2::numeric) RETURNING {}",
            INGREDIENT_COLUMNS
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(params.name)
            .bind(params.density)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "ingredient"))
    }

    async fn get_ingredients(&self) -> Result<Vec<Ingredient>, StoreError> {
        let query = format!("SELECT {} FROM ingredients ORDER BY id", INGREDIENT_COLUMNS);
        Ok(sqlx::query_as::<_, Ingredient>(&query).fetch_all(&self.pool).await?)
    }

    async fn get_ingredient_by_id(&self, id: i32) -> Result<Ingredient, StoreError> {
        let query = format!("SELECT {} FROM ingredients WHERE id = $1", INGREDIENT_COLUMNS);
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "ingredient"))
    }

    async fn get_ingredient_by_name(&self, name: &str) -> Result<Ingredient, StoreError> {
        let query = format!("SELECT {} FROM ingredients WHERE name = $1", INGREDIENT_COLUMNS);
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "ingredient"))
    }

    async fn update_ingredient(&self, params: UpdateIngredientParams) -> Result<Ingredient, StoreError> {
        let query = format!(
            "UPDATE ingredients SET name = $2, density = $3::numeric WHERE id = $1 RETURNING {}",
            INGREDIENT_COLUMNS
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(params.id)
            .bind(params.name)
            .bind(params.density)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "ingredient"))
    }

    async fn delete_ingredient(&self, id: i32) -> Result<(), StoreError> {
        self.delete_by_id("ingredients", id, "ingredient").await
    }

    async fn create_recipe(&self, params: CreateRecipeParams) -> Result<Recipe, StoreError> {
        let query = format!(
            "INSERT INTO recipes (name, cooking_process, family_id, items) VALUES ($1, $2, $3, $4) RETURNING {}",
            RECIPE_COLUMNS
        );
        let row = sqlx::query_as::<_, RecipeRow>(&query)
            .bind(params.name)
            .bind(params.cooking_process)
            .bind(params.family_id)
            .bind(Json(params.items))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "recipe"))?;
        Ok(row.into())
    }

    async fn get_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        let query = format!("SELECT {} FROM recipes ORDER BY created_at", RECIPE_COLUMNS);
        let rows = sqlx::query_as::<_, RecipeRow>(&query).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn get_recipe_by_id(&self, id: Uuid) -> Result<Recipe, StoreError> {
        let query = format!("SELECT {} FROM recipes WHERE id = $1", RECIPE_COLUMNS);
        let row = sqlx::query_as::<_, RecipeRow>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "recipe"))?;
        Ok(row.into())
    }

    async fn get_recipes_by_family_id(&self, family_id: Uuid) -> Result<Vec<Recipe>, StoreError> {
        let query = format!(
            "SELECT {} FROM recipes WHERE family_id = $1 ORDER BY created_at",
            RECIPE_COLUMNS
        );
        let rows = sqlx::query_as::<_, RecipeRow>(&query)
            .bind(family_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn update_recipe(&self, params: UpdateRecipeParams) -> Result<Recipe, StoreError> {
        let query = format!(
            "UPDATE recipes SET name = $2, cooking_process = $3, items = $4, updated_at = now() WHERE id = $1 RETURNING {}",
            RECIPE_COLUMNS
        );
        let row = sqlx::query_as::<_, RecipeRow>(&query)
            .bind(params.id)
            .bind(params.name)
            .bind(params.cooking_process)
            .bind(Json(params.items))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::classify(e, "recipe"))?;
        Ok(row.into())
    }

    async fn delete_recipe(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete_by_id("recipes", id, "recipe").await
    }
}
