use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureUnit {
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "mL")]
    Millilitres,
    #[serde(rename = "tsp")]
    Teaspoon,
    #[serde(rename = "tbsp")]
    Tablespoon,
    #[serde(rename = "pc")]
    Piece,
    #[serde(rename = "cup")]
    Cup,
}

impl MeasureUnit {
    pub const ALL: [MeasureUnit; 6] = [
        MeasureUnit::Grams,
        MeasureUnit::Cup,
        MeasureUnit::Millilitres,
        MeasureUnit::Piece,
        MeasureUnit::Tablespoon,
        MeasureUnit::Teaspoon,
    ];
}

/// One quantified ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeItem {
    pub ingredient_id: i32,
    pub quantity: f64,
    pub unit: MeasureUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub cooking_process: String,
    pub family_id: Uuid,
    pub items: Vec<RecipeItem>,
}

/// Raw row shape; `items` lives in a JSONB column
#[derive(Debug, FromRow)]
pub(crate) struct RecipeRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub cooking_process: String,
    pub family_id: Uuid,
    pub items: Json<Vec<RecipeItem>>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            name: row.name,
            cooking_process: row.cooking_process,
            family_id: row.family_id,
            items: row.items.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateRecipeParams {
    pub name: String,
    pub cooking_process: String,
    pub family_id: Uuid,
    pub items: Vec<RecipeItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRecipeParams {
    pub id: Uuid,
    pub name: String,
    pub cooking_process: String,
    pub items: Vec<RecipeItem>,
}
