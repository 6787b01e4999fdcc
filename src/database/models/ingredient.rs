use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    /// grams per millilitre
    pub density: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateIngredientParams {
    pub name: String,
    pub density: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateIngredientParams {
    pub id: i32,
    pub name: String,
    pub density: f64,
}
