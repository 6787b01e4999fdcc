pub mod family;
pub mod ingredient;
pub mod recipe;
pub mod user;

pub use family::{CreateFamilyParams, Family, UpdateFamilyParams};
pub use ingredient::{CreateIngredientParams, Ingredient, UpdateIngredientParams};
pub use recipe::{CreateRecipeParams, MeasureUnit, Recipe, RecipeItem, UpdateRecipeParams};
pub use user::{
    CreateUserParams, UpdateUserEmailParams, UpdateUserInfoParams, UpdateUserPasswordParams, User,
    UserResponse,
};
