// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Account registration, token acquisition and read-only ingredient lookups.
pub mod health;
pub mod ingredients;
pub mod users;

pub use health::health_get;
pub use ingredients::{ingredient_get, ingredients_list};
pub use users::{login_post, register_post};
