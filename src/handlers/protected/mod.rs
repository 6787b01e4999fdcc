// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind auth_middleware, so handlers can rely on the
// AuthPayload extractor. Ownership checks resolve the token subject to a
// user record first.
pub mod families;
pub mod ingredients;
pub mod recipes;
pub mod users;

pub use families::{
    families_list, family_delete, family_get, family_get_by_user, family_post, family_put,
};
pub use ingredients::{ingredient_delete, ingredient_post, ingredient_put};
pub use recipes::{
    family_recipes_list, recipe_delete, recipe_get, recipe_post, recipe_put, recipes_list,
};
pub use users::{
    user_delete, user_get, user_me, user_put_email, user_put_info, user_put_password, users_list,
};

use crate::database::models::User;
use crate::database::StoreError;
use crate::error::ApiError;
use crate::middleware::AuthPayload;
use crate::state::AppState;

/// Look up the account named by the token subject
pub(crate) async fn current_user(state: &AppState, auth: &AuthPayload) -> Result<User, ApiError> {
    match state.store.get_user_by_email(&auth.0.subject).await {
        Ok(user) => Ok(user),
        Err(StoreError::NotFound(_)) => {
            tracing::debug!("Token subject has no matching account");
            Err(ApiError::unauthorized("account no longer exists"))
        }
        Err(e) => Err(e.into()),
    }
}
