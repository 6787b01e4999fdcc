use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::auth_middleware;
use crate::state::AppState;

/// Full application router: public and protected tiers plus global layers
pub fn app(state: AppState) -> Router {
    let enable_cors = state.config.security.enable_cors;
    let enable_tracing = state.config.server.enable_request_logging;

    let mut router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state))
        .with_state(state);

    if enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if enable_tracing {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(public::health_get))
        .route("/users", post(public::register_post))
        .route("/users/login", post(public::login_post))
        .route("/ingredients", get(public::ingredients_list))
        .route("/ingredients/:id", get(public::ingredient_get))
}

/// Routes behind the bearer token check. `route_layer` keeps unmatched
/// paths returning 404 instead of 401.
fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(protected::users_list))
        .route("/users/me", get(protected::user_me))
        .route(
            "/users/:id",
            get(protected::user_get).delete(protected::user_delete),
        )
        .route("/users/email", put(protected::user_put_email))
        .route("/users/password", put(protected::user_put_password))
        .route("/users/info", put(protected::user_put_info))
        .route(
            "/families",
            get(protected::families_list)
                .post(protected::family_post)
                .put(protected::family_put),
        )
        .route(
            "/families/:id",
            get(protected::family_get).delete(protected::family_delete),
        )
        .route("/families/:id/recipes", get(protected::family_recipes_list))
        .route("/families/users/:user_id", get(protected::family_get_by_user))
        .route(
            "/ingredients",
            post(protected::ingredient_post).put(protected::ingredient_put),
        )
        .route("/ingredients/:id", delete(protected::ingredient_delete))
        .route(
            "/recipes",
            get(protected::recipes_list)
                .post(protected::recipe_post)
                .put(protected::recipe_put),
        )
        .route(
            "/recipes/:id",
            get(protected::recipe_get).delete(protected::recipe_delete),
        )
        .route_layer(from_fn_with_state(state.token_maker.clone(), auth_middleware))
}
