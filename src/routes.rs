//! Router Assembly
//! Mission: wire public and JWT-protected routes into one app

use crate::auth::{api as auth_api, auth_middleware, AuthState};
use crate::middleware::request_logging;
use crate::recipes::{api as recipe_api, store::RecipeStore};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Build the application router.
///
/// Recipe routes and the session check sit behind the auth middleware;
/// registration, login, logout, and the health check are public.
pub fn build_router(auth_state: AuthState, recipe_store: Arc<RecipeStore>) -> Router {
    let jwt_handler = auth_state.jwt_handler.clone();

    let auth_routes = Router::new()
        .route("/users", post(auth_api::register))
        .route(
            "/login",
            post(auth_api::login).delete(auth_api::logout).merge(
                get(auth_api::session).route_layer(middleware::from_fn_with_state(
                    jwt_handler.clone(),
                    auth_middleware,
                )),
            ),
        )
        .with_state(auth_state);

    let recipe_routes = Router::new()
        .route(
            "/contents",
            post(recipe_api::create_recipe).get(recipe_api::list_recipes),
        )
        .route(
            "/contents/:id",
            get(recipe_api::get_recipe).delete(recipe_api::delete_recipe),
        )
        .route_layer(middleware::from_fn_with_state(jwt_handler, auth_middleware))
        .with_state(recipe_store);

    let public_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(recipe_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

async fn health_check() -> &'static str {
    "RecipeHub operational"
}
