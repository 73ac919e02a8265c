//! Recipe API Endpoints
//! Mission: owner-scoped recipe CRUD under /contents

use crate::auth::models::Claims;
use crate::recipes::{
    models::{CreateRecipeRequest, Recipe},
    store::RecipeStore,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// The owner is always the authenticated identity from the token; it is never
/// taken from the request payload.
fn owner_id(claims: &Claims) -> Result<Uuid, RecipeApiError> {
    Uuid::parse_str(&claims.sub).map_err(|_| {
        debug!("Token subject is not a valid account id: {}", claims.sub);
        RecipeApiError::Unauthorized
    })
}

/// Create a recipe - POST /contents
pub async fn create_recipe(
    State(store): State<Arc<RecipeStore>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<Recipe>), RecipeApiError> {
    if payload.name.trim().is_empty() {
        return Err(RecipeApiError::MissingField("name"));
    }
    if payload.description.trim().is_empty() {
        return Err(RecipeApiError::MissingField("description"));
    }
    if payload.ingredients.is_empty() {
        return Err(RecipeApiError::MissingField("ingredients"));
    }

    let owner = owner_id(&claims)?;
    let recipe = store
        .create(&owner, &payload.name, &payload.description, &payload.ingredients)
        .map_err(|e| {
            warn!("Failed to create recipe: {e:#}");
            RecipeApiError::InternalError
        })?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// List the caller's recipes, newest first - GET /contents
pub async fn list_recipes(
    State(store): State<Arc<RecipeStore>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Recipe>>, RecipeApiError> {
    let owner = owner_id(&claims)?;
    let recipes = store.list_for_owner(&owner).map_err(|e| {
        warn!("Failed to list recipes: {e:#}");
        RecipeApiError::InternalError
    })?;

    Ok(Json(recipes))
}

/// Fetch one of the caller's recipes - GET /contents/:id
pub async fn get_recipe(
    State(store): State<Arc<RecipeStore>>,
    Extension(claims): Extension<Claims>,
    Path(recipe_id): Path<String>,
) -> Result<Json<Recipe>, RecipeApiError> {
    let owner = owner_id(&claims)?;
    // A malformed id cannot name an existing recipe.
    let recipe_id = Uuid::parse_str(&recipe_id).map_err(|_| RecipeApiError::NotFound)?;

    let recipe = store
        .get_for_owner(&owner, &recipe_id)
        .map_err(|e| {
            warn!("Failed to fetch recipe: {e:#}");
            RecipeApiError::InternalError
        })?
        .ok_or(RecipeApiError::NotFound)?;

    Ok(Json(recipe))
}

/// Delete one of the caller's recipes - DELETE /contents/:id
pub async fn delete_recipe(
    State(store): State<Arc<RecipeStore>>,
    Extension(claims): Extension<Claims>,
    Path(recipe_id): Path<String>,
) -> Result<Json<serde_json::Value>, RecipeApiError> {
    let owner = owner_id(&claims)?;
    let recipe_id = Uuid::parse_str(&recipe_id).map_err(|_| RecipeApiError::NotFound)?;

    let removed = store.delete_for_owner(&owner, &recipe_id).map_err(|e| {
        warn!("Failed to delete recipe: {e:#}");
        RecipeApiError::InternalError
    })?;

    if !removed {
        return Err(RecipeApiError::NotFound);
    }

    Ok(Json(json!({ "message": "Recipe deleted" })))
}

/// Recipe API errors. `NotFound` covers both truly absent recipes and recipes
/// owned by someone else, so existence never leaks across accounts.
#[derive(Debug)]
pub enum RecipeApiError {
    MissingField(&'static str),
    Unauthorized,
    NotFound,
    InternalError,
}

impl IntoResponse for RecipeApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            RecipeApiError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("Field '{field}' is required"),
            ),
            RecipeApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
            ),
            RecipeApiError::NotFound => (StatusCode::NOT_FOUND, "Recipe not found".to_string()),
            RecipeApiError::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
