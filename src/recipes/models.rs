//! Recipe Models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recipe document owned by exactly one account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub owner_id: Uuid,
    pub created_at: String,
}

/// Recipe creation request body. The owner is never part of the payload; it is
/// always the authenticated identity. Fields default to empty so an absent
/// field fails handler validation rather than body deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
}
