//! Recipe Storage
//! Mission: persist recipes in SQLite, scoped to their owner

use crate::auth::account_store::parse_uuid;
use crate::recipes::models::Recipe;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tracing::info;
use uuid::Uuid;

/// Recipe storage with SQLite backend. Every read and delete is filtered by
/// owner, so one account can never observe another account's recipes.
pub struct RecipeStore {
    db_path: String,
}

impl RecipeStore {
    /// Create a new recipe store and initialize the schema
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                ingredients TEXT NOT NULL,
                owner_id TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_recipes_owner
             ON recipes (owner_id, created_at)",
            [],
        )?;

        Ok(())
    }

    /// Insert a recipe owned by `owner_id` and return the stored record.
    pub fn create(
        &self,
        owner_id: &Uuid,
        name: &str,
        description: &str,
        ingredients: &[String],
    ) -> Result<Recipe> {
        let recipe = Recipe {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.to_string(),
            ingredients: ingredients.to_vec(),
            owner_id: *owner_id,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO recipes (id, name, description, ingredients, owner_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                recipe.id.to_string(),
                recipe.name,
                recipe.description,
                serde_json::to_string(&recipe.ingredients)?,
                recipe.owner_id.to_string(),
                recipe.created_at,
            ],
        )
        .context("Failed to insert recipe")?;

        info!("✅ Created recipe {} for {}", recipe.id, recipe.owner_id);

        Ok(recipe)
    }

    /// List all recipes owned by `owner_id`, newest first.
    pub fn list_for_owner(&self, owner_id: &Uuid) -> Result<Vec<Recipe>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, description, ingredients, owner_id, created_at
             FROM recipes WHERE owner_id = ?1
             ORDER BY created_at DESC, rowid DESC",
        )?;

        let recipes = stmt
            .query_map(params![owner_id.to_string()], row_to_recipe)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Fetch one recipe, only if `owner_id` owns it.
    pub fn get_for_owner(&self, owner_id: &Uuid, recipe_id: &Uuid) -> Result<Option<Recipe>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, description, ingredients, owner_id, created_at
             FROM recipes WHERE id = ?1 AND owner_id = ?2",
        )?;

        let recipe = stmt.query_row(
            params![recipe_id.to_string(), owner_id.to_string()],
            row_to_recipe,
        );

        match recipe {
            Ok(recipe) => Ok(Some(recipe)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete one recipe, only if `owner_id` owns it. Returns whether a row was
    /// removed.
    pub fn delete_for_owner(&self, owner_id: &Uuid, recipe_id: &Uuid) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let removed = conn.execute(
            "DELETE FROM recipes WHERE id = ?1 AND owner_id = ?2",
            params![recipe_id.to_string(), owner_id.to_string()],
        )?;

        if removed > 0 {
            info!("🗑️  Deleted recipe {}", recipe_id);
        }

        Ok(removed > 0)
    }
}

fn row_to_recipe(row: &Row<'_>) -> rusqlite::Result<Recipe> {
    let id: String = row.get(0)?;
    let ingredients_json: String = row.get(3)?;
    let owner: String = row.get(4)?;

    Ok(Recipe {
        id: parse_uuid(0, &id)?,
        name: row.get(1)?,
        description: row.get(2)?,
        ingredients: serde_json::from_str(&ingredients_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?,
        owner_id: parse_uuid(4, &owner)?,
        created_at: row.get(5)?,
    })
}
