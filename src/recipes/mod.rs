//! Recipes Module
//! Mission: owner-scoped recipe documents

pub mod api;
pub mod models;
pub mod store;

pub use store::RecipeStore;
