//! RecipeHub Backend Library
//!
//! Exposes the auth and recipe modules plus router assembly, shared by the
//! server binary and the integration tests.

pub mod auth;
pub mod middleware;
pub mod models;
pub mod recipes;
pub mod routes;
