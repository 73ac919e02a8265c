//! RecipeHub - Recipe Sharing Backend
//! Mission: account registration, login, and owner-scoped recipe CRUD over REST

use anyhow::{Context, Result};
use recipehub_backend::{
    auth::{AccountStore, AuthState, JwtHandler},
    models::Config,
    recipes::RecipeStore,
    routes::build_router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let account_store = Arc::new(AccountStore::new(&config.database_path)?);
    let recipe_store = Arc::new(RecipeStore::new(&config.database_path)?);
    let jwt_handler = Arc::new(JwtHandler::new(config.jwt_secret.clone()));
    let auth_state = AuthState::new(account_store, jwt_handler);

    info!("🔐 Stores initialized at: {}", config.database_path);

    let app = build_router(auth_state, recipe_store);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing with env-filter based log levels
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipehub_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
