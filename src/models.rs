//! Application configuration loaded from the environment.

use tracing::warn;

pub struct Config {
    pub database_path: String,
    pub port: u16,
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./recipehub.db".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set - falling back to development secret");
            "dev-secret-change-in-production-minimum-32-characters".to_string()
        });

        Ok(Self {
            database_path,
            port,
            jwt_secret,
        })
    }
}
