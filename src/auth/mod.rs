//! Authentication Module
//! Mission: account registration, login, and JWT-gated API access

pub mod account_store;
pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;

pub use account_store::AccountStore;
pub use api::AuthState;
pub use jwt::JwtHandler;
pub use middleware::auth_middleware;
