//! Authentication API Endpoints
//! Mission: registration, login, and session endpoints

use crate::auth::{
    account_store::{AccountStore, StoreError},
    jwt::JwtHandler,
    models::{Claims, LoginRequest, LoginResponse, RegisterRequest, SessionResponse},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub account_store: Arc<AccountStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(account_store: Arc<AccountStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            account_store,
            jwt_handler,
        }
    }
}

/// Register a new account - POST /users
pub async fn register(
    State(state): State<AuthState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AuthApiError> {
    for (field, value) in [
        ("username", &payload.username),
        ("password", &payload.password),
        ("email", &payload.email),
    ] {
        if value.trim().is_empty() {
            return Err(AuthApiError::MissingField(field));
        }
    }

    let account = state
        .account_store
        .create_account(&payload.username, &payload.password, &payload.email)
        .map_err(|e| match e {
            StoreError::DuplicateUsername => AuthApiError::DuplicateUsername,
            StoreError::Internal(err) => {
                warn!("Failed to create account: {err:#}");
                AuthApiError::InternalError
            }
        })?;

    info!("✅ Registered account: {}", account.username);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registration successful", "id": account.id })),
    ))
}

/// Login - POST /login
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    if payload.username.trim().is_empty() {
        return Err(AuthApiError::MissingField("username"));
    }
    if payload.password.trim().is_empty() {
        return Err(AuthApiError::MissingField("password"));
    }

    // Unknown user and wrong password are indistinguishable to the caller.
    let account = state
        .account_store
        .verify_credentials(&payload.username, &payload.password)
        .map_err(|e| {
            warn!("Credential check failed: {e:#}");
            AuthApiError::InternalError
        })?
        .ok_or_else(|| {
            info!("❌ Failed login attempt: {}", payload.username);
            AuthApiError::InvalidCredentials
        })?;

    let token = state.jwt_handler.issue_token(&account).map_err(|e| {
        warn!("Failed to issue token: {e:#}");
        AuthApiError::InternalError
    })?;

    info!("✅ Login successful: {}", account.username);

    Ok(Json(LoginResponse {
        token,
        username: account.username,
    }))
}

/// Session check - GET /login (behind auth middleware)
///
/// Answered from the verified JWT claims; no store lookup needed.
pub async fn session(Extension(claims): Extension<Claims>) -> Json<SessionResponse> {
    Json(SessionResponse {
        logged_in: true,
        username: claims.username,
    })
}

/// Logout - DELETE /login
///
/// Tokens are stateless and held client-side; there is nothing to invalidate
/// here. The token dies on its own at expiry.
pub async fn logout() -> Json<serde_json::Value> {
    Json(json!({ "message": "Logged out" }))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    MissingField(&'static str),
    DuplicateUsername,
    InvalidCredentials,
    InternalError,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("Field '{field}' is required"),
            ),
            AuthApiError::DuplicateUsername => {
                (StatusCode::BAD_REQUEST, "Username already exists".to_string())
            }
            AuthApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            ),
            AuthApiError::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_api_error_responses() {
        let missing = AuthApiError::MissingField("email").into_response();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let duplicate = AuthApiError::DuplicateUsername.into_response();
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);

        let invalid_creds = AuthApiError::InvalidCredentials.into_response();
        assert_eq!(invalid_creds.status(), StatusCode::UNAUTHORIZED);

        let internal = AuthApiError::InternalError.into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
