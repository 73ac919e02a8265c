//! JWT Token Handler
//! Mission: issue and validate signed bearer tokens

use crate::auth::models::{Account, Claims};
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use tracing::debug;

/// Token lifetime in seconds. There is no refresh mechanism; clients re-login
/// after expiry.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Why a token failed verification. Every variant surfaces to the caller as the
/// same unauthorized outcome; the distinction exists for diagnostics.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("bad signature")]
    BadSignature,
    #[error("malformed token")]
    Malformed,
}

/// JWT Handler for token operations. The secret is process-wide configuration,
/// loaded once at startup and never rotated at runtime.
pub struct JwtHandler {
    secret: String,
}

impl JwtHandler {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Issue a signed token for an account, valid for one hour from now.
    pub fn issue_token(&self, account: &Account) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: account.id.to_string(),
            username: account.username.clone(),
            iat: now as usize,
            exp: (now + TOKEN_TTL_SECS) as usize,
        };

        debug!(
            "Issuing JWT for {} ({}), ttl {}s",
            account.username, account.id, TOKEN_TTL_SECS
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign JWT")
    }

    /// Verify a token and extract its claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        // No leeway: a token is rejected the instant its expiry passes.
        validation.leeway = 0;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed,
        })?;

        debug!("Validated JWT for {}", decoded.claims.username);

        Ok(decoded.claims)
    }
}
