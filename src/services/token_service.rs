//! Access/refresh token lifecycle.
//!
//! A user has exactly one live refresh token: `issue` overwrites the stored
//! slot, so rotation invalidates the previous token and a stale presentation
//! is detected by byte-for-byte comparison against the slot. Logging in from
//! a second device therefore signs the first device out — a known limitation
//! of the single-slot model.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::TokenConfig;
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::security::jwt::{self, AccessClaims};

/// Persistence seam for user credentials. Production uses Postgres; tests
/// substitute an in-memory store.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn store_refresh_token(&self, user_id: Uuid, token: Option<&str>) -> Result<()>;
}

pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(user_repo::find_by_id(&self.pool, id).await?)
    }

    async fn store_refresh_token(&self, user_id: Uuid, token: Option<&str>) -> Result<()> {
        Ok(user_repo::store_refresh_token(&self.pool, user_id, token).await?)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct TokenService {
    store: Arc<dyn CredentialStore>,
    config: TokenConfig,
}

impl TokenService {
    pub fn new(store: Arc<dyn CredentialStore>, config: TokenConfig) -> Self {
        Self { store, config }
    }

    pub fn access_ttl_secs(&self) -> i64 {
        self.config.access_ttl_secs
    }

    pub fn refresh_ttl_secs(&self) -> i64 {
        self.config.refresh_ttl_secs
    }

    /// Create a new token pair and persist the refresh token on the user
    /// record, overwriting any prior value.
    pub async fn issue(&self, user: &User) -> Result<TokenPair> {
        let access_token = jwt::encode_access_token(
            user.id,
            &user.email,
            &user.username,
            &user.full_name,
            &self.config.access_secret,
            self.config.access_ttl_secs,
        )
        .map_err(|e| {
            AppError::Internal(format!("Failed to generate access token: {e}"))
        })?;

        let refresh_token =
            jwt::encode_refresh_token(user.id, &self.config.refresh_secret, self.config.refresh_ttl_secs)
                .map_err(|e| {
                    AppError::Internal(format!("Failed to generate refresh token: {e}"))
                })?;

        self.store
            .store_refresh_token(user.id, Some(&refresh_token))
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Cryptographic verification of an access token (signature + expiry +
    /// token type).
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims> {
        jwt::decode_access_token(token, &self.config.access_secret)
            .map_err(|_| AppError::Unauthorized("Invalid or expired access token".to_string()))
    }

    /// Exchange a refresh token for a fresh pair. The presented token must
    /// verify, reference an existing user, and match the stored slot
    /// exactly; a mismatch means the token was already rotated or revoked.
    pub async fn rotate(&self, presented: &str) -> Result<(TokenPair, User)> {
        let claims = jwt::decode_refresh_token(presented, &self.config.refresh_secret)
            .map_err(|_| AppError::Unauthorized("Refresh token is expired or invalid".to_string()))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Refresh token is expired or invalid".to_string()))?;

        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Invalid refresh token".to_string()))?;

        match user.refresh_token.as_deref() {
            Some(stored) if stored == presented => {}
            _ => {
                return Err(AppError::Unauthorized(
                    "Refresh token is expired or invalid".to_string(),
                ))
            }
        }

        let pair = self.issue(&user).await?;
        Ok((pair, user))
    }

    /// Clear the refresh-token slot (logout).
    pub async fn revoke(&self, user_id: Uuid) -> Result<()> {
        self.store.store_refresh_token(user_id, None).await
    }

    /// Verify an access token and load the referenced user. Used by the
    /// session middleware; a vanished user is indistinguishable from a bad
    /// token on purpose.
    pub async fn resolve_user(&self, token: &str) -> Result<User> {
        let claims = self.verify_access(token)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user ID in token".to_string()))?;

        self.store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired access token".to_string()))
    }
}
