//! JWT claim encoding/decoding for the access/refresh token pair.
//!
//! Keys and lifetimes come in as arguments; nothing here reads the
//! environment. Access and refresh tokens are signed with separate HS256
//! secrets, and each carries a `token_type` discriminator so one can never
//! be presented in place of the other.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

type JwtResult<T> = Result<T, jsonwebtoken::errors::Error>;

/// Claims of the short-lived access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

/// Claims of the long-lived refresh token; subject only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

pub fn encode_access_token(
    user_id: Uuid,
    email: &str,
    username: &str,
    full_name: &str,
    secret: &str,
    ttl_secs: i64,
) -> JwtResult<String> {
    let now = Utc::now();
    let claims = AccessClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        username: username.to_string(),
        full_name: full_name.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        token_type: TOKEN_TYPE_ACCESS.to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn encode_refresh_token(user_id: Uuid, secret: &str, ttl_secs: i64) -> JwtResult<String> {
    let now = Utc::now();
    let claims = RefreshClaims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        token_type: TOKEN_TYPE_REFRESH.to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify signature and expiry of an access token.
pub fn decode_access_token(token: &str, secret: &str) -> JwtResult<AccessClaims> {
    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    if data.claims.token_type != TOKEN_TYPE_ACCESS {
        return Err(ErrorKind::InvalidToken.into());
    }

    Ok(data.claims)
}

/// Verify signature and expiry of a refresh token.
pub fn decode_refresh_token(token: &str, secret: &str) -> JwtResult<RefreshClaims> {
    let data = decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    if data.claims.token_type != TOKEN_TYPE_REFRESH {
        return Err(ErrorKind::InvalidToken.into());
    }

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS_SECRET: &str = "access-secret-for-tests";
    const REFRESH_SECRET: &str = "refresh-secret-for-tests";

    #[test]
    fn test_access_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = encode_access_token(
            user_id,
            "chai@example.com",
            "chai",
            "Chai Aur Code",
            ACCESS_SECRET,
            900,
        )
        .unwrap();

        let claims = decode_access_token(&token, ACCESS_SECRET).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "chai@example.com");
        assert_eq!(claims.username, "chai");
        assert_eq!(claims.full_name, "Chai Aur Code");
        assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = encode_refresh_token(user_id, REFRESH_SECRET, 864000).unwrap();

        let claims = decode_refresh_token(&token, REFRESH_SECRET).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.token_type, TOKEN_TYPE_REFRESH);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = encode_access_token(
            Uuid::new_v4(),
            "a@b.c",
            "user",
            "User",
            ACCESS_SECRET,
            900,
        )
        .unwrap();

        assert!(decode_access_token(&token, "some-other-secret").is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(decode_access_token("not.a.token", ACCESS_SECRET).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative TTL puts the expiry well past the default leeway.
        let token = encode_access_token(
            Uuid::new_v4(),
            "a@b.c",
            "user",
            "User",
            ACCESS_SECRET,
            -7200,
        )
        .unwrap();

        assert!(decode_access_token(&token, ACCESS_SECRET).is_err());
    }

    #[test]
    fn test_refresh_token_not_accepted_as_access() {
        // Same secret for both so only the token_type check can reject it.
        let token = encode_refresh_token(Uuid::new_v4(), ACCESS_SECRET, 900).unwrap();
        assert!(decode_access_token(&token, ACCESS_SECRET).is_err());
    }

    #[test]
    fn test_refresh_expiry_exceeds_access_expiry() {
        let user_id = Uuid::new_v4();
        let access =
            encode_access_token(user_id, "a@b.c", "user", "User", ACCESS_SECRET, 900).unwrap();
        let refresh = encode_refresh_token(user_id, REFRESH_SECRET, 864000).unwrap();

        let access_claims = decode_access_token(&access, ACCESS_SECRET).unwrap();
        let refresh_claims = decode_refresh_token(&refresh, REFRESH_SECRET).unwrap();
        assert!(refresh_claims.exp > access_claims.exp);
    }
}
