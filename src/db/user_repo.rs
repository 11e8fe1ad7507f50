/// User repository - the credential store plus profile queries
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ChannelProfile, User};

const USER_COLUMNS: &str = "id, username, email, full_name, password_hash, avatar_url, \
     cover_image_url, google_id, refresh_token, created_at, updated_at, last_login_at";

pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    full_name: &str,
    password_hash: &str,
    avatar_url: Option<&str>,
    cover_image_url: Option<&str>,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, username, email, full_name, password_hash, avatar_url, cover_image_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(username.to_lowercase())
    .bind(email.to_lowercase())
    .bind(full_name)
    .bind(password_hash)
    .bind(avatar_url)
    .bind(cover_image_url)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username.to_lowercase())
    .fetch_optional(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email.to_lowercase())
    .fetch_optional(pool)
    .await
}

/// Check whether a username or email is already taken, optionally excluding
/// one user id (for account updates).
pub async fn identity_exists(
    pool: &PgPool,
    username: &str,
    email: &str,
    exclude: Option<Uuid>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM users
            WHERE (username = $1 OR email = $2) AND ($3::uuid IS NULL OR id <> $3)
        )
        "#,
    )
    .bind(username.to_lowercase())
    .bind(email.to_lowercase())
    .bind(exclude)
    .fetch_one(pool)
    .await
}

/// Overwrite the single refresh-token slot. `None` clears it (logout).
pub async fn store_refresh_token(
    pool: &PgPool,
    user_id: Uuid,
    refresh_token: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET refresh_token = $1, updated_at = $2 WHERE id = $3")
        .bind(refresh_token)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_password(
    pool: &PgPool,
    user_id: Uuid,
    new_password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = $1, updated_at = $2 WHERE id = $3")
        .bind(new_password_hash)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_account(
    pool: &PgPool,
    user_id: Uuid,
    full_name: &str,
    email: &str,
    username: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET full_name = $1, email = $2, username = $3, updated_at = $4
        WHERE id = $5
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(full_name)
    .bind(email.to_lowercase())
    .bind(username.to_lowercase())
    .bind(Utc::now())
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn record_login(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET last_login_at = $1, updated_at = $1 WHERE id = $2")
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Channel page: public profile with subscriber counters.
pub async fn channel_profile(
    pool: &PgPool,
    username: &str,
) -> Result<Option<ChannelProfile>, sqlx::Error> {
    sqlx::query_as::<_, ChannelProfile>(
        r#"
        SELECT
            u.id, u.username, u.full_name, u.email, u.avatar_url, u.cover_image_url,
            (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = u.id) AS subscriber_count,
            (SELECT COUNT(*) FROM subscriptions s WHERE s.subscriber_id = u.id) AS subscribed_to_count
        FROM users u
        WHERE u.username = $1
        "#,
    )
    .bind(username.to_lowercase())
    .fetch_optional(pool)
    .await
}
