//! Dashboard read-models: each overview facet is an independent SQL
//! statement; handlers join them concurrently.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ChannelViews, Playlist, PlaylistViews, PublicUser, Video};

pub async fn count_users(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}

pub async fn recent_users(pool: &PgPool, limit: i64) -> Result<Vec<PublicUser>, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(
        r#"
        SELECT id, username, email, full_name, avatar_url, cover_image_url, created_at, updated_at
        FROM users
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Channels ranked by the total views of their videos. Users without any
/// video do not appear in the ranking.
pub async fn top_channels_by_views(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<ChannelViews>, sqlx::Error> {
    sqlx::query_as::<_, ChannelViews>(
        r#"
        SELECT u.id, u.username, u.full_name, u.avatar_url, SUM(v.views)::BIGINT AS total_views
        FROM users u
        JOIN videos v ON v.owner_id = u.id
        GROUP BY u.id, u.username, u.full_name, u.avatar_url
        ORDER BY total_views DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Users who logged in within the last 30 days.
pub async fn count_active_users(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let cutoff = Utc::now() - Duration::days(30);

    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE last_login_at >= $1")
        .bind(cutoff)
        .fetch_one(pool)
        .await
}

pub async fn count_videos_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM videos WHERE owner_id = $1")
        .bind(owner_id)
        .fetch_one(pool)
        .await
}

pub async fn recent_videos_by_owner(
    pool: &PgPool,
    owner_id: Uuid,
    limit: i64,
) -> Result<Vec<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        r#"
        SELECT id, owner_id, title, description, video_url, thumbnail_url, duration, views, is_published, created_at, updated_at
        FROM videos
        WHERE owner_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(owner_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn top_videos_by_owner(
    pool: &PgPool,
    owner_id: Uuid,
    limit: i64,
) -> Result<Vec<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        r#"
        SELECT id, owner_id, title, description, video_url, thumbnail_url, duration, views, is_published, created_at, updated_at
        FROM videos
        WHERE owner_id = $1
        ORDER BY views DESC
        LIMIT $2
        "#,
    )
    .bind(owner_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn count_playlists_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM playlists WHERE owner_id = $1")
        .bind(owner_id)
        .fetch_one(pool)
        .await
}

pub async fn recent_playlists_by_owner(
    pool: &PgPool,
    owner_id: Uuid,
    limit: i64,
) -> Result<Vec<Playlist>, sqlx::Error> {
    sqlx::query_as::<_, Playlist>(
        r#"
        SELECT id, owner_id, title, description, created_at, updated_at
        FROM playlists
        WHERE owner_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(owner_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Playlists ranked by the accumulated views of their videos.
pub async fn top_playlists_by_views(
    pool: &PgPool,
    owner_id: Uuid,
    limit: i64,
) -> Result<Vec<PlaylistViews>, sqlx::Error> {
    sqlx::query_as::<_, PlaylistViews>(
        r#"
        SELECT p.id, p.title, SUM(v.views)::BIGINT AS total_views
        FROM playlists p
        JOIN playlist_videos pv ON pv.playlist_id = p.id
        JOIN videos v ON v.id = pv.video_id
        WHERE p.owner_id = $1
        GROUP BY p.id, p.title
        ORDER BY total_views DESC
        LIMIT $2
        "#,
    )
    .bind(owner_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn total_views_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(views), 0)::BIGINT FROM videos WHERE owner_id = $1",
    )
    .bind(owner_id)
    .fetch_one(pool)
    .await
}

/// Likes received across all of the owner's videos.
pub async fn total_video_likes_by_owner(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM likes l
        JOIN videos v ON v.id = l.video_id
        WHERE v.owner_id = $1
        "#,
    )
    .bind(owner_id)
    .fetch_one(pool)
    .await
}
