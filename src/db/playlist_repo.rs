/// Playlist repository - playlists and their ordered video entries
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Playlist, PlaylistVideo, PublicUser};

pub async fn create_playlist(
    pool: &PgPool,
    owner_id: Uuid,
    title: &str,
    description: &str,
) -> Result<Option<Playlist>, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    // None = the owner already has a playlist with this title
    sqlx::query_as::<_, Playlist>(
        r#"
        INSERT INTO playlists (id, owner_id, title, description, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        ON CONFLICT (owner_id, title) DO NOTHING
        RETURNING id, owner_id, title, description, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(title)
    .bind(description)
    .bind(now)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Playlist>, sqlx::Error> {
    sqlx::query_as::<_, Playlist>(
        "SELECT id, owner_id, title, description, created_at, updated_at FROM playlists WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Playlist>, sqlx::Error> {
    sqlx::query_as::<_, Playlist>(
        r#"
        SELECT id, owner_id, title, description, created_at, updated_at
        FROM playlists
        WHERE owner_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Owner display fields for the playlist detail view.
pub async fn owner_details(pool: &PgPool, owner_id: Uuid) -> Result<Option<PublicUser>, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(
        r#"
        SELECT id, username, email, full_name, avatar_url, cover_image_url, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(owner_id)
    .fetch_optional(pool)
    .await
}

/// Videos of a playlist in insertion order, each with its owner's display
/// fields.
pub async fn list_videos(pool: &PgPool, playlist_id: Uuid) -> Result<Vec<PlaylistVideo>, sqlx::Error> {
    sqlx::query_as::<_, PlaylistVideo>(
        r#"
        SELECT
            v.id, v.title, v.description, v.video_url, v.thumbnail_url, v.duration,
            v.views, v.is_published, pv.position,
            u.id AS owner_id, u.username AS owner_username, u.full_name AS owner_full_name,
            u.avatar_url AS owner_avatar_url
        FROM playlist_videos pv
        JOIN videos v ON v.id = pv.video_id
        JOIN users u ON u.id = v.owner_id
        WHERE pv.playlist_id = $1
        ORDER BY pv.position ASC
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await
}

pub async fn contains_video(
    pool: &PgPool,
    playlist_id: Uuid,
    video_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM playlist_videos WHERE playlist_id = $1 AND video_id = $2)",
    )
    .bind(playlist_id)
    .bind(video_id)
    .fetch_one(pool)
    .await
}

/// Append a video at the end of the playlist. Returns false when the video
/// is already present.
pub async fn add_video(
    pool: &PgPool,
    playlist_id: Uuid,
    video_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO playlist_videos (playlist_id, video_id, position, added_at)
        VALUES (
            $1, $2,
            COALESCE((SELECT MAX(position) + 1 FROM playlist_videos WHERE playlist_id = $1), 0),
            $3
        )
        ON CONFLICT (playlist_id, video_id) DO NOTHING
        "#,
    )
    .bind(playlist_id)
    .bind(video_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a video from the playlist. Returns false when it was not there.
pub async fn remove_video(
    pool: &PgPool,
    playlist_id: Uuid,
    video_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM playlist_videos WHERE playlist_id = $1 AND video_id = $2",
    )
    .bind(playlist_id)
    .bind(video_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_playlist(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM playlists WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
