/// Comment repository
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Comment, CommentWithAuthor};

pub async fn create_comment(
    pool: &PgPool,
    video_id: Uuid,
    owner_id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (id, video_id, owner_id, content, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING id, video_id, owner_id, content, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(video_id)
    .bind(owner_id)
    .bind(content)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        "SELECT id, video_id, owner_id, content, created_at, updated_at FROM comments WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Comments of a video, newest first, with author display fields.
pub async fn list_by_video(
    pool: &PgPool,
    video_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, CommentWithAuthor>(
        r#"
        SELECT
            c.id, c.video_id, c.content, c.created_at, c.updated_at,
            u.id AS owner_id, u.username AS owner_username, u.full_name AS owner_full_name,
            u.avatar_url AS owner_avatar_url
        FROM comments c
        JOIN users u ON u.id = c.owner_id
        WHERE c.video_id = $1
        ORDER BY c.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(video_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_by_video(pool: &PgPool, video_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE video_id = $1")
        .bind(video_id)
        .fetch_one(pool)
        .await
}

pub async fn update_content(
    pool: &PgPool,
    id: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET content = $1, updated_at = $2
        WHERE id = $3
        RETURNING id, video_id, owner_id, content, created_at, updated_at
        "#,
    )
    .bind(content)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn delete_comment(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
