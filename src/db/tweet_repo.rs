/// Tweet repository
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Tweet;

pub async fn create_tweet(
    pool: &PgPool,
    owner_id: Uuid,
    content: &str,
) -> Result<Tweet, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Tweet>(
        r#"
        INSERT INTO tweets (id, owner_id, content, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $4)
        RETURNING id, owner_id, content, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(content)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Tweet>, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(
        "SELECT id, owner_id, content, created_at, updated_at FROM tweets WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_tweets(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Tweet>, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(
        r#"
        SELECT id, owner_id, content, created_at, updated_at
        FROM tweets
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_tweets(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tweets")
        .fetch_one(pool)
        .await
}

pub async fn update_content(pool: &PgPool, id: Uuid, content: &str) -> Result<Tweet, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(
        r#"
        UPDATE tweets
        SET content = $1, updated_at = $2
        WHERE id = $3
        RETURNING id, owner_id, content, created_at, updated_at
        "#,
    )
    .bind(content)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn delete_tweet(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM tweets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
