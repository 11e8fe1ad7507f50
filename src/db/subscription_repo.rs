/// Subscription repository (subscriber -> channel relations)
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Subscription;

/// Insert a subscription. Returns `None` when the pair already exists —
/// the unique constraint absorbs the check-then-create race.
pub async fn create_subscription(
    pool: &PgPool,
    channel_id: Uuid,
    subscriber_id: Uuid,
) -> Result<Option<Subscription>, sqlx::Error> {
    sqlx::query_as::<_, Subscription>(
        r#"
        INSERT INTO subscriptions (id, channel_id, subscriber_id, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (channel_id, subscriber_id) DO NOTHING
        RETURNING id, channel_id, subscriber_id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(channel_id)
    .bind(subscriber_id)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
}

/// Delete a subscription. Returns the removed row, or `None` when absent.
pub async fn delete_subscription(
    pool: &PgPool,
    channel_id: Uuid,
    subscriber_id: Uuid,
) -> Result<Option<Subscription>, sqlx::Error> {
    sqlx::query_as::<_, Subscription>(
        r#"
        DELETE FROM subscriptions
        WHERE channel_id = $1 AND subscriber_id = $2
        RETURNING id, channel_id, subscriber_id, created_at
        "#,
    )
    .bind(channel_id)
    .bind(subscriber_id)
    .fetch_optional(pool)
    .await
}

pub async fn is_subscribed(
    pool: &PgPool,
    channel_id: Uuid,
    subscriber_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM subscriptions WHERE channel_id = $1 AND subscriber_id = $2)",
    )
    .bind(channel_id)
    .bind(subscriber_id)
    .fetch_one(pool)
    .await
}
