/// Like repository - one relation table covering videos, comments and tweets
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Like;

/// The entity a like points at. Exactly one target per like row, enforced
/// by a table CHECK constraint and per-target unique indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeTarget {
    Video(Uuid),
    Comment(Uuid),
    Tweet(Uuid),
}

impl LikeTarget {
    fn column(&self) -> &'static str {
        match self {
            LikeTarget::Video(_) => "video_id",
            LikeTarget::Comment(_) => "comment_id",
            LikeTarget::Tweet(_) => "tweet_id",
        }
    }

    fn id(&self) -> Uuid {
        match self {
            LikeTarget::Video(id) | LikeTarget::Comment(id) | LikeTarget::Tweet(id) => *id,
        }
    }
}

/// Insert a like. Returns `None` when the (target, liker) pair already
/// exists — the unique index absorbs the check-then-create race.
pub async fn create_like(
    pool: &PgPool,
    target: LikeTarget,
    liked_by: Uuid,
) -> Result<Option<Like>, sqlx::Error> {
    let column = target.column();

    sqlx::query_as::<_, Like>(&format!(
        r#"
        INSERT INTO likes (id, {column}, liked_by, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT DO NOTHING
        RETURNING id, video_id, comment_id, tweet_id, liked_by, created_at
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(target.id())
    .bind(liked_by)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
}

/// Delete a like. Returns the removed row, or `None` when it never existed.
pub async fn delete_like(
    pool: &PgPool,
    target: LikeTarget,
    liked_by: Uuid,
) -> Result<Option<Like>, sqlx::Error> {
    let column = target.column();

    sqlx::query_as::<_, Like>(&format!(
        r#"
        DELETE FROM likes
        WHERE {column} = $1 AND liked_by = $2
        RETURNING id, video_id, comment_id, tweet_id, liked_by, created_at
        "#
    ))
    .bind(target.id())
    .bind(liked_by)
    .fetch_optional(pool)
    .await
}

pub async fn count_likes(pool: &PgPool, target: LikeTarget) -> Result<i64, sqlx::Error> {
    let column = target.column();

    sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM likes WHERE {column} = $1"
    ))
    .bind(target.id())
    .fetch_one(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_column_mapping() {
        let id = Uuid::new_v4();
        assert_eq!(LikeTarget::Video(id).column(), "video_id");
        assert_eq!(LikeTarget::Comment(id).column(), "comment_id");
        assert_eq!(LikeTarget::Tweet(id).column(), "tweet_id");
        assert_eq!(LikeTarget::Video(id).id(), id);
    }
}
