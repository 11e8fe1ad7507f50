/// Like handlers. A like targets exactly one of a video, a comment or a
/// tweet; duplicates are rejected with a conflict and removing a
/// non-existent like is a 404.
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db::like_repo::{self, LikeTarget};
use crate::db::{comment_repo, tweet_repo, video_repo};
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::response;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeTargetRequest {
    pub video_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub tweet_id: Option<Uuid>,
}

impl LikeTargetRequest {
    fn target(&self) -> Result<LikeTarget, AppError> {
        if let Some(id) = self.video_id {
            Ok(LikeTarget::Video(id))
        } else if let Some(id) = self.comment_id {
            Ok(LikeTarget::Comment(id))
        } else if let Some(id) = self.tweet_id {
            Ok(LikeTarget::Tweet(id))
        } else {
            Err(AppError::BadRequest("Invalid request".to_string()))
        }
    }
}

fn target_noun(target: LikeTarget) -> &'static str {
    match target {
        LikeTarget::Video(_) => "Video",
        LikeTarget::Comment(_) => "Comment",
        LikeTarget::Tweet(_) => "Tweet",
    }
}

/// 404 unless the liked entity exists.
async fn ensure_target_exists(state: &AppState, target: LikeTarget) -> Result<(), AppError> {
    let exists = match target {
        LikeTarget::Video(id) => video_repo::find_by_id(&state.db, id).await?.is_some(),
        LikeTarget::Comment(id) => comment_repo::find_by_id(&state.db, id).await?.is_some(),
        LikeTarget::Tweet(id) => tweet_repo::find_by_id(&state.db, id).await?.is_some(),
    };

    if exists {
        Ok(())
    } else {
        Err(AppError::NotFound(format!(
            "{} not found",
            target_noun(target)
        )))
    }
}

/// POST /api/v1/likes/like
pub async fn like(
    state: web::Data<AppState>,
    user: CurrentUser,
    payload: web::Json<LikeTargetRequest>,
) -> Result<HttpResponse, AppError> {
    let target = payload.target()?;

    ensure_target_exists(&state, target).await?;

    let like = like_repo::create_like(&state.db, target, user.id)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("{} already liked", target_noun(target))))?;

    Ok(response::ok(
        json!({ "like": like }),
        format!("{} liked successfully", target_noun(target)),
    ))
}

/// POST /api/v1/likes
pub async fn like_count(
    state: web::Data<AppState>,
    payload: web::Json<LikeTargetRequest>,
) -> Result<HttpResponse, AppError> {
    let target = payload.target()?;

    ensure_target_exists(&state, target).await?;

    let likes = like_repo::count_likes(&state.db, target).await?;

    Ok(response::ok(
        json!({ "likes": likes }),
        "Likes fetched successfully",
    ))
}

/// DELETE /api/v1/likes/remove-like
pub async fn remove_like(
    state: web::Data<AppState>,
    user: CurrentUser,
    payload: web::Json<LikeTargetRequest>,
) -> Result<HttpResponse, AppError> {
    let target = payload.target()?;

    let like = like_repo::delete_like(&state.db, target, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Like not found".to_string()))?;

    Ok(response::ok(
        json!({ "like": like }),
        format!("{} like removed successfully", target_noun(target)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_picks_first_present() {
        let video = Uuid::new_v4();
        let tweet = Uuid::new_v4();

        let req = LikeTargetRequest {
            video_id: Some(video),
            comment_id: None,
            tweet_id: Some(tweet),
        };
        assert_eq!(req.target().unwrap(), LikeTarget::Video(video));

        let req = LikeTargetRequest {
            video_id: None,
            comment_id: None,
            tweet_id: Some(tweet),
        };
        assert_eq!(req.target().unwrap(), LikeTarget::Tweet(tweet));
    }

    #[test]
    fn test_empty_target_rejected() {
        let req = LikeTargetRequest {
            video_id: None,
            comment_id: None,
            tweet_id: None,
        };
        assert!(req.target().is_err());
    }
}
