/// Comment handlers. Update and delete require ownership of the comment.
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::{comment_repo, video_repo};
use crate::error::AppError;
use crate::handlers::Pagination;
use crate::middleware::CurrentUser;
use crate::models::CommentWithAuthor;
use crate::response;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentContentRequest {
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListResponse {
    pub comments: Vec<CommentWithAuthor>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
}

/// GET /api/v1/comments/{videoId}
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    pagination: web::Query<Pagination>,
) -> Result<HttpResponse, AppError> {
    let video_id = path.into_inner();

    video_repo::find_by_id(&state.db, video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    let (page, limit, offset) = pagination.resolve();

    let (comments, total_count) = tokio::try_join!(
        comment_repo::list_by_video(&state.db, video_id, limit, offset),
        comment_repo::count_by_video(&state.db, video_id),
    )?;

    Ok(response::ok(
        CommentListResponse {
            comments,
            total_count,
            page,
            limit,
        },
        "Comments fetched successfully",
    ))
}

/// POST /api/v1/comments/create-comment/{videoId}
pub async fn create_comment(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    payload: web::Json<CommentContentRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let video = video_repo::find_by_id(&state.db, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    let comment = comment_repo::create_comment(&state.db, video.id, user.id, &payload.content).await?;

    Ok(response::created(comment, "Comment created successfully"))
}

/// PATCH /api/v1/comments/update-comment/{commentId}
pub async fn update_comment(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    payload: web::Json<CommentContentRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let comment = comment_repo::find_by_id(&state.db, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

    if comment.owner_id != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to update this comment".to_string(),
        ));
    }

    let updated = comment_repo::update_content(&state.db, comment.id, &payload.content).await?;

    Ok(response::ok(updated, "Comment updated successfully"))
}

/// DELETE /api/v1/comments/delete-comment/{commentId}
pub async fn delete_comment(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let comment = comment_repo::find_by_id(&state.db, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

    if comment.owner_id != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to delete this comment".to_string(),
        ));
    }

    comment_repo::delete_comment(&state.db, comment.id).await?;

    Ok(response::ok(
        Option::<()>::None,
        "Comment deleted successfully",
    ))
}
