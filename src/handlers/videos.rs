/// Video handlers: listing, CRUD with ownership checks, publish toggle,
/// view recording.
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::db::video_repo;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::VideoWithOwner;
use crate::response;
use crate::AppState;

// ============================================
// Request/Response Structs
// ============================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(url)]
    pub video_url: String,

    #[validate(url)]
    pub thumbnail_url: String,

    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1))]
    pub description: String,

    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListVideosQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub query: Option<String>,
    pub sort_by: Option<String>,
    pub sort_type: Option<String>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListResponse {
    pub videos: Vec<VideoWithOwner>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
}

// ============================================
// Handler Functions
// ============================================

/// POST /api/v1/videos/upload-video
///
/// The media files are already in object storage; this records metadata and
/// asks the probing collaborator for the duration.
pub async fn create_video(
    state: web::Data<AppState>,
    user: CurrentUser,
    payload: web::Json<CreateVideoRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if video_repo::title_exists(&state.db, &payload.title).await? {
        return Err(AppError::Conflict(
            "A video with this title already exists".to_string(),
        ));
    }

    let duration = state.media.probe_duration(&payload.video_url).await?;

    let video = video_repo::create_video(
        &state.db,
        user.id,
        &payload.title,
        &payload.description,
        &payload.video_url,
        &payload.thumbnail_url,
        duration,
        payload.is_published.unwrap_or(true),
    )
    .await?;

    tracing::info!("Video created: {} by {}", video.id, user.username);

    Ok(response::created(video, "Video uploaded successfully"))
}

/// GET /api/v1/videos
pub async fn list_videos(
    state: web::Data<AppState>,
    query: web::Query<ListVideosQuery>,
) -> Result<HttpResponse, AppError> {
    let pagination = super::Pagination {
        page: query.page,
        limit: query.limit,
    };
    let (page, limit, offset) = pagination.resolve();

    let (videos, total_count) = tokio::try_join!(
        video_repo::list_published(
            &state.db,
            query.query.as_deref(),
            query.user_id,
            query.sort_by.as_deref(),
            query.sort_type.as_deref(),
            limit,
            offset,
        ),
        video_repo::count_published(&state.db, query.query.as_deref(), query.user_id),
    )?;

    Ok(response::ok(
        VideoListResponse {
            videos,
            total_count,
            page,
            limit,
        },
        "Videos fetched successfully",
    ))
}

/// GET /api/v1/videos/{id}
pub async fn get_video(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let video = video_repo::find_published_with_owner(&state.db, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    Ok(response::ok(video, "Video fetched successfully"))
}

/// PUT /api/v1/videos/update-video-details/{id}
pub async fn update_video(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateVideoRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let video = video_repo::find_by_id(&state.db, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    if video.owner_id != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to update this video".to_string(),
        ));
    }

    let updated = video_repo::update_video(
        &state.db,
        video.id,
        &payload.title,
        &payload.description,
        payload.is_published.unwrap_or(video.is_published),
    )
    .await?;

    Ok(response::ok(updated, "Video updated successfully"))
}

/// DELETE /api/v1/videos/delete-video/{id}
pub async fn delete_video(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let video = video_repo::find_by_id(&state.db, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    if video.owner_id != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to delete this video".to_string(),
        ));
    }

    // The asset lives in external storage; drop it before the row so a
    // failed storage call leaves the record visible.
    state.media.delete_asset(&video.video_url).await?;

    video_repo::delete_video(&state.db, video.id).await?;

    tracing::info!("Video deleted: {}", video.id);

    Ok(response::ok(Option::<()>::None, "Video deleted successfully"))
}

/// PUT /api/v1/videos/toggle-publish-video/{id}
pub async fn toggle_publish(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let video = video_repo::find_by_id(&state.db, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    if video.owner_id != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to update this video".to_string(),
        ));
    }

    let is_published = !video.is_published;
    video_repo::set_published(&state.db, video.id, is_published).await?;

    Ok(response::ok(
        json!({ "isPublished": is_published }),
        "Video published status updated successfully",
    ))
}

/// POST /api/v1/videos/view-video/{id}
///
/// Bumps the view counter and records the video in the viewer's watch
/// history.
pub async fn record_view(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let video = video_repo::find_by_id(&state.db, path.into_inner())
        .await?
        .filter(|v| v.is_published)
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    let views = video_repo::record_view(&state.db, video.id, user.id).await?;

    Ok(response::ok(
        json!({ "views": views }),
        "View recorded successfully",
    ))
}
