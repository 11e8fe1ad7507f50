//! Dashboard read-model handlers. Each overview runs its facet queries
//! concurrently and assembles one payload.

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::db::dashboard_repo;
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::{ChannelViews, Playlist, PlaylistViews, PublicUser, Video};
use crate::response;
use crate::AppState;

const OVERVIEW_LIMIT: i64 = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOverview {
    pub total_users: i64,
    pub recent_users: Vec<PublicUser>,
    pub top_users: Vec<ChannelViews>,
    pub active_users: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOverview {
    pub total_videos: i64,
    pub recent_videos: Vec<Video>,
    pub top_videos: Vec<Video>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistOverview {
    pub total_playlists: i64,
    pub recent_playlists: Vec<Playlist>,
    pub top_playlists: Vec<PlaylistViews>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub total_videos: i64,
    pub total_views: i64,
    pub total_likes: i64,
    pub average_views: f64,
    pub average_likes: f64,
}

/// GET /api/v1/dashboard/overview
pub async fn user_overview(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let (total_users, recent_users, top_users, active_users) = tokio::try_join!(
        dashboard_repo::count_users(&state.db),
        dashboard_repo::recent_users(&state.db, OVERVIEW_LIMIT),
        dashboard_repo::top_channels_by_views(&state.db, OVERVIEW_LIMIT),
        dashboard_repo::count_active_users(&state.db),
    )?;

    Ok(response::ok(
        UserOverview {
            total_users,
            recent_users,
            top_users,
            active_users,
        },
        "User overview retrieved successfully",
    ))
}

/// GET /api/v1/dashboard/videos
pub async fn video_overview(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let (total_videos, recent_videos, top_videos) = tokio::try_join!(
        dashboard_repo::count_videos_by_owner(&state.db, user.id),
        dashboard_repo::recent_videos_by_owner(&state.db, user.id, OVERVIEW_LIMIT),
        dashboard_repo::top_videos_by_owner(&state.db, user.id, OVERVIEW_LIMIT),
    )?;

    Ok(response::ok(
        VideoOverview {
            total_videos,
            recent_videos,
            top_videos,
        },
        "Video overview retrieved successfully",
    ))
}

/// GET /api/v1/dashboard/playlists
pub async fn playlist_overview(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let (total_playlists, recent_playlists, top_playlists) = tokio::try_join!(
        dashboard_repo::count_playlists_by_owner(&state.db, user.id),
        dashboard_repo::recent_playlists_by_owner(&state.db, user.id, OVERVIEW_LIMIT),
        dashboard_repo::top_playlists_by_views(&state.db, user.id, OVERVIEW_LIMIT),
    )?;

    Ok(response::ok(
        PlaylistOverview {
            total_playlists,
            recent_playlists,
            top_playlists,
        },
        "Playlist overview retrieved successfully",
    ))
}

/// GET /api/v1/dashboard/engagement
pub async fn engagement_metrics(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let (total_videos, total_views, total_likes) = tokio::try_join!(
        dashboard_repo::count_videos_by_owner(&state.db, user.id),
        dashboard_repo::total_views_by_owner(&state.db, user.id),
        dashboard_repo::total_video_likes_by_owner(&state.db, user.id),
    )?;

    let (average_views, average_likes) = if total_videos > 0 {
        (
            total_views as f64 / total_videos as f64,
            total_likes as f64 / total_videos as f64,
        )
    } else {
        (0.0, 0.0)
    };

    Ok(response::ok(
        EngagementMetrics {
            total_videos,
            total_views,
            total_likes,
            average_views,
            average_likes,
        },
        "Engagement metrics retrieved successfully",
    ))
}
