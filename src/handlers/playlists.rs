/// Playlist handlers: CRUD plus video membership, with ownership checks on
/// every mutation.
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::{playlist_repo, video_repo};
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::{Playlist, PlaylistVideo, PublicUser};
use crate::response;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1))]
    pub description: String,

    pub video_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistVideoRequest {
    pub video_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDetail {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub owner: Option<PublicUser>,
    pub videos: Vec<PlaylistVideo>,
}

/// POST /api/v1/playlists
pub async fn create_playlist(
    state: web::Data<AppState>,
    user: CurrentUser,
    payload: web::Json<CreatePlaylistRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if let Some(video_id) = payload.video_id {
        video_repo::find_by_id(&state.db, video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;
    }

    let playlist =
        playlist_repo::create_playlist(&state.db, user.id, &payload.name, &payload.description)
            .await?
            .ok_or_else(|| AppError::Conflict("Playlist already exists".to_string()))?;

    if let Some(video_id) = payload.video_id {
        playlist_repo::add_video(&state.db, playlist.id, video_id).await?;
    }

    Ok(response::created(playlist, "Playlist created successfully"))
}

/// GET /api/v1/playlists/get-playlist/{playlistId}
pub async fn get_playlist(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let playlist = playlist_repo::find_by_id(&state.db, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Playlist not found".to_string()))?;

    let (owner, videos) = tokio::try_join!(
        playlist_repo::owner_details(&state.db, playlist.owner_id),
        playlist_repo::list_videos(&state.db, playlist.id),
    )?;

    Ok(response::ok(
        PlaylistDetail {
            playlist,
            owner,
            videos,
        },
        "Playlist fetched successfully",
    ))
}

/// GET /api/v1/playlists
pub async fn list_playlists(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let playlists = playlist_repo::list_by_owner(&state.db, user.id).await?;

    Ok(response::ok(playlists, "Playlists fetched successfully"))
}

/// Load a playlist and enforce that the caller owns it.
async fn owned_playlist(
    state: &AppState,
    playlist_id: Uuid,
    user: &CurrentUser,
    action: &str,
) -> Result<Playlist, AppError> {
    let playlist = playlist_repo::find_by_id(&state.db, playlist_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playlist not found".to_string()))?;

    if playlist.owner_id != user.id {
        return Err(AppError::Forbidden(format!(
            "You are not authorized to {action} this playlist"
        )));
    }

    Ok(playlist)
}

/// PATCH /api/v1/playlists/add-videos/{playlistId}
pub async fn add_video(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    payload: web::Json<PlaylistVideoRequest>,
) -> Result<HttpResponse, AppError> {
    let playlist = owned_playlist(&state, path.into_inner(), &user, "modify").await?;

    video_repo::find_by_id(&state.db, payload.video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".to_string()))?;

    let added = playlist_repo::add_video(&state.db, playlist.id, payload.video_id).await?;
    if !added {
        return Err(AppError::BadRequest(
            "Video already exists in playlist".to_string(),
        ));
    }

    let videos = playlist_repo::list_videos(&state.db, playlist.id).await?;

    Ok(response::ok(
        PlaylistDetail {
            playlist,
            owner: None,
            videos,
        },
        "Video added to playlist successfully",
    ))
}

/// DELETE /api/v1/playlists/delete-videos/{playlistId}
pub async fn remove_video(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    payload: web::Json<PlaylistVideoRequest>,
) -> Result<HttpResponse, AppError> {
    let playlist = owned_playlist(&state, path.into_inner(), &user, "modify").await?;

    let removed = playlist_repo::remove_video(&state.db, playlist.id, payload.video_id).await?;
    if !removed {
        return Err(AppError::BadRequest(
            "Video does not exist in playlist".to_string(),
        ));
    }

    let videos = playlist_repo::list_videos(&state.db, playlist.id).await?;

    Ok(response::ok(
        PlaylistDetail {
            playlist,
            owner: None,
            videos,
        },
        "Video removed from playlist successfully",
    ))
}

/// DELETE /api/v1/playlists/delete-playlist/{playlistId}
pub async fn delete_playlist(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let playlist = owned_playlist(&state, path.into_inner(), &user, "delete").await?;

    playlist_repo::delete_playlist(&state.db, playlist.id).await?;

    Ok(response::ok(
        Option::<()>::None,
        "Playlist deleted successfully",
    ))
}
