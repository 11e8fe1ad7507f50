/// User and session handlers: registration, login, token rotation, logout,
/// password/account updates, channel profile and watch history.
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::{subscription_repo, user_repo, video_repo};
use crate::error::AppError;
use crate::handlers::Pagination;
use crate::middleware::{CurrentUser, MaybeUser};
use crate::models::{PublicUser, WatchHistoryEntry};
use crate::response;
use crate::validators;
use crate::AppState;

// ============================================
// Request/Response Structs
// ============================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 30))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(length(min = 8))]
    pub password: String,

    pub avatar_url: Option<String>,
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenBody {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenQuery {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub old_password: String,

    #[validate(length(min = 1))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 3, max = 30))]
    pub username: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user: PublicUser,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryData {
    pub watch_history: Vec<WatchHistoryEntry>,
    pub page: i64,
    pub limit: i64,
}

// ============================================
// Cookie helpers
// ============================================

fn auth_cookie(name: &str, value: String, max_age_secs: i64) -> Cookie<'_> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(CookieDuration::seconds(max_age_secs))
        .finish()
}

fn removal_cookie(name: &str) -> Cookie<'_> {
    let mut cookie = Cookie::build(name, "")
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .finish();
    cookie.make_removal();
    cookie
}

// ============================================
// Handler Functions
// ============================================

/// POST /api/v1/users/register
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if !validators::validate_username(&payload.username) {
        return Err(AppError::BadRequest(
            "Username may only contain letters, digits, '_' and '-'".to_string(),
        ));
    }

    if user_repo::identity_exists(&state.db, &payload.username, &payload.email, None).await? {
        return Err(AppError::Conflict(
            "User with this username or email already exists".to_string(),
        ));
    }

    let password_hash = crate::security::password::hash_password(&payload.password)?;

    let user = user_repo::create_user(
        &state.db,
        &payload.username,
        &payload.email,
        &payload.full_name,
        &password_hash,
        payload.avatar_url.as_deref(),
        payload.cover_image_url.as_deref(),
    )
    .await?;

    tracing::info!("User registered: {}", user.username);

    Ok(response::created(
        PublicUser::from(user),
        "User registered successfully",
    ))
}

/// POST /api/v1/users/login
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = match (&payload.email, &payload.username) {
        (Some(email), _) if !email.is_empty() => user_repo::find_by_email(&state.db, email).await?,
        (_, Some(username)) if !username.is_empty() => {
            user_repo::find_by_username(&state.db, username).await?
        }
        _ => {
            return Err(AppError::BadRequest(
                "Username or email is required".to_string(),
            ))
        }
    };

    let user = user.ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    if !crate::security::password::verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::Unauthorized(
            "Invalid user credentials".to_string(),
        ));
    }

    let pair = state.tokens.issue(&user).await?;
    user_repo::record_login(&state.db, user.id).await?;

    tracing::info!("User logged in: {}", user.username);

    let mut builder = HttpResponse::Ok();
    builder.cookie(auth_cookie(
        "accessToken",
        pair.access_token.clone(),
        state.tokens.access_ttl_secs(),
    ));
    builder.cookie(auth_cookie(
        "refreshToken",
        pair.refresh_token.clone(),
        state.tokens.refresh_ttl_secs(),
    ));

    Ok(response::with_builder(
        builder,
        StatusCode::OK,
        LoginData {
            user: PublicUser::from(user),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        },
        "User logged in successfully",
    ))
}

/// POST /api/v1/users/logout
pub async fn logout(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    state.tokens.revoke(user.id).await?;

    tracing::info!("User logged out: {}", user.username);

    let mut builder = HttpResponse::Ok();
    builder.cookie(removal_cookie("accessToken"));
    builder.cookie(removal_cookie("refreshToken"));

    Ok(response::with_builder(
        builder,
        StatusCode::OK,
        Option::<()>::None,
        "User logged out successfully",
    ))
}

/// POST /api/v1/users/refresh-token
///
/// The refresh token is read from the cookie, falling back to the request
/// body and then the query string.
pub async fn refresh_token(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: Option<web::Json<RefreshTokenBody>>,
    query: web::Query<RefreshTokenQuery>,
) -> Result<HttpResponse, AppError> {
    let presented = req
        .cookie("refreshToken")
        .map(|c| c.value().to_string())
        .or_else(|| body.as_ref().and_then(|b| b.refresh_token.clone()))
        .or_else(|| query.refresh_token.clone())
        .ok_or_else(|| AppError::Unauthorized("Unauthorized request".to_string()))?;

    let (pair, user) = state.tokens.rotate(&presented).await?;

    tracing::debug!("Token rotated for user: {}", user.id);

    let mut builder = HttpResponse::Ok();
    builder.cookie(auth_cookie(
        "accessToken",
        pair.access_token.clone(),
        state.tokens.access_ttl_secs(),
    ));
    builder.cookie(auth_cookie(
        "refreshToken",
        pair.refresh_token.clone(),
        state.tokens.refresh_ttl_secs(),
    ));

    Ok(response::with_builder(
        builder,
        StatusCode::OK,
        pair,
        "Access token refreshed successfully",
    ))
}

/// POST /api/v1/users/change-password
pub async fn change_password(
    state: web::Data<AppState>,
    user: CurrentUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if payload.old_password == payload.new_password {
        return Err(AppError::BadRequest(
            "New password cannot be same as old password".to_string(),
        ));
    }

    if payload.new_password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    let lowered = payload.new_password.to_lowercase();
    if lowered.contains(&user.username.to_lowercase())
        || lowered.contains(&user.email.to_lowercase())
        || user.username.to_lowercase().contains(&lowered)
    {
        return Err(AppError::BadRequest(
            "Password cannot be similar to username or email".to_string(),
        ));
    }

    let record = user_repo::find_by_id(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !crate::security::password::verify_password(&payload.old_password, &record.password_hash)? {
        return Err(AppError::Unauthorized("Invalid old password".to_string()));
    }

    let new_hash = crate::security::password::hash_password(&payload.new_password)?;
    user_repo::update_password(&state.db, user.id, &new_hash).await?;

    Ok(response::ok(
        Option::<()>::None,
        "Password changed successfully",
    ))
}

/// GET /api/v1/users/me
pub async fn current_user(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let record = user_repo::find_by_id(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(response::ok(
        PublicUser::from(record),
        "User details fetched successfully",
    ))
}

/// PATCH /api/v1/users/update-account
pub async fn update_account(
    state: web::Data<AppState>,
    user: CurrentUser,
    payload: web::Json<UpdateAccountRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if !validators::validate_username(&payload.username) {
        return Err(AppError::BadRequest(
            "Username may only contain letters, digits, '_' and '-'".to_string(),
        ));
    }

    if user_repo::identity_exists(&state.db, &payload.username, &payload.email, Some(user.id))
        .await?
    {
        return Err(AppError::Conflict(
            "Username or email already in use".to_string(),
        ));
    }

    let updated = user_repo::update_account(
        &state.db,
        user.id,
        &payload.full_name,
        &payload.email,
        &payload.username,
    )
    .await?;

    Ok(response::ok(
        PublicUser::from(updated),
        "Account details updated successfully",
    ))
}

/// GET /api/v1/users/channel/{username}
pub async fn channel_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    viewer: MaybeUser,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();

    if username.trim().is_empty() {
        return Err(AppError::BadRequest("Username is missing".to_string()));
    }

    let mut channel = user_repo::channel_profile(&state.db, &username)
        .await?
        .ok_or_else(|| AppError::NotFound("Channel does not exist".to_string()))?;

    if let MaybeUser(Some(viewer)) = viewer {
        channel.is_subscribed =
            subscription_repo::is_subscribed(&state.db, channel.id, viewer.id).await?;
    }

    Ok(response::ok(
        channel,
        "Channel profile fetched successfully",
    ))
}

/// GET /api/v1/users/watch-history
pub async fn watch_history(
    state: web::Data<AppState>,
    user: CurrentUser,
    pagination: web::Query<Pagination>,
) -> Result<HttpResponse, AppError> {
    let (page, limit, offset) = pagination.resolve();

    let entries = video_repo::watch_history(&state.db, user.id, limit, offset).await?;

    Ok(response::ok(
        WatchHistoryData {
            watch_history: entries,
            page,
            limit,
        },
        "Watch history fetched successfully",
    ))
}
