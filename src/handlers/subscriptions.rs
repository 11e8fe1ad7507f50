/// Subscription handlers: subscribe/unsubscribe to a channel and check the
/// relation. Subscribing twice is benign; unsubscribing from nothing is a
/// 404.
use actix_web::{web, HttpResponse};
use serde_json::json;
use uuid::Uuid;

use crate::db::{subscription_repo, user_repo};
use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::response;
use crate::AppState;

/// POST /api/v1/subscriptions/{channelId}
pub async fn subscribe(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let channel_id = path.into_inner();

    if channel_id == user.id {
        return Err(AppError::BadRequest(
            "Cannot subscribe to your own channel".to_string(),
        ));
    }

    user_repo::find_by_id(&state.db, channel_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Channel does not exist".to_string()))?;

    let created = subscription_repo::create_subscription(&state.db, channel_id, user.id).await?;

    let message = if created.is_some() {
        "Subscribed successfully"
    } else {
        "You are already subscribed to this channel"
    };

    Ok(response::ok(json!({ "response": true }), message))
}

/// DELETE /api/v1/subscriptions/unsubscribe/{channelId}
pub async fn unsubscribe(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let channel_id = path.into_inner();

    subscription_repo::delete_subscription(&state.db, channel_id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Subscription not found".to_string()))?;

    Ok(response::ok(
        json!({ "response": true }),
        "Unsubscribed successfully",
    ))
}

/// GET /api/v1/subscriptions/checkSubscription/{channelId}
pub async fn check_subscription(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let channel_id = path.into_inner();

    let subscribed = subscription_repo::is_subscribed(&state.db, channel_id, user.id).await?;

    Ok(response::ok(
        json!({ "response": subscribed }),
        "Subscription status checked",
    ))
}
