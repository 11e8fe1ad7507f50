/// Tweet handlers. Update and delete require ownership of the tweet.
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::tweet_repo;
use crate::error::AppError;
use crate::handlers::Pagination;
use crate::middleware::CurrentUser;
use crate::models::Tweet;
use crate::response;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TweetContentRequest {
    #[validate(length(min = 1, max = 500))]
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetListResponse {
    pub tweets: Vec<Tweet>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
}

/// GET /api/v1/tweets
pub async fn list_tweets(
    state: web::Data<AppState>,
    pagination: web::Query<Pagination>,
) -> Result<HttpResponse, AppError> {
    let (page, limit, offset) = pagination.resolve();

    let (tweets, total_count) = tokio::try_join!(
        tweet_repo::list_tweets(&state.db, limit, offset),
        tweet_repo::count_tweets(&state.db),
    )?;

    Ok(response::ok(
        TweetListResponse {
            tweets,
            total_count,
            page,
            limit,
        },
        "Tweets fetched successfully",
    ))
}

/// POST /api/v1/tweets/create-tweet
pub async fn create_tweet(
    state: web::Data<AppState>,
    user: CurrentUser,
    payload: web::Json<TweetContentRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tweet = tweet_repo::create_tweet(&state.db, user.id, &payload.content).await?;

    Ok(response::created(tweet, "Tweet created successfully"))
}

/// PATCH /api/v1/tweets/update-tweet/{tweetId}
pub async fn update_tweet(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    payload: web::Json<TweetContentRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tweet = tweet_repo::find_by_id(&state.db, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Tweet not found".to_string()))?;

    if tweet.owner_id != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to update this tweet".to_string(),
        ));
    }

    let updated = tweet_repo::update_content(&state.db, tweet.id, &payload.content).await?;

    Ok(response::ok(updated, "Tweet updated successfully"))
}

/// DELETE /api/v1/tweets/delete-tweet/{tweetId}
pub async fn delete_tweet(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let tweet = tweet_repo::find_by_id(&state.db, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Tweet not found".to_string()))?;

    if tweet.owner_id != user.id {
        return Err(AppError::Forbidden(
            "You are not authorized to delete this tweet".to_string(),
        ));
    }

    tweet_repo::delete_tweet(&state.db, tweet.id).await?;

    Ok(response::ok(Option::<()>::None, "Tweet deleted successfully"))
}
