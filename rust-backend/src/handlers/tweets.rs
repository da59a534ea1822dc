use actix_web::{delete, get, patch, post, web, HttpResponse};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::ContentRequest;
use crate::response::{empty, ApiResponse};
use crate::services::{parse_id, tweets};
use crate::AppState;

#[post("/api/v1/tweets")]
pub async fn create_tweet(
    req: web::Json<ContentRequest>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let tweet = tweets::create_tweet(state.store.as_ref(), user.id, req.into_inner().content).await?;
    Ok(ApiResponse::created(tweet, "Tweet created successfully"))
}

#[get("/api/v1/tweets/user/{user_id}")]
pub async fn get_user_tweets(
    path: web::Path<String>,
    state: web::Data<AppState>,
    _user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path, "user")?;
    let list = tweets::user_tweets(state.store.as_ref(), user_id).await?;
    Ok(ApiResponse::ok(list, "Tweets fetched successfully"))
}

#[patch("/api/v1/tweets/{tweet_id}")]
pub async fn update_tweet(
    path: web::Path<String>,
    req: web::Json<ContentRequest>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let tweet_id = parse_id(&path, "tweet")?;
    let tweet = tweets::update_tweet(state.store.as_ref(), user.id, tweet_id, req.into_inner().content).await?;
    Ok(ApiResponse::ok(tweet, "Tweet updated successfully"))
}

#[delete("/api/v1/tweets/{tweet_id}")]
pub async fn delete_tweet(
    path: web::Path<String>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let tweet_id = parse_id(&path, "tweet")?;
    tweets::delete_tweet(state.store.as_ref(), user.id, tweet_id).await?;
    Ok(ApiResponse::ok(empty(), "Tweet deleted successfully"))
}
