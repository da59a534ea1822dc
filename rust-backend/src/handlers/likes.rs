use actix_web::{get, post, web, HttpResponse};

use super::toggled_response;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::LikeTarget;
use crate::response::ApiResponse;
use crate::services::{likes, parse_id};
use crate::AppState;

#[post("/api/v1/likes/toggle/v/{video_id}")]
pub async fn toggle_video_like(
    path: web::Path<String>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let target = LikeTarget::Video(parse_id(&path, "video")?);
    let outcome = likes::toggle_like(state.store.as_ref(), user.id, target).await?;
    Ok(toggled_response(outcome, "Video liked successfully", "Video unliked successfully"))
}

#[post("/api/v1/likes/toggle/c/{comment_id}")]
pub async fn toggle_comment_like(
    path: web::Path<String>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let target = LikeTarget::Comment(parse_id(&path, "comment")?);
    let outcome = likes::toggle_like(state.store.as_ref(), user.id, target).await?;
    Ok(toggled_response(outcome, "Comment liked successfully", "Comment unliked successfully"))
}

#[post("/api/v1/likes/toggle/t/{tweet_id}")]
pub async fn toggle_tweet_like(
    path: web::Path<String>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let target = LikeTarget::Tweet(parse_id(&path, "tweet")?);
    let outcome = likes::toggle_like(state.store.as_ref(), user.id, target).await?;
    Ok(toggled_response(outcome, "Tweet liked successfully", "Tweet unliked successfully"))
}

#[get("/api/v1/likes/videos")]
pub async fn get_liked_videos(state: web::Data<AppState>, user: AuthUser) -> Result<HttpResponse, ApiError> {
    let videos = likes::liked_videos(state.store.as_ref(), user.id).await?;
    Ok(ApiResponse::ok(videos, "All liked videos"))
}
