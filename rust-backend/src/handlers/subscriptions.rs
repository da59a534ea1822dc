use actix_web::{get, post, web, HttpResponse};

use super::toggled_response;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::services::{parse_id, subscriptions};
use crate::AppState;

#[post("/api/v1/subscriptions/c/{channel_id}")]
pub async fn toggle_subscription(
    path: web::Path<String>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let channel_id = parse_id(&path, "channel")?;
    let outcome = subscriptions::toggle_subscription(state.store.as_ref(), user.id, channel_id).await?;
    Ok(toggled_response(outcome, "Subscribed successfully", "Unsubscribed successfully"))
}

#[get("/api/v1/subscriptions/c/{channel_id}")]
pub async fn get_channel_subscribers(
    path: web::Path<String>,
    state: web::Data<AppState>,
    _user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let channel_id = parse_id(&path, "channel")?;
    let subscribers = subscriptions::channel_subscribers(state.store.as_ref(), channel_id).await?;
    Ok(ApiResponse::ok(subscribers, "Subscribers fetched successfully"))
}

#[get("/api/v1/subscriptions/u/{subscriber_id}")]
pub async fn get_subscribed_channels(
    path: web::Path<String>,
    state: web::Data<AppState>,
    _user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let subscriber_id = parse_id(&path, "subscriber")?;
    let channels = subscriptions::subscribed_channels(state.store.as_ref(), subscriber_id).await?;
    Ok(ApiResponse::ok(channels, "Subscribed channels fetched successfully"))
}
