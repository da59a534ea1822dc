use actix_web::{get, web, HttpResponse};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::services::dashboard;
use crate::AppState;

#[get("/api/v1/dashboard/stats")]
pub async fn get_channel_stats(state: web::Data<AppState>, user: AuthUser) -> Result<HttpResponse, ApiError> {
    let stats = dashboard::channel_stats(state.store.as_ref(), user.id).await?;
    Ok(ApiResponse::ok(stats, "Stats fetched successfully"))
}

#[get("/api/v1/dashboard/videos")]
pub async fn get_channel_videos(state: web::Data<AppState>, user: AuthUser) -> Result<HttpResponse, ApiError> {
    let videos = dashboard::channel_videos(state.store.as_ref(), user.id).await?;
    Ok(ApiResponse::ok(videos, "Videos fetched successfully"))
}
