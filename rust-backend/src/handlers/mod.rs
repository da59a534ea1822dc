use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::models::Toggled;
use crate::pagination::PageParams;
use crate::response::{empty, ApiResponse};

mod comments;
mod dashboard;
mod likes;
mod playlists;
mod subscriptions;
mod tweets;
mod videos;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn params(&self) -> ApiResult<PageParams> {
        PageParams::new(self.page, self.limit)
    }
}

fn toggled_response<T: Serialize>(outcome: Toggled<T>, created: &str, removed: &str) -> HttpResponse {
    match outcome {
        Toggled::Created(row) => ApiResponse::created(row, created),
        Toggled::Removed => ApiResponse::ok(empty(), removed),
    }
}

#[get("/api/v1/healthcheck")]
async fn healthcheck() -> HttpResponse {
    ApiResponse::ok(json!({ "status": "ok" }), "Service is healthy")
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::validation_with("Invalid query string", vec![err.to_string()]).into()
    }))
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::validation_with("Invalid request body", vec![err.to_string()]).into()
    }))
    .service(healthcheck)
    // videos
    .service(videos::get_all_videos)
    .service(videos::publish_video)
    .service(videos::get_video_by_id)
    .service(videos::update_video)
    .service(videos::delete_video)
    .service(videos::update_video_thumbnail)
    .service(videos::toggle_publish_status)
    // comments
    .service(comments::get_video_comments)
    .service(comments::add_comment)
    .service(comments::update_comment)
    .service(comments::delete_comment)
    // likes
    .service(likes::toggle_video_like)
    .service(likes::toggle_comment_like)
    .service(likes::toggle_tweet_like)
    .service(likes::get_liked_videos)
    // subscriptions
    .service(subscriptions::toggle_subscription)
    .service(subscriptions::get_channel_subscribers)
    .service(subscriptions::get_subscribed_channels)
    // playlists
    .service(playlists::create_playlist)
    .service(playlists::get_user_playlists)
    .service(playlists::get_playlist_by_id)
    .service(playlists::update_playlist)
    .service(playlists::delete_playlist)
    .service(playlists::add_video_to_playlist)
    .service(playlists::remove_video_from_playlist)
    // tweets
    .service(tweets::create_tweet)
    .service(tweets::get_user_tweets)
    .service(tweets::update_tweet)
    .service(tweets::delete_tweet)
    // dashboard
    .service(dashboard::get_channel_stats)
    .service(dashboard::get_channel_videos);
}
