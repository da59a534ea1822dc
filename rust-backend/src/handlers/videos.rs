use actix_web::{delete, get, patch, post, web, HttpResponse};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::{PublishVideoRequest, ThumbnailRequest, UpdateVideoRequest};
use crate::pagination::PageParams;
use crate::query::SortSpec;
use crate::response::{empty, ApiResponse};
use crate::services::videos::{self, VideoListing};
use crate::services::parse_id;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub query: Option<String>,
    pub sort_by: Option<String>,
    pub sort_type: Option<String>,
    pub user_id: Option<String>,
}

impl VideoListQuery {
    /// Without `userId` (or with a blank one) the listing covers the caller's own channel.
    fn into_listing(self, actor: AuthUser) -> Result<VideoListing, ApiError> {
        let owner = match self.user_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_id(raw, "user")?,
            _ => actor.id,
        };
        Ok(VideoListing {
            owner,
            sort: SortSpec::from_params(self.sort_by.as_deref(), self.sort_type.as_deref())?,
            page: PageParams::new(self.page, self.limit)?,
            text: self.query,
        })
    }
}

#[get("/api/v1/videos")]
pub async fn get_all_videos(
    query: web::Query<VideoListQuery>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let listing = query.into_inner().into_listing(user)?;
    let page = videos::list_videos(state.store.as_ref(), listing).await?;
    Ok(ApiResponse::ok(page, "Videos fetched successfully"))
}

#[post("/api/v1/videos")]
pub async fn publish_video(
    req: web::Json<PublishVideoRequest>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let video = videos::publish_video(state.store.as_ref(), user.id, req.into_inner()).await?;
    Ok(ApiResponse::created(video, "Video published successfully"))
}

#[get("/api/v1/videos/{video_id}")]
pub async fn get_video_by_id(
    path: web::Path<String>,
    state: web::Data<AppState>,
    _user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let video_id = parse_id(&path, "video")?;
    let video = videos::get_video(state.store.as_ref(), video_id).await?;
    Ok(ApiResponse::ok(video, "Video fetched successfully"))
}

#[patch("/api/v1/videos/{video_id}")]
pub async fn update_video(
    path: web::Path<String>,
    req: web::Json<UpdateVideoRequest>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let video_id = parse_id(&path, "video")?;
    let UpdateVideoRequest { title, description } = req.into_inner();
    let video = videos::update_video(state.store.as_ref(), user.id, video_id, title, description).await?;
    Ok(ApiResponse::ok(video, "Video updated successfully"))
}

#[delete("/api/v1/videos/{video_id}")]
pub async fn delete_video(
    path: web::Path<String>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let video_id = parse_id(&path, "video")?;
    videos::delete_video(state.store.as_ref(), user.id, video_id).await?;
    Ok(ApiResponse::ok(empty(), "Video deleted successfully"))
}

#[patch("/api/v1/videos/update-thumbnail/{video_id}")]
pub async fn update_video_thumbnail(
    path: web::Path<String>,
    req: web::Json<ThumbnailRequest>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let video_id = parse_id(&path, "video")?;
    let video = videos::update_thumbnail(state.store.as_ref(), user.id, video_id, req.into_inner().thumbnail).await?;
    Ok(ApiResponse::ok(video, "Thumbnail updated successfully"))
}

#[patch("/api/v1/videos/toggle/publish/{video_id}")]
pub async fn toggle_publish_status(
    path: web::Path<String>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let video_id = parse_id(&path, "video")?;
    let video = videos::toggle_publish(state.store.as_ref(), user.id, video_id).await?;
    Ok(ApiResponse::ok(video, "Publish status toggled successfully"))
}
