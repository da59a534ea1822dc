use log::info;
use uuid::Uuid;

use super::{ensure_owner, require_text};
use crate::error::{ApiError, ApiResult};
use crate::models::{NewVideo, PublishVideoRequest, Video, VideoPatch};
use crate::pagination::{PageParams, Paginated};
use crate::query::{SortSpec, VideoQuery};
use crate::store::EntityStore;

/// Listing request after parsing: whose videos, optional text filter, optional sort.
#[derive(Debug, Clone)]
pub struct VideoListing {
    pub owner: Uuid,
    pub text: Option<String>,
    pub sort: Option<SortSpec>,
    pub page: PageParams,
}

pub async fn list_videos(store: &dyn EntityStore, listing: VideoListing) -> ApiResult<Paginated<Video>> {
    let query = VideoQuery::new(listing.owner, listing.text.as_deref(), listing.sort);
    let page = store.list_videos(&query, listing.page.window()).await?;
    Ok(Paginated::assemble(page, listing.page))
}

pub async fn publish_video(store: &dyn EntityStore, actor: Uuid, req: PublishVideoRequest) -> ApiResult<Video> {
    let title = require_text("Title", req.title)?;
    let description = require_text("Description", req.description)?;
    let (video_file, thumbnail) = match (req.video_file, req.thumbnail) {
        (Some(v), Some(t)) if !v.trim().is_empty() && !t.trim().is_empty() => {
            (v.trim().to_string(), t.trim().to_string())
        }
        _ => return Err(ApiError::validation("Video and thumbnail are required")),
    };
    let duration = req.duration.unwrap_or(0.0);
    if !duration.is_finite() || duration < 0.0 {
        return Err(ApiError::validation("Duration must be a non-negative number of seconds"));
    }

    let video = store
        .insert_video(
            actor,
            NewVideo {
                video_file,
                thumbnail,
                title,
                description,
                duration,
            },
        )
        .await?;
    info!("User {} published video {}", actor, video.id);
    Ok(video)
}

/// Fetches a video for playback and counts one view, so repeated fetches
/// (the owner's included) are not idempotent.
pub async fn get_video(store: &dyn EntityStore, video_id: Uuid) -> ApiResult<Video> {
    store
        .record_view(video_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Video not found"))
}

async fn owned_video(store: &dyn EntityStore, actor: Uuid, video_id: Uuid, action: &str) -> ApiResult<Video> {
    let video = store
        .find_video(video_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Video not found"))?;
    ensure_owner(video.owner, actor, action)?;
    Ok(video)
}

async fn patch_video(store: &dyn EntityStore, video_id: Uuid, patch: VideoPatch) -> ApiResult<Video> {
    store
        .update_video(video_id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Video not found"))
}

pub async fn update_video(
    store: &dyn EntityStore,
    actor: Uuid,
    video_id: Uuid,
    title: Option<String>,
    description: Option<String>,
) -> ApiResult<Video> {
    let title = require_text("Title", title)?;
    let description = require_text("Description", description)?;
    owned_video(store, actor, video_id, "update this video").await?;

    patch_video(
        store,
        video_id,
        VideoPatch {
            title: Some(title),
            description: Some(description),
            ..VideoPatch::default()
        },
    )
    .await
}

pub async fn update_thumbnail(
    store: &dyn EntityStore,
    actor: Uuid,
    video_id: Uuid,
    thumbnail: Option<String>,
) -> ApiResult<Video> {
    let thumbnail = require_text("Thumbnail", thumbnail)?;
    owned_video(store, actor, video_id, "update this video").await?;

    patch_video(
        store,
        video_id,
        VideoPatch {
            thumbnail: Some(thumbnail),
            ..VideoPatch::default()
        },
    )
    .await
}

pub async fn toggle_publish(store: &dyn EntityStore, actor: Uuid, video_id: Uuid) -> ApiResult<Video> {
    let video = owned_video(store, actor, video_id, "update this video").await?;

    patch_video(
        store,
        video_id,
        VideoPatch {
            is_published: Some(!video.is_published),
            ..VideoPatch::default()
        },
    )
    .await
}

/// Removes the video only. Likes, comments and playlist entries that point at
/// it are left in place.
pub async fn delete_video(store: &dyn EntityStore, actor: Uuid, video_id: Uuid) -> ApiResult<()> {
    owned_video(store, actor, video_id, "delete this video").await?;
    store
        .delete_video(video_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Video not found"))?;
    info!("User {} deleted video {}", actor, video_id);
    Ok(())
}
