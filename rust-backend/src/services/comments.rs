use log::info;
use uuid::Uuid;

use super::{ensure_owner, require_text};
use crate::error::{ApiError, ApiResult};
use crate::models::Comment;
use crate::pagination::{PageParams, Paginated};
use crate::store::EntityStore;

/// One page of a video's comments in insertion order. A video without
/// comments yields an empty page, not an error.
pub async fn list_comments(
    store: &dyn EntityStore,
    video_id: Uuid,
    params: PageParams,
) -> ApiResult<Paginated<Comment>> {
    if store.find_video(video_id).await?.is_none() {
        return Err(ApiError::not_found("Video not found"));
    }
    let page = store.list_comments(video_id, params.window()).await?;
    Ok(Paginated::assemble(page, params))
}

pub async fn add_comment(
    store: &dyn EntityStore,
    actor: Uuid,
    video_id: Uuid,
    content: Option<String>,
) -> ApiResult<Comment> {
    let content = require_text("Content", content)?;
    if store.find_video(video_id).await?.is_none() {
        return Err(ApiError::not_found("Video not found"));
    }
    let comment = store.insert_comment(video_id, actor, content).await?;
    info!("User {} commented {} on video {}", actor, comment.id, video_id);
    Ok(comment)
}

pub async fn update_comment(
    store: &dyn EntityStore,
    actor: Uuid,
    comment_id: Uuid,
    content: Option<String>,
) -> ApiResult<Comment> {
    let content = require_text("Content", content)?;
    let comment = store
        .find_comment(comment_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;
    ensure_owner(comment.owner, actor, "update this comment")?;

    store
        .update_comment(comment_id, content)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))
}

pub async fn delete_comment(store: &dyn EntityStore, actor: Uuid, comment_id: Uuid) -> ApiResult<()> {
    let comment = store
        .find_comment(comment_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;
    ensure_owner(comment.owner, actor, "delete this comment")?;

    store
        .delete_comment(comment_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comment not found"))?;
    info!("User {} deleted comment {}", actor, comment_id);
    Ok(())
}
