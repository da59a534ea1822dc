use log::info;
use uuid::Uuid;

use super::{ensure_owner, require_text};
use crate::error::{ApiError, ApiResult};
use crate::models::Playlist;
use crate::store::EntityStore;

async fn owned_playlist(store: &dyn EntityStore, actor: Uuid, playlist_id: Uuid, action: &str) -> ApiResult<Playlist> {
    let playlist = store
        .find_playlist(playlist_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Playlist not found"))?;
    ensure_owner(playlist.owner, actor, action)?;
    Ok(playlist)
}

pub async fn create_playlist(
    store: &dyn EntityStore,
    actor: Uuid,
    name: Option<String>,
    description: Option<String>,
) -> ApiResult<Playlist> {
    let name = require_text("Name", name)?;
    let description = require_text("Description", description)?;
    let playlist = store.insert_playlist(actor, name, description).await?;
    info!("User {} created playlist {}", actor, playlist.id);
    Ok(playlist)
}

pub async fn user_playlists(store: &dyn EntityStore, user_id: Uuid) -> ApiResult<Vec<Playlist>> {
    if store.find_user(user_id).await?.is_none() {
        return Err(ApiError::not_found("User not found"));
    }
    Ok(store.playlists_by_owner(user_id).await?)
}

pub async fn get_playlist(store: &dyn EntityStore, playlist_id: Uuid) -> ApiResult<Playlist> {
    store
        .find_playlist(playlist_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Playlist not found"))
}

pub async fn update_playlist(
    store: &dyn EntityStore,
    actor: Uuid,
    playlist_id: Uuid,
    name: Option<String>,
    description: Option<String>,
) -> ApiResult<Playlist> {
    let name = require_text("Name", name)?;
    let description = require_text("Description", description)?;
    owned_playlist(store, actor, playlist_id, "update this playlist").await?;

    store
        .update_playlist(playlist_id, name, description)
        .await?
        .ok_or_else(|| ApiError::not_found("Playlist not found"))
}

pub async fn delete_playlist(store: &dyn EntityStore, actor: Uuid, playlist_id: Uuid) -> ApiResult<()> {
    owned_playlist(store, actor, playlist_id, "delete this playlist").await?;
    store
        .delete_playlist(playlist_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Playlist not found"))?;
    info!("User {} deleted playlist {}", actor, playlist_id);
    Ok(())
}

/// Set-add. Adding a video that is already listed returns the playlist unchanged.
pub async fn add_video(store: &dyn EntityStore, actor: Uuid, playlist_id: Uuid, video_id: Uuid) -> ApiResult<Playlist> {
    owned_playlist(store, actor, playlist_id, "modify this playlist").await?;
    if store.find_video(video_id).await?.is_none() {
        return Err(ApiError::not_found("Video not found"));
    }

    store
        .add_playlist_video(playlist_id, video_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Playlist not found"))
}

/// Set-remove. Removing a video that is not listed is an error and leaves the
/// playlist untouched.
pub async fn remove_video(
    store: &dyn EntityStore,
    actor: Uuid,
    playlist_id: Uuid,
    video_id: Uuid,
) -> ApiResult<Playlist> {
    let playlist = owned_playlist(store, actor, playlist_id, "modify this playlist").await?;
    if !playlist.videos.contains(&video_id) {
        return Err(ApiError::not_found("Video not found in the playlist"));
    }

    store
        .pull_playlist_video(playlist_id, video_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Playlist not found"))
}
