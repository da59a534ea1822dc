use actix_web::{delete, get, patch, post, web, HttpResponse};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::PlaylistRequest;
use crate::response::{empty, ApiResponse};
use crate::services::{parse_id, playlists};
use crate::AppState;

#[post("/api/v1/playlist")]
pub async fn create_playlist(
    req: web::Json<PlaylistRequest>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let PlaylistRequest { name, description } = req.into_inner();
    let playlist = playlists::create_playlist(state.store.as_ref(), user.id, name, description).await?;
    Ok(ApiResponse::created(playlist, "Playlist created successfully"))
}

#[get("/api/v1/playlist/user/{user_id}")]
pub async fn get_user_playlists(
    path: web::Path<String>,
    state: web::Data<AppState>,
    _user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let user_id = parse_id(&path, "user")?;
    let lists = playlists::user_playlists(state.store.as_ref(), user_id).await?;
    Ok(ApiResponse::ok(lists, "Playlists fetched successfully"))
}

#[get("/api/v1/playlist/{playlist_id}")]
pub async fn get_playlist_by_id(
    path: web::Path<String>,
    state: web::Data<AppState>,
    _user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let playlist_id = parse_id(&path, "playlist")?;
    let playlist = playlists::get_playlist(state.store.as_ref(), playlist_id).await?;
    Ok(ApiResponse::ok(playlist, "Playlist fetched successfully"))
}

#[patch("/api/v1/playlist/{playlist_id}")]
pub async fn update_playlist(
    path: web::Path<String>,
    req: web::Json<PlaylistRequest>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let playlist_id = parse_id(&path, "playlist")?;
    let PlaylistRequest { name, description } = req.into_inner();
    let playlist = playlists::update_playlist(state.store.as_ref(), user.id, playlist_id, name, description).await?;
    Ok(ApiResponse::ok(playlist, "Playlist updated successfully"))
}

#[delete("/api/v1/playlist/{playlist_id}")]
pub async fn delete_playlist(
    path: web::Path<String>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let playlist_id = parse_id(&path, "playlist")?;
    playlists::delete_playlist(state.store.as_ref(), user.id, playlist_id).await?;
    Ok(ApiResponse::ok(empty(), "Playlist deleted successfully"))
}

#[patch("/api/v1/playlist/add/{video_id}/{playlist_id}")]
pub async fn add_video_to_playlist(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let (video_id, playlist_id) = path.into_inner();
    let video_id = parse_id(&video_id, "video")?;
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    let playlist = playlists::add_video(state.store.as_ref(), user.id, playlist_id, video_id).await?;
    Ok(ApiResponse::ok(playlist, "Video added to playlist"))
}

#[patch("/api/v1/playlist/remove/{video_id}/{playlist_id}")]
pub async fn remove_video_from_playlist(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let (video_id, playlist_id) = path.into_inner();
    let video_id = parse_id(&video_id, "video")?;
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    let playlist = playlists::remove_video(state.store.as_ref(), user.id, playlist_id, video_id).await?;
    Ok(ApiResponse::ok(playlist, "Video removed from playlist"))
}
