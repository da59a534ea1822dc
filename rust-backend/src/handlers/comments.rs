use actix_web::{delete, get, patch, post, web, HttpResponse};

use super::PageQuery;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::ContentRequest;
use crate::response::{empty, ApiResponse};
use crate::services::{comments, parse_id};
use crate::AppState;

#[get("/api/v1/comments/{video_id}")]
pub async fn get_video_comments(
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    state: web::Data<AppState>,
    _user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let video_id = parse_id(&path, "video")?;
    let params = query.params()?;
    let page = comments::list_comments(state.store.as_ref(), video_id, params).await?;
    Ok(ApiResponse::ok(page, "Comments fetched successfully"))
}

#[post("/api/v1/comments/{video_id}")]
pub async fn add_comment(
    path: web::Path<String>,
    req: web::Json<ContentRequest>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let video_id = parse_id(&path, "video")?;
    let comment = comments::add_comment(state.store.as_ref(), user.id, video_id, req.into_inner().content).await?;
    Ok(ApiResponse::created(comment, "Comment added successfully"))
}

#[patch("/api/v1/comments/c/{comment_id}")]
pub async fn update_comment(
    path: web::Path<String>,
    req: web::Json<ContentRequest>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let comment_id = parse_id(&path, "comment")?;
    let comment =
        comments::update_comment(state.store.as_ref(), user.id, comment_id, req.into_inner().content).await?;
    Ok(ApiResponse::ok(comment, "Comment updated successfully"))
}

#[delete("/api/v1/comments/c/{comment_id}")]
pub async fn delete_comment(
    path: web::Path<String>,
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let comment_id = parse_id(&path, "comment")?;
    comments::delete_comment(state.store.as_ref(), user.id, comment_id).await?;
    Ok(ApiResponse::ok(empty(), "Comment deleted successfully"))
}
