use log::info;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{Like, LikeTarget, Toggled, Video};
use crate::store::EntityStore;

/// Flips the actor's like on `target`. The target itself is not looked up:
/// a like is just the presence of a (target, actor) row.
pub async fn toggle_like(store: &dyn EntityStore, actor: Uuid, target: LikeTarget) -> ApiResult<Toggled<Like>> {
    let outcome = store.toggle_like(target, actor).await?;
    match &outcome {
        Toggled::Created(_) => info!("User {} liked {} {}", actor, target.kind(), target.id()),
        Toggled::Removed => info!("User {} unliked {} {}", actor, target.kind(), target.id()),
    }
    Ok(outcome)
}

pub async fn liked_videos(store: &dyn EntityStore, actor: Uuid) -> ApiResult<Vec<Video>> {
    Ok(store.liked_videos(actor).await?)
}
