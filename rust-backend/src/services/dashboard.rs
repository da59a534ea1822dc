use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::Video;
use crate::stats::ChannelStats;
use crate::store::EntityStore;

/// Views, videos and likes across the owner's videos, plus subscriber count.
/// Branches with nothing to aggregate report zero.
pub async fn channel_stats(store: &dyn EntityStore, owner: Uuid) -> ApiResult<ChannelStats> {
    let videos = store.video_rollup(owner).await?;
    let subscribers = store.subscriber_count(owner).await?;
    Ok(ChannelStats::from_rollups(videos, subscribers))
}

pub async fn channel_videos(store: &dyn EntityStore, owner: Uuid) -> ApiResult<Vec<Video>> {
    Ok(store.videos_by_owner(owner).await?)
}
