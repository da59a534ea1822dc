use serde::{Deserialize, Serialize};

/// Per-branch results of the video rollup as a store produces them. A branch
/// whose grouping matched no rows comes back as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoRollup {
    pub total_views: Option<i64>,
    pub total_videos: Option<i64>,
    pub total_likes: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub total_video_views: i64,
    pub total_videos: i64,
    pub total_likes: i64,
}

impl VideoDetails {
    /// Overlays the branches that produced a value onto the zero record.
    pub fn merge(self, rollup: VideoRollup) -> Self {
        Self {
            total_video_views: rollup.total_views.unwrap_or(self.total_video_views),
            total_videos: rollup.total_videos.unwrap_or(self.total_videos),
            total_likes: rollup.total_likes.unwrap_or(self.total_likes),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberDetails {
    pub total_subscribers: i64,
}

impl SubscriberDetails {
    pub fn merge(self, total: Option<i64>) -> Self {
        Self {
            total_subscribers: total.unwrap_or(self.total_subscribers),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub video_details: VideoDetails,
    pub subscriber_details: SubscriberDetails,
}

impl ChannelStats {
    pub fn from_rollups(videos: VideoRollup, subscribers: Option<i64>) -> Self {
        Self {
            video_details: VideoDetails::default().merge(videos),
            subscriber_details: SubscriberDetails::default().merge(subscribers),
        }
    }
}
