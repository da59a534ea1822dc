//! The entity store seam. Services only talk to `EntityStore`; the Postgres and
//! in-memory implementations must agree on every observable result, including
//! ordering (insertion order unless a sort is given).

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{
    Comment, Like, LikeTarget, NewUser, NewVideo, Playlist, Subscription, Toggled, Tweet, User,
    Video, VideoPatch,
};
use crate::pagination::{Page, Window};
use crate::query::VideoQuery;
use crate::stats::VideoRollup;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait EntityStore: Send + Sync {
    // users
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    // videos
    async fn insert_video(&self, owner: Uuid, video: NewVideo) -> StoreResult<Video>;
    async fn find_video(&self, id: Uuid) -> StoreResult<Option<Video>>;
    async fn update_video(&self, id: Uuid, patch: VideoPatch) -> StoreResult<Option<Video>>;
    /// Adds one view and returns the updated video.
    async fn record_view(&self, id: Uuid) -> StoreResult<Option<Video>>;
    async fn delete_video(&self, id: Uuid) -> StoreResult<Option<Video>>;
    async fn list_videos(&self, query: &VideoQuery, window: Window) -> StoreResult<Page<Video>>;
    async fn videos_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Video>>;
    async fn video_rollup(&self, owner: Uuid) -> StoreResult<VideoRollup>;
    /// Videos behind the user's video likes, orphaned likes dropped.
    async fn liked_videos(&self, user: Uuid) -> StoreResult<Vec<Video>>;

    // comments
    async fn insert_comment(&self, video: Uuid, owner: Uuid, content: String) -> StoreResult<Comment>;
    async fn find_comment(&self, id: Uuid) -> StoreResult<Option<Comment>>;
    async fn update_comment(&self, id: Uuid, content: String) -> StoreResult<Option<Comment>>;
    async fn delete_comment(&self, id: Uuid) -> StoreResult<Option<Comment>>;
    async fn list_comments(&self, video: Uuid, window: Window) -> StoreResult<Page<Comment>>;

    // likes
    /// Removes the (target, actor) like if present, creates it otherwise.
    async fn toggle_like(&self, target: LikeTarget, actor: Uuid) -> StoreResult<Toggled<Like>>;

    // subscriptions
    async fn toggle_subscription(&self, channel: Uuid, subscriber: Uuid) -> StoreResult<Toggled<Subscription>>;
    async fn subscribers_of(&self, channel: Uuid) -> StoreResult<Vec<Subscription>>;
    async fn subscriptions_of(&self, subscriber: Uuid) -> StoreResult<Vec<Subscription>>;
    async fn subscriber_count(&self, channel: Uuid) -> StoreResult<Option<i64>>;

    // playlists
    async fn insert_playlist(&self, owner: Uuid, name: String, description: String) -> StoreResult<Playlist>;
    async fn find_playlist(&self, id: Uuid) -> StoreResult<Option<Playlist>>;
    async fn playlists_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Playlist>>;
    async fn update_playlist(&self, id: Uuid, name: String, description: String) -> StoreResult<Option<Playlist>>;
    async fn delete_playlist(&self, id: Uuid) -> StoreResult<Option<Playlist>>;
    /// Set-add: appends `video` unless it is already a member.
    async fn add_playlist_video(&self, id: Uuid, video: Uuid) -> StoreResult<Option<Playlist>>;
    /// Set-remove: drops every occurrence of `video`.
    async fn pull_playlist_video(&self, id: Uuid, video: Uuid) -> StoreResult<Option<Playlist>>;

    // tweets
    async fn insert_tweet(&self, owner: Uuid, content: String) -> StoreResult<Tweet>;
    async fn find_tweet(&self, id: Uuid) -> StoreResult<Option<Tweet>>;
    async fn tweets_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Tweet>>;
    async fn update_tweet(&self, id: Uuid, content: String) -> StoreResult<Option<Tweet>>;
    async fn delete_tweet(&self, id: Uuid) -> StoreResult<Option<Tweet>>;
}
