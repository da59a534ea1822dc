use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{EntityStore, StoreResult};
use crate::models::{
    Comment, Like, LikeTarget, NewUser, NewVideo, Playlist, Subscription, Toggled, Tweet, User,
    Video, VideoPatch,
};
use crate::pagination::{Page, Window};
use crate::query::VideoQuery;
use crate::stats::VideoRollup;

/// Every collection kept in insertion order.
#[derive(Default)]
struct Collections {
    users: Vec<User>,
    videos: Vec<Video>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
    subscriptions: Vec<Subscription>,
    playlists: Vec<Playlist>,
    tweets: Vec<Tweet>,
}

/// In-process store. One lock guards all collections, so every operation
/// (toggles included) is atomic.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

fn take<T>(rows: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> Option<T> {
    rows.iter().position(pred).map(|idx| rows.remove(idx))
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let row = User {
            id: Uuid::new_v4(),
            username: user.username.to_lowercase(),
            email: user.email,
            full_name: user.full_name,
            avatar: user.avatar,
            cover_image: user.cover_image,
            created_at: now(),
        };
        self.inner.lock().await.users.push(row.clone());
        Ok(row)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let db = self.inner.lock().await;
        Ok(db.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_video(&self, owner: Uuid, video: NewVideo) -> StoreResult<Video> {
        let at = now();
        let row = Video {
            id: Uuid::new_v4(),
            owner,
            video_file: video.video_file,
            thumbnail: video.thumbnail,
            title: video.title,
            description: video.description,
            duration: video.duration,
            views: 0,
            is_published: true,
            created_at: at,
            updated_at: at,
        };
        self.inner.lock().await.videos.push(row.clone());
        Ok(row)
    }

    async fn find_video(&self, id: Uuid) -> StoreResult<Option<Video>> {
        let db = self.inner.lock().await;
        Ok(db.videos.iter().find(|v| v.id == id).cloned())
    }

    async fn update_video(&self, id: Uuid, patch: VideoPatch) -> StoreResult<Option<Video>> {
        let mut db = self.inner.lock().await;
        let Some(video) = db.videos.iter_mut().find(|v| v.id == id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            video.title = title;
        }
        if let Some(description) = patch.description {
            video.description = description;
        }
        if let Some(thumbnail) = patch.thumbnail {
            video.thumbnail = thumbnail;
        }
        if let Some(is_published) = patch.is_published {
            video.is_published = is_published;
        }
        video.updated_at = now();
        Ok(Some(video.clone()))
    }

    async fn record_view(&self, id: Uuid) -> StoreResult<Option<Video>> {
        let mut db = self.inner.lock().await;
        Ok(db.videos.iter_mut().find(|v| v.id == id).map(|video| {
            video.views += 1;
            video.clone()
        }))
    }

    async fn delete_video(&self, id: Uuid) -> StoreResult<Option<Video>> {
        let mut db = self.inner.lock().await;
        Ok(take(&mut db.videos, |v| v.id == id))
    }

    async fn list_videos(&self, query: &VideoQuery, window: Window) -> StoreResult<Page<Video>> {
        let db = self.inner.lock().await;
        let mut matched: Vec<&Video> = db.videos.iter().filter(|v| query.matches(v)).collect();
        if let Some(sort) = query.sort {
            // stable: ties keep insertion order
            matched.sort_by(|a, b| sort.compare(a, b));
        }
        let total = matched.len() as i64;
        let items = window.slice(matched.into_iter().cloned());
        Ok(Page { items, total })
    }

    async fn videos_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Video>> {
        let db = self.inner.lock().await;
        Ok(db.videos.iter().filter(|v| v.owner == owner).cloned().collect())
    }

    async fn video_rollup(&self, owner: Uuid) -> StoreResult<VideoRollup> {
        let db = self.inner.lock().await;
        let owned: Vec<&Video> = db.videos.iter().filter(|v| v.owner == owner).collect();
        if owned.is_empty() {
            return Ok(VideoRollup::default());
        }

        let likes = db
            .likes
            .iter()
            .filter(|like| match like.target {
                LikeTarget::Video(id) => owned.iter().any(|v| v.id == id),
                _ => false,
            })
            .count() as i64;

        Ok(VideoRollup {
            total_views: Some(owned.iter().map(|v| v.views).sum()),
            total_videos: Some(owned.len() as i64),
            total_likes: (likes > 0).then_some(likes),
        })
    }

    async fn liked_videos(&self, user: Uuid) -> StoreResult<Vec<Video>> {
        let db = self.inner.lock().await;
        Ok(db
            .likes
            .iter()
            .filter(|like| like.liked_by == user)
            .filter_map(|like| match like.target {
                LikeTarget::Video(id) => db.videos.iter().find(|v| v.id == id).cloned(),
                _ => None,
            })
            .collect())
    }

    async fn insert_comment(&self, video: Uuid, owner: Uuid, content: String) -> StoreResult<Comment> {
        let at = now();
        let row = Comment {
            id: Uuid::new_v4(),
            video,
            owner,
            content,
            created_at: at,
            updated_at: at,
        };
        self.inner.lock().await.comments.push(row.clone());
        Ok(row)
    }

    async fn find_comment(&self, id: Uuid) -> StoreResult<Option<Comment>> {
        let db = self.inner.lock().await;
        Ok(db.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn update_comment(&self, id: Uuid, content: String) -> StoreResult<Option<Comment>> {
        let mut db = self.inner.lock().await;
        Ok(db.comments.iter_mut().find(|c| c.id == id).map(|comment| {
            comment.content = content;
            comment.updated_at = now();
            comment.clone()
        }))
    }

    async fn delete_comment(&self, id: Uuid) -> StoreResult<Option<Comment>> {
        let mut db = self.inner.lock().await;
        Ok(take(&mut db.comments, |c| c.id == id))
    }

    async fn list_comments(&self, video: Uuid, window: Window) -> StoreResult<Page<Comment>> {
        let db = self.inner.lock().await;
        let matched: Vec<&Comment> = db.comments.iter().filter(|c| c.video == video).collect();
        let total = matched.len() as i64;
        let items = window.slice(matched.into_iter().cloned());
        Ok(Page { items, total })
    }

    async fn toggle_like(&self, target: LikeTarget, actor: Uuid) -> StoreResult<Toggled<Like>> {
        let mut db = self.inner.lock().await;
        if take(&mut db.likes, |l| l.target == target && l.liked_by == actor).is_some() {
            return Ok(Toggled::Removed);
        }
        let row = Like {
            id: Uuid::new_v4(),
            target,
            liked_by: actor,
            created_at: now(),
        };
        db.likes.push(row.clone());
        Ok(Toggled::Created(row))
    }

    async fn toggle_subscription(&self, channel: Uuid, subscriber: Uuid) -> StoreResult<Toggled<Subscription>> {
        let mut db = self.inner.lock().await;
        if take(&mut db.subscriptions, |s| s.channel == channel && s.subscriber == subscriber).is_some() {
            return Ok(Toggled::Removed);
        }
        let row = Subscription {
            id: Uuid::new_v4(),
            channel,
            subscriber,
            created_at: now(),
        };
        db.subscriptions.push(row.clone());
        Ok(Toggled::Created(row))
    }

    async fn subscribers_of(&self, channel: Uuid) -> StoreResult<Vec<Subscription>> {
        let db = self.inner.lock().await;
        Ok(db.subscriptions.iter().filter(|s| s.channel == channel).cloned().collect())
    }

    async fn subscriptions_of(&self, subscriber: Uuid) -> StoreResult<Vec<Subscription>> {
        let db = self.inner.lock().await;
        Ok(db.subscriptions.iter().filter(|s| s.subscriber == subscriber).cloned().collect())
    }

    async fn subscriber_count(&self, channel: Uuid) -> StoreResult<Option<i64>> {
        let db = self.inner.lock().await;
        let count = db.subscriptions.iter().filter(|s| s.channel == channel).count() as i64;
        Ok((count > 0).then_some(count))
    }

    async fn insert_playlist(&self, owner: Uuid, name: String, description: String) -> StoreResult<Playlist> {
        let at = now();
        let row = Playlist {
            id: Uuid::new_v4(),
            name,
            description,
            owner,
            videos: Vec::new(),
            created_at: at,
            updated_at: at,
        };
        self.inner.lock().await.playlists.push(row.clone());
        Ok(row)
    }

    async fn find_playlist(&self, id: Uuid) -> StoreResult<Option<Playlist>> {
        let db = self.inner.lock().await;
        Ok(db.playlists.iter().find(|p| p.id == id).cloned())
    }

    async fn playlists_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Playlist>> {
        let db = self.inner.lock().await;
        Ok(db.playlists.iter().filter(|p| p.owner == owner).cloned().collect())
    }

    async fn update_playlist(&self, id: Uuid, name: String, description: String) -> StoreResult<Option<Playlist>> {
        let mut db = self.inner.lock().await;
        Ok(db.playlists.iter_mut().find(|p| p.id == id).map(|playlist| {
            playlist.name = name;
            playlist.description = description;
            playlist.updated_at = now();
            playlist.clone()
        }))
    }

    async fn delete_playlist(&self, id: Uuid) -> StoreResult<Option<Playlist>> {
        let mut db = self.inner.lock().await;
        Ok(take(&mut db.playlists, |p| p.id == id))
    }

    async fn add_playlist_video(&self, id: Uuid, video: Uuid) -> StoreResult<Option<Playlist>> {
        let mut db = self.inner.lock().await;
        Ok(db.playlists.iter_mut().find(|p| p.id == id).map(|playlist| {
            if !playlist.videos.contains(&video) {
                playlist.videos.push(video);
                playlist.updated_at = now();
            }
            playlist.clone()
        }))
    }

    async fn pull_playlist_video(&self, id: Uuid, video: Uuid) -> StoreResult<Option<Playlist>> {
        let mut db = self.inner.lock().await;
        Ok(db.playlists.iter_mut().find(|p| p.id == id).map(|playlist| {
            playlist.videos.retain(|v| *v != video);
            playlist.updated_at = now();
            playlist.clone()
        }))
    }

    async fn insert_tweet(&self, owner: Uuid, content: String) -> StoreResult<Tweet> {
        let at = now();
        let row = Tweet {
            id: Uuid::new_v4(),
            content,
            owner,
            created_at: at,
            updated_at: at,
        };
        self.inner.lock().await.tweets.push(row.clone());
        Ok(row)
    }

    async fn find_tweet(&self, id: Uuid) -> StoreResult<Option<Tweet>> {
        let db = self.inner.lock().await;
        Ok(db.tweets.iter().find(|t| t.id == id).cloned())
    }

    async fn tweets_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Tweet>> {
        let db = self.inner.lock().await;
        Ok(db.tweets.iter().filter(|t| t.owner == owner).cloned().collect())
    }

    async fn update_tweet(&self, id: Uuid, content: String) -> StoreResult<Option<Tweet>> {
        let mut db = self.inner.lock().await;
        Ok(db.tweets.iter_mut().find(|t| t.id == id).map(|tweet| {
            tweet.content = content;
            tweet.updated_at = now();
            tweet.clone()
        }))
    }

    async fn delete_tweet(&self, id: Uuid) -> StoreResult<Option<Tweet>> {
        let mut db = self.inner.lock().await;
        Ok(take(&mut db.tweets, |t| t.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(title: &str) -> NewVideo {
        NewVideo {
            video_file: format!("https://media.example/{}.mp4", title),
            thumbnail: format!("https://media.example/{}.jpg", title),
            title: title.to_string(),
            description: String::new(),
            duration: 30.0,
        }
    }

    #[tokio::test]
    async fn toggling_like_flips_presence() {
        let store = MemoryStore::new();
        let target = LikeTarget::Comment(Uuid::new_v4());
        let actor = Uuid::new_v4();

        assert!(matches!(store.toggle_like(target, actor).await.unwrap(), Toggled::Created(_)));
        assert_eq!(store.toggle_like(target, actor).await.unwrap(), Toggled::Removed);
        assert!(matches!(store.toggle_like(target, actor).await.unwrap(), Toggled::Created(_)));
        assert_eq!(store.inner.lock().await.likes.len(), 1);
    }

    #[tokio::test]
    async fn rollup_branches_are_absent_without_rows() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        assert_eq!(store.video_rollup(owner).await.unwrap(), VideoRollup::default());

        store.insert_video(owner, clip("first")).await.unwrap();
        let rollup = store.video_rollup(owner).await.unwrap();
        assert_eq!(rollup.total_views, Some(0));
        assert_eq!(rollup.total_videos, Some(1));
        assert_eq!(rollup.total_likes, None);
    }

    #[tokio::test]
    async fn playlist_add_is_a_set_union() {
        let store = MemoryStore::new();
        let playlist = store
            .insert_playlist(Uuid::new_v4(), "mix".to_string(), "songs".to_string())
            .await
            .unwrap();
        let video = Uuid::new_v4();

        store.add_playlist_video(playlist.id, video).await.unwrap();
        let again = store.add_playlist_video(playlist.id, video).await.unwrap().unwrap();
        assert_eq!(again.videos, vec![video]);
    }
}
