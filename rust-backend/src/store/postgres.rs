use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::info;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use super::{EntityStore, StoreResult};
use crate::models::{
    Comment, Like, LikeTarget, NewUser, NewVideo, Playlist, Subscription, Toggled, Tweet, User,
    Video, VideoPatch,
};
use crate::pagination::{Page, Window};
use crate::query::VideoQuery;
use crate::stats::VideoRollup;

const USER_COLUMNS: &str = "id, username, email, full_name, avatar, cover_image, created_at";
const VIDEO_COLUMNS: &str =
    "id, owner, video_file, thumbnail, title, description, duration, views, is_published, created_at, updated_at";
const JOINED_VIDEO_COLUMNS: &str = "v.id, v.owner, v.video_file, v.thumbnail, v.title, v.description, \
     v.duration, v.views, v.is_published, v.created_at, v.updated_at";
const COMMENT_COLUMNS: &str = "id, video, owner, content, created_at, updated_at";
const LIKE_COLUMNS: &str = "id, target_kind, target_id, liked_by, created_at";
const SUBSCRIPTION_COLUMNS: &str = "id, channel, subscriber, created_at";
const PLAYLIST_COLUMNS: &str = "id, name, description, owner, videos, created_at, updated_at";
const TWEET_COLUMNS: &str = "id, content, owner, created_at, updated_at";

// Match stage of the video listing. $1 owner, $2 ILIKE patterns (empty = no text filter).
const VIDEO_MATCH: &str =
    "owner = $1 AND (cardinality($2::text[]) = 0 OR title ILIKE ANY($2) OR description ILIKE ANY($2))";

impl<'r> FromRow<'r, PgRow> for Like {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let kind: String = row.try_get("target_kind")?;
        let target_id: Uuid = row.try_get("target_id")?;
        let target = LikeTarget::from_parts(&kind, target_id)
            .ok_or_else(|| sqlx::Error::Decode(format!("unknown like target kind '{}'", kind).into()))?;

        Ok(Like {
            id: row.try_get("id")?,
            target,
            liked_by: row.try_get("liked_by")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

/// PostgreSQL-backed entity store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        info!("Connected to database (max {} connections)", max_connections);
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users (id, username, email, full_name, avatar, cover_image, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(user.username.to_lowercase())
            .bind(user.email)
            .bind(user.full_name)
            .bind(user.avatar)
            .bind(user.cover_image)
            .bind(now())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn insert_video(&self, owner: Uuid, video: NewVideo) -> StoreResult<Video> {
        let at = now();
        let sql = format!(
            "INSERT INTO videos (id, owner, video_file, thumbnail, title, description, duration, views, is_published, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, 0, TRUE, $8, $8) RETURNING {}",
            VIDEO_COLUMNS
        );
        let row = sqlx::query_as::<_, Video>(&sql)
            .bind(Uuid::new_v4())
            .bind(owner)
            .bind(video.video_file)
            .bind(video.thumbnail)
            .bind(video.title)
            .bind(video.description)
            .bind(video.duration)
            .bind(at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_video(&self, id: Uuid) -> StoreResult<Option<Video>> {
        let sql = format!("SELECT {} FROM videos WHERE id = $1", VIDEO_COLUMNS);
        Ok(sqlx::query_as::<_, Video>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn update_video(&self, id: Uuid, patch: VideoPatch) -> StoreResult<Option<Video>> {
        let sql = format!(
            "UPDATE videos SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                thumbnail = COALESCE($4, thumbnail), \
                is_published = COALESCE($5, is_published), \
                updated_at = $6 \
             WHERE id = $1 RETURNING {}",
            VIDEO_COLUMNS
        );
        Ok(sqlx::query_as::<_, Video>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.description)
            .bind(patch.thumbnail)
            .bind(patch.is_published)
            .bind(now())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn record_view(&self, id: Uuid) -> StoreResult<Option<Video>> {
        let sql = format!("UPDATE videos SET views = views + 1 WHERE id = $1 RETURNING {}", VIDEO_COLUMNS);
        Ok(sqlx::query_as::<_, Video>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn delete_video(&self, id: Uuid) -> StoreResult<Option<Video>> {
        let sql = format!("DELETE FROM videos WHERE id = $1 RETURNING {}", VIDEO_COLUMNS);
        Ok(sqlx::query_as::<_, Video>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn list_videos(&self, query: &VideoQuery, window: Window) -> StoreResult<Page<Video>> {
        let patterns = query.like_patterns();

        let count_sql = format!("SELECT COUNT(*) FROM videos WHERE {}", VIDEO_MATCH);
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(query.owner)
            .bind(patterns.clone())
            .fetch_one(&self.pool)
            .await?;

        let order = match query.sort {
            Some(sort) => format!("{} {}, seq ASC", sort.field.sort_key(), sort.direction.keyword()),
            None => "seq ASC".to_string(),
        };
        let sql = format!(
            "SELECT {} FROM videos WHERE {} ORDER BY {} LIMIT $3 OFFSET $4",
            VIDEO_COLUMNS, VIDEO_MATCH, order
        );
        let items = sqlx::query_as::<_, Video>(&sql)
            .bind(query.owner)
            .bind(patterns)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page { items, total })
    }

    async fn videos_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Video>> {
        let sql = format!("SELECT {} FROM videos WHERE owner = $1 ORDER BY seq ASC", VIDEO_COLUMNS);
        Ok(sqlx::query_as::<_, Video>(&sql).bind(owner).fetch_all(&self.pool).await?)
    }

    async fn video_rollup(&self, owner: Uuid) -> StoreResult<VideoRollup> {
        // Each branch is a grouping that yields no row (NULL) when nothing matched.
        let (total_views, total_videos, total_likes): (Option<i64>, Option<i64>, Option<i64>) =
            sqlx::query_as(
                r#"
                WITH owned AS (
                    SELECT id, views FROM videos WHERE owner = $1
                )
                SELECT
                    (SELECT SUM(views)::BIGINT FROM owned) AS total_views,
                    (SELECT COUNT(*) FROM owned HAVING COUNT(*) > 0) AS total_videos,
                    (SELECT COUNT(*)
                       FROM likes l
                       JOIN owned o ON l.target_kind = 'video' AND l.target_id = o.id
                     HAVING COUNT(*) > 0) AS total_likes
                "#,
            )
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;

        Ok(VideoRollup {
            total_views,
            total_videos,
            total_likes,
        })
    }

    async fn liked_videos(&self, user: Uuid) -> StoreResult<Vec<Video>> {
        let sql = format!(
            "SELECT {} FROM likes l \
             JOIN videos v ON v.id = l.target_id \
             WHERE l.liked_by = $1 AND l.target_kind = 'video' \
             ORDER BY l.seq ASC",
            JOINED_VIDEO_COLUMNS
        );
        Ok(sqlx::query_as::<_, Video>(&sql).bind(user).fetch_all(&self.pool).await?)
    }

    async fn insert_comment(&self, video: Uuid, owner: Uuid, content: String) -> StoreResult<Comment> {
        let sql = format!(
            "INSERT INTO comments (id, video, owner, content, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) RETURNING {}",
            COMMENT_COLUMNS
        );
        let row = sqlx::query_as::<_, Comment>(&sql)
            .bind(Uuid::new_v4())
            .bind(video)
            .bind(owner)
            .bind(content)
            .bind(now())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_comment(&self, id: Uuid) -> StoreResult<Option<Comment>> {
        let sql = format!("SELECT {} FROM comments WHERE id = $1", COMMENT_COLUMNS);
        Ok(sqlx::query_as::<_, Comment>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn update_comment(&self, id: Uuid, content: String) -> StoreResult<Option<Comment>> {
        let sql = format!(
            "UPDATE comments SET content = $2, updated_at = $3 WHERE id = $1 RETURNING {}",
            COMMENT_COLUMNS
        );
        Ok(sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .bind(content)
            .bind(now())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_comment(&self, id: Uuid) -> StoreResult<Option<Comment>> {
        let sql = format!("DELETE FROM comments WHERE id = $1 RETURNING {}", COMMENT_COLUMNS);
        Ok(sqlx::query_as::<_, Comment>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn list_comments(&self, video: Uuid, window: Window) -> StoreResult<Page<Comment>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE video = $1")
            .bind(video)
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {} FROM comments WHERE video = $1 ORDER BY seq ASC LIMIT $2 OFFSET $3",
            COMMENT_COLUMNS
        );
        let items = sqlx::query_as::<_, Comment>(&sql)
            .bind(video)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page { items, total })
    }

    async fn toggle_like(&self, target: LikeTarget, actor: Uuid) -> StoreResult<Toggled<Like>> {
        // One statement: delete the like if present, otherwise insert it.
        let sql = format!(
            r#"
            WITH removed AS (
                DELETE FROM likes
                WHERE target_kind = $2 AND target_id = $3 AND liked_by = $4
                RETURNING id
            ), created AS (
                INSERT INTO likes (id, target_kind, target_id, liked_by, created_at)
                SELECT $1::uuid, $2::text, $3::uuid, $4::uuid, $5::timestamp
                WHERE NOT EXISTS (SELECT 1 FROM removed)
                ON CONFLICT (target_kind, target_id, liked_by) DO NOTHING
                RETURNING {cols}
            )
            SELECT {cols} FROM created
            "#,
            cols = LIKE_COLUMNS
        );
        let created = sqlx::query_as::<_, Like>(&sql)
            .bind(Uuid::new_v4())
            .bind(target.kind())
            .bind(target.id())
            .bind(actor)
            .bind(now())
            .fetch_optional(&self.pool)
            .await?;

        Ok(match created {
            Some(like) => Toggled::Created(like),
            None => Toggled::Removed,
        })
    }

    async fn toggle_subscription(&self, channel: Uuid, subscriber: Uuid) -> StoreResult<Toggled<Subscription>> {
        let sql = format!(
            r#"
            WITH removed AS (
                DELETE FROM subscriptions
                WHERE channel = $2 AND subscriber = $3
                RETURNING id
            ), created AS (
                INSERT INTO subscriptions (id, channel, subscriber, created_at)
                SELECT $1::uuid, $2::uuid, $3::uuid, $4::timestamp
                WHERE NOT EXISTS (SELECT 1 FROM removed)
                ON CONFLICT (channel, subscriber) DO NOTHING
                RETURNING {cols}
            )
            SELECT {cols} FROM created
            "#,
            cols = SUBSCRIPTION_COLUMNS
        );
        let created = sqlx::query_as::<_, Subscription>(&sql)
            .bind(Uuid::new_v4())
            .bind(channel)
            .bind(subscriber)
            .bind(now())
            .fetch_optional(&self.pool)
            .await?;

        Ok(match created {
            Some(subscription) => Toggled::Created(subscription),
            None => Toggled::Removed,
        })
    }

    async fn subscribers_of(&self, channel: Uuid) -> StoreResult<Vec<Subscription>> {
        let sql = format!(
            "SELECT {} FROM subscriptions WHERE channel = $1 ORDER BY seq ASC",
            SUBSCRIPTION_COLUMNS
        );
        Ok(sqlx::query_as::<_, Subscription>(&sql).bind(channel).fetch_all(&self.pool).await?)
    }

    async fn subscriptions_of(&self, subscriber: Uuid) -> StoreResult<Vec<Subscription>> {
        let sql = format!(
            "SELECT {} FROM subscriptions WHERE subscriber = $1 ORDER BY seq ASC",
            SUBSCRIPTION_COLUMNS
        );
        Ok(sqlx::query_as::<_, Subscription>(&sql).bind(subscriber).fetch_all(&self.pool).await?)
    }

    async fn subscriber_count(&self, channel: Uuid) -> StoreResult<Option<i64>> {
        Ok(sqlx::query_scalar(
            "SELECT COUNT(*) FROM subscriptions WHERE channel = $1 HAVING COUNT(*) > 0",
        )
        .bind(channel)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_playlist(&self, owner: Uuid, name: String, description: String) -> StoreResult<Playlist> {
        let sql = format!(
            "INSERT INTO playlists (id, name, description, owner, videos, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, '{{}}', $5, $5) RETURNING {}",
            PLAYLIST_COLUMNS
        );
        let row = sqlx::query_as::<_, Playlist>(&sql)
            .bind(Uuid::new_v4())
            .bind(name)
            .bind(description)
            .bind(owner)
            .bind(now())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_playlist(&self, id: Uuid) -> StoreResult<Option<Playlist>> {
        let sql = format!("SELECT {} FROM playlists WHERE id = $1", PLAYLIST_COLUMNS);
        Ok(sqlx::query_as::<_, Playlist>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn playlists_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Playlist>> {
        let sql = format!("SELECT {} FROM playlists WHERE owner = $1 ORDER BY seq ASC", PLAYLIST_COLUMNS);
        Ok(sqlx::query_as::<_, Playlist>(&sql).bind(owner).fetch_all(&self.pool).await?)
    }

    async fn update_playlist(&self, id: Uuid, name: String, description: String) -> StoreResult<Option<Playlist>> {
        let sql = format!(
            "UPDATE playlists SET name = $2, description = $3, updated_at = $4 WHERE id = $1 RETURNING {}",
            PLAYLIST_COLUMNS
        );
        Ok(sqlx::query_as::<_, Playlist>(&sql)
            .bind(id)
            .bind(name)
            .bind(description)
            .bind(now())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_playlist(&self, id: Uuid) -> StoreResult<Option<Playlist>> {
        let sql = format!("DELETE FROM playlists WHERE id = $1 RETURNING {}", PLAYLIST_COLUMNS);
        Ok(sqlx::query_as::<_, Playlist>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn add_playlist_video(&self, id: Uuid, video: Uuid) -> StoreResult<Option<Playlist>> {
        let sql = format!(
            "UPDATE playlists SET \
                videos = CASE WHEN $2 = ANY(videos) THEN videos ELSE array_append(videos, $2) END, \
                updated_at = CASE WHEN $2 = ANY(videos) THEN updated_at ELSE $3 END \
             WHERE id = $1 RETURNING {}",
            PLAYLIST_COLUMNS
        );
        Ok(sqlx::query_as::<_, Playlist>(&sql)
            .bind(id)
            .bind(video)
            .bind(now())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn pull_playlist_video(&self, id: Uuid, video: Uuid) -> StoreResult<Option<Playlist>> {
        let sql = format!(
            "UPDATE playlists SET videos = array_remove(videos, $2), updated_at = $3 WHERE id = $1 RETURNING {}",
            PLAYLIST_COLUMNS
        );
        Ok(sqlx::query_as::<_, Playlist>(&sql)
            .bind(id)
            .bind(video)
            .bind(now())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_tweet(&self, owner: Uuid, content: String) -> StoreResult<Tweet> {
        let sql = format!(
            "INSERT INTO tweets (id, content, owner, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) RETURNING {}",
            TWEET_COLUMNS
        );
        let row = sqlx::query_as::<_, Tweet>(&sql)
            .bind(Uuid::new_v4())
            .bind(content)
            .bind(owner)
            .bind(now())
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_tweet(&self, id: Uuid) -> StoreResult<Option<Tweet>> {
        let sql = format!("SELECT {} FROM tweets WHERE id = $1", TWEET_COLUMNS);
        Ok(sqlx::query_as::<_, Tweet>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    async fn tweets_by_owner(&self, owner: Uuid) -> StoreResult<Vec<Tweet>> {
        let sql = format!("SELECT {} FROM tweets WHERE owner = $1 ORDER BY seq ASC", TWEET_COLUMNS);
        Ok(sqlx::query_as::<_, Tweet>(&sql).bind(owner).fetch_all(&self.pool).await?)
    }

    async fn update_tweet(&self, id: Uuid, content: String) -> StoreResult<Option<Tweet>> {
        let sql = format!(
            "UPDATE tweets SET content = $2, updated_at = $3 WHERE id = $1 RETURNING {}",
            TWEET_COLUMNS
        );
        Ok(sqlx::query_as::<_, Tweet>(&sql)
            .bind(id)
            .bind(content)
            .bind(now())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete_tweet(&self, id: Uuid) -> StoreResult<Option<Tweet>> {
        let sql = format!("DELETE FROM tweets WHERE id = $1 RETURNING {}", TWEET_COLUMNS);
        Ok(sqlx::query_as::<_, Tweet>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }
}
