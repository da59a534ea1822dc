//! Store tests against a live Postgres. Run with
//! `DATABASE_URL=postgres://... cargo test -- --ignored`.
//! Every test seeds its own users, so a shared database is fine.

use uuid::Uuid;
use videotube_backend::models::{LikeTarget, NewUser, NewVideo, Toggled};
use videotube_backend::pagination::PageParams;
use videotube_backend::query::{SortDirection, SortSpec, VideoQuery, VideoSortField};
use videotube_backend::store::{EntityStore, PgStore};

async fn create_test_store() -> PgStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let store = PgStore::connect(&url, 2).await.expect("Failed to connect");
    store.migrate().await.expect("Failed to run migrations");
    store
}

async fn seed_user(store: &PgStore) -> Uuid {
    let tag = Uuid::new_v4().simple().to_string();
    store
        .insert_user(NewUser {
            username: format!("user_{}", &tag[..12]),
            email: format!("{}@example.com", tag),
            full_name: "Store Tester".to_string(),
            avatar: None,
            cover_image: None,
        })
        .await
        .expect("Failed to insert user")
        .id
}

async fn seed_video(store: &PgStore, owner: Uuid, title: &str, description: &str) -> Uuid {
    store
        .insert_video(
            owner,
            NewVideo {
                video_file: "https://cdn.example.com/v.mp4".to_string(),
                thumbnail: "https://cdn.example.com/v.jpg".to_string(),
                title: title.to_string(),
                description: description.to_string(),
                duration: 42.0,
            },
        )
        .await
        .expect("Failed to insert video")
        .id
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_like_toggle_round_trip() {
    let store = create_test_store().await;
    let owner = seed_user(&store).await;
    let video = seed_video(&store, owner, "Toggle", "").await;
    let target = LikeTarget::Video(video);

    match store.toggle_like(target, owner).await.unwrap() {
        Toggled::Created(like) => {
            assert_eq!(like.target, target);
            assert_eq!(like.liked_by, owner);
        }
        Toggled::Removed => panic!("first toggle must create"),
    }
    assert_eq!(store.toggle_like(target, owner).await.unwrap(), Toggled::Removed);
    assert!(store.liked_videos(owner).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_liked_videos_follow_like_order_and_skip_other_targets() {
    let store = create_test_store().await;
    let owner = seed_user(&store).await;
    let fan = seed_user(&store).await;
    let first = seed_video(&store, owner, "First", "").await;
    let second = seed_video(&store, owner, "Second", "").await;
    let comment = store.insert_comment(first, owner, "pinned".to_string()).await.unwrap();
    let tweet = store.insert_tweet(owner, "out now".to_string()).await.unwrap();

    for target in [
        LikeTarget::Video(second),
        LikeTarget::Comment(comment.id),
        LikeTarget::Tweet(tweet.id),
        LikeTarget::Video(first),
    ] {
        assert!(matches!(store.toggle_like(target, fan).await.unwrap(), Toggled::Created(_)));
    }

    let ids: Vec<Uuid> = store.liked_videos(fan).await.unwrap().iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![second, first]);
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_rollup_branches_are_empty_without_rows() {
    let store = create_test_store().await;
    let owner = seed_user(&store).await;

    let rollup = store.video_rollup(owner).await.unwrap();
    assert_eq!(rollup.total_videos, None);
    assert_eq!(rollup.total_likes, None);
    assert_eq!(store.subscriber_count(owner).await.unwrap(), None);

    let video = seed_video(&store, owner, "Counted", "").await;
    store.record_view(video).await.unwrap();
    store.record_view(video).await.unwrap();

    let rollup = store.video_rollup(owner).await.unwrap();
    assert_eq!(rollup.total_videos, Some(1));
    assert_eq!(rollup.total_views, Some(2));
    assert_eq!(rollup.total_likes, None);
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_video_listing_filters_and_sorts() {
    let store = create_test_store().await;
    let owner = seed_user(&store).await;
    seed_video(&store, owner, "beta", "100% rust").await;
    seed_video(&store, owner, "Alpha", "cooking").await;
    seed_video(&store, owner, "gamma", "RUSTY nails").await;

    let sort = SortSpec {
        field: VideoSortField::Title,
        direction: SortDirection::Asc,
    };
    let query = VideoQuery::new(owner, Some("rust"), Some(sort));
    let params = PageParams::new(Some(1), Some(10)).unwrap();
    let page = store.list_videos(&query, params.window()).await.unwrap();

    assert_eq!(page.total, 2);
    let titles: Vec<_> = page.items.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["beta", "gamma"]);

    // wildcards in the search text are literal
    let query = VideoQuery::new(owner, Some("0%"), None);
    let page = store.list_videos(&query, params.window()).await.unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
#[ignore] // Requires database setup
async fn test_playlist_membership_is_a_set() {
    let store = create_test_store().await;
    let owner = seed_user(&store).await;
    let video = seed_video(&store, owner, "Track", "").await;
    let playlist = store
        .insert_playlist(owner, "Mix".to_string(), "road trip".to_string())
        .await
        .unwrap();

    store.add_playlist_video(playlist.id, video).await.unwrap();
    let after = store.add_playlist_video(playlist.id, video).await.unwrap().unwrap();
    assert_eq!(after.videos, vec![video]);

    let after = store.pull_playlist_video(playlist.id, video).await.unwrap().unwrap();
    assert!(after.videos.is_empty());
}
