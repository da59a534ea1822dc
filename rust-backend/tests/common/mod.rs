#![allow(dead_code)]

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{http, test, web, App};
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use videotube_backend::models::{Claims, NewUser, NewVideo, User, Video};
use videotube_backend::store::{EntityStore, MemoryStore};
use videotube_backend::{handlers, AppState};

pub const TEST_SECRET: &str = "test_jwt_secret";

/// Builds the full app over a fresh in-memory store. The store handle is
/// returned so tests can seed rows the HTTP surface cannot create (users).
pub async fn setup_test_app() -> (
    impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    Arc<MemoryStore>,
) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), TEST_SECRET);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(handlers::configure_routes),
    )
    .await;

    (app, store)
}

pub async fn create_user(store: &MemoryStore, username: &str) -> User {
    store
        .insert_user(NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            full_name: format!("{} Tester", username),
            avatar: None,
            cover_image: None,
        })
        .await
        .unwrap()
}

pub fn token_for(user_id: Uuid) -> String {
    let claims = Claims {
        user_id,
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_ref()),
    )
    .unwrap()
}

pub fn bearer(user_id: Uuid) -> (http::header::HeaderName, String) {
    (http::header::AUTHORIZATION, format!("Bearer {}", token_for(user_id)))
}

/// Seeds a video directly and plays it `views` times.
pub async fn create_video(store: &MemoryStore, owner: Uuid, title: &str, description: &str, views: u32) -> Video {
    let mut video = store
        .insert_video(
            owner,
            NewVideo {
                video_file: format!("https://cdn.example.com/{}.mp4", Uuid::new_v4()),
                thumbnail: format!("https://cdn.example.com/{}.jpg", Uuid::new_v4()),
                title: title.to_string(),
                description: description.to_string(),
                duration: 60.0,
            },
        )
        .await
        .unwrap();

    for _ in 0..views {
        video = store.record_view(video.id).await.unwrap().unwrap();
    }
    video
}
