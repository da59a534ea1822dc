use actix_web::{http, test};
use serde_json::{json, Value};
use videotube_backend::store::EntityStore;

mod common;
use common::{bearer, create_user, create_video, setup_test_app};

#[actix_web::test]
async fn test_comment_listing_paginates() {
    let (app, store) = setup_test_app().await;
    let alice = create_user(&store, "alice").await;
    let video = create_video(&store, alice.id, "Rust intro", "ownership basics", 0).await;

    for i in 0..25 {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/comments/{}", video.id))
            .insert_header(bearer(alice.id))
            .set_json(json!({ "content": format!("comment {}", i) }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/comments/{}?page=3&limit=10", video.id))
        .insert_header(bearer(alice.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), http::StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let data = &body["data"];
    assert_eq!(data["results"].as_array().unwrap().len(), 5);
    assert_eq!(data["results"][0]["content"], "comment 20");
    assert_eq!(data["totalDocs"], 25);
    assert_eq!(data["totalPages"], 3);
    assert_eq!(data["currentPage"], 3);
    assert_eq!(data["hasNextPage"], false);
    assert_eq!(data["hasPrevPage"], true);
    assert_eq!(data["nextPage"], Value::Null);
    assert_eq!(data["prevPage"], 2);
}

#[actix_web::test]
async fn test_empty_comment_listing_is_an_empty_page() {
    let (app, store) = setup_test_app().await;
    let alice = create_user(&store, "alice").await;
    let video = create_video(&store, alice.id, "Quiet video", "nobody talks", 0).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/comments/{}", video.id))
        .insert_header(bearer(alice.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), http::StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["results"], json!([]));
    assert_eq!(body["data"]["totalDocs"], 0);
    assert_eq!(body["data"]["totalPages"], 0);
    assert_eq!(body["data"]["hasNextPage"], false);
}

#[actix_web::test]
async fn test_page_past_the_end_keeps_totals() {
    let (app, store) = setup_test_app().await;
    let alice = create_user(&store, "alice").await;
    let video = create_video(&store, alice.id, "Short thread", "", 0).await;
    store.insert_comment(video.id, alice.id, "only one".to_string()).await.unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/comments/{}?page=4&limit=2", video.id))
        .insert_header(bearer(alice.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["results"], json!([]));
    assert_eq!(body["data"]["totalDocs"], 1);
    assert_eq!(body["data"]["totalPages"], 1);
    assert_eq!(body["data"]["prevPage"], 3);
}

#[actix_web::test]
async fn test_comment_listing_rejects_bad_input() {
    let (app, store) = setup_test_app().await;
    let alice = create_user(&store, "alice").await;
    let video = create_video(&store, alice.id, "Rust intro", "", 0).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/comments/{}?page=0", video.id))
        .insert_header(bearer(alice.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/comments/not-a-uuid")
        .insert_header(bearer(alice.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["message"], "Invalid video id");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/comments/{}", uuid::Uuid::new_v4()))
        .insert_header(bearer(alice.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_blank_comment_is_rejected() {
    let (app, store) = setup_test_app().await;
    let alice = create_user(&store, "alice").await;
    let video = create_video(&store, alice.id, "Rust intro", "", 0).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/comments/{}", video.id))
        .insert_header(bearer(alice.id))
        .set_json(json!({ "content": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_only_the_author_can_edit_a_comment() {
    let (app, store) = setup_test_app().await;
    let alice = create_user(&store, "alice").await;
    let bob = create_user(&store, "bob").await;
    let video = create_video(&store, alice.id, "Rust intro", "", 0).await;
    let comment = store
        .insert_comment(video.id, alice.id, "first!".to_string())
        .await
        .unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/comments/c/{}", comment.id))
        .insert_header(bearer(bob.id))
        .set_json(json!({ "content": "hijacked" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), http::StatusCode::FORBIDDEN);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/comments/c/{}", comment.id))
        .insert_header(bearer(alice.id))
        .set_json(json!({ "content": "edited" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["content"], "edited");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/comments/c/{}", comment.id))
        .insert_header(bearer(bob.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), http::StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/comments/c/{}", comment.id))
        .insert_header(bearer(alice.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), http::StatusCode::OK);
    assert!(store.find_comment(comment.id).await.unwrap().is_none());
}
