use actix_web::{http, test};
use serde_json::{json, Value};
use uuid::Uuid;

mod common;
use common::{bearer, create_user, setup_test_app};

#[actix_web::test]
async fn test_tweet_lifecycle() {
    let (app, store) = setup_test_app().await;
    let alice = create_user(&store, "alice").await;
    let bob = create_user(&store, "bob").await;

    let mut ids = Vec::new();
    for content in ["first post", "second post"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/tweets")
            .insert_header(bearer(alice.id))
            .set_json(json!({ "content": content }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), http::StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tweets/user/{}", alice.id))
        .insert_header(bearer(bob.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let tweets = body["data"].as_array().unwrap();
    assert_eq!(tweets.len(), 2);
    assert_eq!(tweets[0]["content"], "first post");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/tweets/{}", ids[0]))
        .insert_header(bearer(bob.id))
        .set_json(json!({ "content": "not yours" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), http::StatusCode::FORBIDDEN);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/tweets/{}", ids[0]))
        .insert_header(bearer(alice.id))
        .set_json(json!({ "content": "first post (edited)" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["content"], "first post (edited)");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/tweets/{}", ids[1]))
        .insert_header(bearer(alice.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), http::StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tweets/user/{}", alice.id))
        .insert_header(bearer(alice.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_tweet_validation() {
    let (app, store) = setup_test_app().await;
    let alice = create_user(&store, "alice").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/tweets")
        .insert_header(bearer(alice.id))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Content is required");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tweets/user/{}", Uuid::new_v4()))
        .insert_header(bearer(alice.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/tweets/{}", Uuid::new_v4()))
        .insert_header(bearer(alice.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);
}
