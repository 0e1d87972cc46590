//! Integration tests for back-office content: blog posts, stories, videos,
//! reserved dates and pricing plans.

mod common;

use axum::body::Body;
use axum::http::{Response, StatusCode};
use common::{
    admin_token, body_json, build_test_app, delete_auth, get, get_auth, post_auth, post_json_auth,
    put_json_auth,
};
use vows_db::seed::ensure_pricing_plans;

async fn create_post(app: axum::Router, token: &str, body: serde_json::Value) -> Response<Body> {
    post_json_auth(app, "/api/v1/admin/blog", body, token).await
}

#[tokio::test]
async fn explicit_slug_wins_and_duplicates_conflict() {
    let test = build_test_app();
    let token = admin_token(&test).await;

    let response = create_post(
        test.app(),
        &token,
        serde_json::json!({ "title": "Qualquer coisa", "slug": "meu-post" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["slug"], "meu-post");

    let response = create_post(test.app(), &token, serde_json::json!({ "title": "Meu Post" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[tokio::test]
async fn explicit_slug_is_stored_without_reshaping() {
    let test = build_test_app();
    let token = admin_token(&test).await;

    for slug in ["Meu Post", " espaços ", "   "] {
        let body = serde_json::json!({ "title": "Casamento", "slug": slug });
        let response = post_json_auth(test.app(), "/api/v1/admin/stories", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED, "{slug:?}");
        assert_eq!(body_json(response).await["data"]["slug"], slug);
    }
}

#[tokio::test]
async fn title_without_slug_characters_is_rejected() {
    let test = build_test_app();
    let token = admin_token(&test).await;

    let response = create_post(test.app(), &token, serde_json::json!({ "title": "!!!" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = create_post(test.app(), &token, serde_json::json!({ "title": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blog_publish_stamps_once_and_keeps_stamp() {
    let test = build_test_app();
    let token = admin_token(&test).await;

    let response = create_post(test.app(), &token, serde_json::json!({ "title": "Primeiro Post" })).await;
    let post = body_json(response).await;
    assert!(post["data"]["published_at"].is_null());
    let id = post["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/admin/blog/{id}/publish");

    let published = body_json(post_auth(test.app(), &uri, &token).await).await;
    assert_eq!(published["data"]["is_published"], true);
    let stamp = published["data"]["published_at"].clone();
    assert!(stamp.is_string());

    let unpublished = body_json(post_auth(test.app(), &uri, &token).await).await;
    assert_eq!(unpublished["data"]["is_published"], false);
    assert_eq!(unpublished["data"]["published_at"], stamp);
}

#[tokio::test]
async fn blog_post_can_be_deleted() {
    let test = build_test_app();
    let token = admin_token(&test).await;
    let response = create_post(test.app(), &token, serde_json::json!({ "title": "Apagar" })).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let uri = format!("/api/v1/admin/blog/{id}");
    assert_eq!(delete_auth(test.app(), &uri, &token).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete_auth(test.app(), &uri, &token).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stories_follow_publish_flag() {
    let test = build_test_app();
    let token = admin_token(&test).await;

    let body = serde_json::json!({
        "title": "Ana & Pedro em Pomerode",
        "city": "Pomerode",
        "content": "Uma tarde de outono.",
    });
    let response = post_json_auth(test.app(), "/api/v1/admin/stories", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let story = body_json(response).await;
    assert_eq!(story["data"]["slug"], "ana-pedro-em-pomerode");
    let id = story["data"]["id"].as_i64().unwrap();

    let public_uri = "/api/v1/public/stories/ana-pedro-em-pomerode";
    assert_eq!(get(test.app(), public_uri).await.status(), StatusCode::NOT_FOUND);

    let uri = format!("/api/v1/admin/stories/{id}/publish");
    let json = body_json(post_auth(test.app(), &uri, &token).await).await;
    assert_eq!(json["data"]["is_published"], true);

    let response = get(test.app(), public_uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["city"], "Pomerode");

    let json = body_json(get_auth(test.app(), "/api/v1/admin/stories", &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn videos_append_and_delete() {
    let test = build_test_app();
    let token = admin_token(&test).await;

    let response = post_json_auth(test.app(), "/api/v1/admin/videos", serde_json::json!({ "youtube_url": " " }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    for url in [
        "https://www.youtube.com/watch?v=aaaaaaaaaaa",
        "https://www.youtube.com/shorts/bbbbbbbbbbb",
    ] {
        let response = post_json_auth(test.app(), "/api/v1/admin/videos", serde_json::json!({ "youtube_url": url }), &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get_auth(test.app(), "/api/v1/admin/videos", &token).await).await;
    let videos = json["data"].as_array().unwrap();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[1]["sort_order"], 1);
    assert_eq!(videos[1]["youtube_id"], "bbbbbbbbbbb");

    let uri = format!("/api/v1/admin/videos/{}", videos[0]["id"]);
    assert_eq!(delete_auth(test.app(), &uri, &token).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete_auth(test.app(), &uri, &token).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reserving_a_date_twice_conflicts() {
    let test = build_test_app();
    let token = admin_token(&test).await;
    let body = serde_json::json!({ "date": "2026-05-16" });

    let response = post_json_auth(test.app(), "/api/v1/admin/calendar", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(test.app(), "/api/v1/admin/calendar", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let uri = format!("/api/v1/admin/calendar/{id}");
    assert_eq!(delete_auth(test.app(), &uri, &token).await.status(), StatusCode::NO_CONTENT);
    let json = body_json(get_auth(test.app(), "/api/v1/admin/calendar", &token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn pricing_update_accepts_feature_text() {
    let test = build_test_app();
    let token = admin_token(&test).await;
    ensure_pricing_plans(test.repos.pricing.as_ref()).await.unwrap();

    let json = body_json(get_auth(test.app(), "/api/v1/admin/pricing", &token).await).await;
    let plans = json["data"].as_array().unwrap();
    assert_eq!(plans.len(), 8);
    let id = plans[0]["id"].as_i64().unwrap();

    let uri = format!("/api/v1/admin/pricing/{id}");
    let body = serde_json::json!({
        "price": "R$ 4.900",
        "features": "Cobertura de 8h\n\n  Álbum 30x30  \n",
        "is_active": false,
    });
    let response = put_json_auth(test.app(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let plan = body_json(response).await;
    assert_eq!(plan["data"]["price"], "R$ 4.900");
    assert_eq!(plan["data"]["features"], serde_json::json!(["Cobertura de 8h", "Álbum 30x30"]));
    assert_eq!(plan["data"]["is_active"], false);

    let response = put_json_auth(test.app(), "/api/v1/admin/pricing/9999", serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
