//! Integration tests for the visitor-facing `/public` endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, create_wedding, get, post_auth, post_json_auth,
    upload_photos,
};
use vows_db::models::pricing::PlanChanges;
use vows_db::seed::ensure_pricing_plans;

fn decoded_text(url: &str) -> String {
    let (_, encoded) = url.split_once("?text=").unwrap();
    urlencoding::decode(encoded).unwrap().into_owned()
}

#[tokio::test]
async fn only_published_weddings_are_listed() {
    let test = build_test_app();
    let token = admin_token(&test).await;
    let published = create_wedding(test.app(), &token, "Ana & Pedro").await;
    let draft = create_wedding(test.app(), &token, "Rascunho").await;

    let uri = format!("/api/v1/admin/weddings/{published}/publish");
    assert_eq!(post_auth(test.app(), &uri, &token).await.status(), StatusCode::OK);

    let json = body_json(get(test.app(), "/api/v1/public/weddings").await).await;
    let weddings = json["data"].as_array().unwrap();
    assert_eq!(weddings.len(), 1);
    assert_eq!(weddings[0]["id"], published);
    assert!(weddings[0]["photos"].is_array());

    let response = get(test.app(), &format!("/api/v1/public/weddings/{draft}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn published_wedding_includes_ordered_gallery() {
    let test = build_test_app();
    let token = admin_token(&test).await;
    let id = create_wedding(test.app(), &token, "Ana & Pedro").await;

    let parts = [
        ("one.jpg", "image/jpeg", vec![1u8]),
        ("two.jpg", "image/jpeg", vec![2u8]),
    ];
    assert_eq!(upload_photos(test.app(), id, &parts, &token).await.status(), StatusCode::OK);
    post_auth(test.app(), &format!("/api/v1/admin/weddings/{id}/publish"), &token).await;

    let json = body_json(get(test.app(), &format!("/api/v1/public/weddings/{id}")).await).await;
    let photos = json["data"]["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 2);
    assert_eq!(photos[0]["sort_order"], 0);
    assert_eq!(photos[1]["sort_order"], 1);
    assert_eq!(json["data"]["cover_photo_url"], photos[0]["url"]);
}

#[tokio::test]
async fn pricing_is_grouped_with_plan_links() {
    let test = build_test_app();
    ensure_pricing_plans(test.repos.pricing.as_ref()).await.unwrap();

    // Hide one video plan.
    let plans = test.repos.pricing.list().await.unwrap();
    let hidden = plans.iter().find(|p| p.name == "Vídeo Essencial").unwrap();
    test.repos
        .pricing
        .update(
            hidden.id,
            &PlanChanges {
                is_active: Some(false),
                ..PlanChanges::default()
            },
        )
        .await
        .unwrap();

    let json = body_json(get(test.app(), "/api/v1/public/pricing").await).await;
    let groups = json["data"].as_array().unwrap();
    let categories: Vec<_> = groups.iter().map(|g| g["category"].as_str().unwrap()).collect();
    assert_eq!(categories, ["foto", "video", "combo"]);
    assert_eq!(groups[0]["label"], "Fotografia");
    assert_eq!(groups[1]["plans"].as_array().unwrap().len(), 2);

    let signature = groups[2]["plans"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == "Combo Signature")
        .unwrap();
    assert_eq!(signature["badge"], "Mais escolhido");
    let url = signature["whatsapp_url"].as_str().unwrap();
    assert!(url.starts_with("https://wa.me/5547999990000?text="));
    assert!(decoded_text(url).contains("Combo Signature"));
}

#[tokio::test]
async fn contact_link_defaults_to_general_message() {
    let test = build_test_app();

    let json = body_json(get(test.app(), "/api/v1/public/contact-links").await).await;
    let general = decoded_text(json["data"]["whatsapp_url"].as_str().unwrap());
    assert!(general.contains("gostaria de conversar sobre meu casamento"));

    let json = body_json(get(test.app(), "/api/v1/public/contact-links?plan=Foto%20Cl%C3%A1ssico").await).await;
    let plan = decoded_text(json["data"]["whatsapp_url"].as_str().unwrap());
    assert!(plan.contains("Tenho interesse no Foto Clássico."));
}

#[tokio::test]
async fn videos_expose_youtube_ids() {
    let test = build_test_app();
    let token = admin_token(&test).await;

    let body = serde_json::json!({ "youtube_url": "https://youtu.be/dQw4w9WgXcQ", "title": "Trailer" });
    let response = post_json_auth(test.app(), "/api/v1/admin/videos", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get(test.app(), "/api/v1/public/videos").await).await;
    let video = &json["data"][0];
    assert_eq!(video["youtube_id"], "dQw4w9WgXcQ");
    assert_eq!(
        video["thumbnail_url"],
        "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
    );
    assert_eq!(video["sort_order"], 0);
}

#[tokio::test]
async fn reserved_dates_expose_only_dates() {
    let test = build_test_app();
    let token = admin_token(&test).await;

    for date in ["2025-12-06", "2025-10-11"] {
        let body = serde_json::json!({ "date": date, "couple_names": "Privado", "notes": "sinal pago" });
        let response = post_json_auth(test.app(), "/api/v1/admin/calendar", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(test.app(), "/api/v1/public/reserved-dates").await).await;
    assert_eq!(json["data"], serde_json::json!(["2025-10-11", "2025-12-06"]));
}

#[tokio::test]
async fn blog_post_is_served_by_slug_once_published() {
    let test = build_test_app();
    let token = admin_token(&test).await;

    let body = serde_json::json!({ "title": "Dicas para o Grande Dia!", "content": "..." });
    let response = post_json_auth(test.app(), "/api/v1/admin/blog", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let post = body_json(response).await;
    assert_eq!(post["data"]["slug"], "dicas-para-o-grande-dia");
    let id = post["data"]["id"].as_i64().unwrap();

    let uri = "/api/v1/public/blog/dicas-para-o-grande-dia";
    assert_eq!(get(test.app(), uri).await.status(), StatusCode::NOT_FOUND);

    post_auth(test.app(), &format!("/api/v1/admin/blog/{id}/publish"), &token).await;
    let response = get(test.app(), uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["title"], "Dicas para o Grande Dia!");

    let list = body_json(get(test.app(), "/api/v1/public/blog").await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn explicit_slug_is_served_as_stored() {
    let test = build_test_app();
    let token = admin_token(&test).await;

    let body = serde_json::json!({ "title": "Qualquer", "slug": "Meu Post" });
    let response = post_json_auth(test.app(), "/api/v1/admin/blog", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let post = body_json(response).await;
    assert_eq!(post["data"]["slug"], "Meu Post");
    let id = post["data"]["id"].as_i64().unwrap();
    post_auth(test.app(), &format!("/api/v1/admin/blog/{id}/publish"), &token).await;

    let response = get(test.app(), "/api/v1/public/blog/Meu%20Post").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["title"], "Qualquer");

    let response = get(test.app(), "/api/v1/public/blog/meu-post").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = get(test.app(), "/api/v1/public/stories/nao-existe").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
