//! Integration tests for the back-office dashboard summary.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, build_test_app, create_wedding, get_auth, post_json, post_json_auth, put_json_auth};

#[tokio::test]
async fn empty_dashboard() {
    let test = build_test_app();
    let token = admin_token(&test).await;

    let response = get_auth(test.app(), "/api/v1/admin/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["counts"]["weddings"], 0);
    assert_eq!(json["data"]["counts"]["total_quotes"], 0);
    assert!(json["data"]["recent_quotes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn counts_by_status_and_five_most_recent() {
    let test = build_test_app();
    let token = admin_token(&test).await;
    create_wedding(test.app(), &token, "Ana & Pedro").await;
    post_json_auth(test.app(), "/api/v1/admin/calendar", serde_json::json!({ "date": "2026-01-10" }), &token).await;

    let mut ids = Vec::new();
    for i in 0..7 {
        let body = serde_json::json!({
            "name": format!("Cliente {i}"),
            "phone": "47 9999",
            "date": "2026",
            "city": "Joinville",
        });
        let json = body_json(post_json(test.app(), "/api/v1/public/quotes", body).await).await;
        ids.push(json["data"]["quote"]["id"].as_i64().unwrap());
    }

    for (id, status) in [(ids[0], "closed"), (ids[1], "lost"), (ids[2], "in_conversation")] {
        let uri = format!("/api/v1/admin/quotes/{id}/status");
        put_json_auth(test.app(), &uri, serde_json::json!({ "status": status }), &token).await;
    }

    let json = body_json(get_auth(test.app(), "/api/v1/admin/dashboard", &token).await).await;
    let counts = &json["data"]["counts"];
    assert_eq!(counts["weddings"], 1);
    assert_eq!(counts["reserved_dates"], 1);
    assert_eq!(counts["total_quotes"], 7);
    assert_eq!(counts["new_quotes"], 4);
    assert_eq!(counts["in_conversation_quotes"], 1);
    assert_eq!(counts["closed_quotes"], 1);
    assert_eq!(counts["lost_quotes"], 1);

    let recent = json["data"]["recent_quotes"].as_array().unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0]["name"], "Cliente 6");
    assert_eq!(recent[0]["status_label"], "Novo");
}
