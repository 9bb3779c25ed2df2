use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use ocean_badges::profile::ItemCatalog;
use ocean_badges::results::{
    result_router, InMemoryResultStore, ResultPolicy, ResultService, SlidingWindowLimiter,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app(limit: u32) -> axum::Router {
    let catalog = Arc::new(ItemCatalog::standard().expect("bundled catalog parses"));
    let service = ResultService::new(
        catalog,
        Arc::new(InMemoryResultStore::default()),
        Arc::new(SlidingWindowLimiter::new(limit, Duration::from_secs(3600))),
        ResultPolicy::default(),
    );
    result_router(Arc::new(service), "https://ocean.example")
}

fn submission() -> Value {
    // Agree with every item: direct items max out, reversed ones bottom out.
    let answers: Vec<Value> = (1..=50)
        .map(|number| json!({ "itemId": format!("q{number}"), "value": 5 }))
        .collect();
    json!({ "answers": answers })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn submitted_result_is_readable_and_embeddable() {
    let app = app(5);

    let created = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/results")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-real-ip", "192.0.2.10")
                .body(Body::from(submission().to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["id"]
        .as_str()
        .expect("id present")
        .to_string();

    let view = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/results/{id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(view.status(), StatusCode::OK);
    let view = body_json(view).await;
    let traits = view["traits"].as_array().expect("traits array");
    assert_eq!(traits.len(), 5);
    for entry in traits {
        let percent = entry["percent"].as_f64().expect("percent number");
        assert!((0.0..=100.0).contains(&percent));
        assert!(entry["interpretation"]["title"].is_string());
        assert!(entry["visuals"]["icon"]["emoji"].is_string());
    }

    let badge = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/badges/{id}.svg"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(badge.status(), StatusCode::OK);
    let markup = to_bytes(badge.into_body(), usize::MAX)
        .await
        .expect("body collects");
    let markup = String::from_utf8(markup.to_vec()).expect("utf-8 svg");
    assert!(markup.contains("<svg"));
    assert!(markup.contains("Big Five Profile"));

    let embed = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/badges/{id}/embed"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(embed.status(), StatusCode::OK);
    let embed = body_json(embed).await;
    assert_eq!(
        embed["profile_url"],
        json!(format!("https://ocean.example/result/{id}"))
    );
}

#[tokio::test]
async fn too_few_answers_are_rejected() {
    let response = app(5)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/results")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "answers": [{ "id": "q1", "score": 4 }] }).to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}
