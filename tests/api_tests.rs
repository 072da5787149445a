//! API endpoint integration tests

use sanitizer_serving_gateway::{api, config::Settings, sanitizer::EngineRegistry, AppState};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Spawn the gateway on a random port and return its base URL.
async fn spawn_app(settings: Settings) -> String {
    let engines = Arc::new(EngineRegistry::new());
    engines
        .initialize_from_config(&settings.engines)
        .expect("engines register");

    let state = Arc::new(AppState {
        settings: Arc::new(RwLock::new(settings)),
        engines,
    });

    let app = api::routes::create_router(state).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn missing_text_returns_placeholder() {
    let address = spawn_app(Settings::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/default", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(response.text().await.unwrap(), "No text given");
}

#[tokio::test]
async fn empty_text_returns_placeholder() {
    let address = spawn_app(Settings::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/escape", address))
        .query(&[("text", "")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "No text given");
}

#[tokio::test]
async fn demo_route_returns_sanitized_html() {
    let address = spawn_app(Settings::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/default", address))
        .query(&[("text", "<p>hi</p><script>alert(1)</script>")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = response.text().await.unwrap();
    assert!(body.contains("<p>hi</p>"));
    assert!(!body.contains("script"));
}

#[tokio::test]
async fn unknown_engine_returns_404() {
    let address = spawn_app(Settings::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/dompurify", address))
        .query(&[("text", "<b>x</b>")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn oversized_input_rejected() {
    let mut settings = Settings::default();
    settings.limits.max_input_bytes = 16;
    let address = spawn_app(settings).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/default", address))
        .query(&[("text", "<p>well over sixteen bytes of markup</p>")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn json_api_sanitizes_with_named_engine() {
    let address = spawn_app(Settings::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/v1/sanitize", address))
        .json(&serde_json::json!({
            "text": "<a href=\"https://example.com\">x</a>",
            "engine": "mastodon-strict",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["engine"], "mastodon-strict");
    let sanitized = body["sanitized"].as_str().unwrap();
    assert!(sanitized.contains(r#"rel="nofollow noopener noreferrer""#));
    assert!(sanitized.contains(r#"target="_blank""#));
    assert!(body["created"].as_i64().is_some());
}

#[tokio::test]
async fn json_api_unknown_engine_returns_404() {
    let address = spawn_app(Settings::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/v1/sanitize", address))
        .json(&serde_json::json!({ "text": "<b>x</b>", "engine": "bleach" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("bleach"));
}

#[tokio::test]
async fn engines_listing_names_every_builtin() {
    let address = spawn_app(Settings::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/v1/engines", address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let engines = body["engines"].as_array().unwrap();
    assert_eq!(engines.len(), 7);

    let names: Vec<&str> = engines
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    for expected in [
        "default",
        "restricted",
        "ugc",
        "mastodon-strict",
        "mastodon-oembed",
        "escape",
        "strip",
    ] {
        assert!(names.contains(&expected), "missing engine {expected}");
    }

    for engine in engines {
        assert_eq!(engine["enabled"], true, "engine {}", engine["name"]);
    }
}

#[tokio::test]
async fn engines_listing_reports_disabled_engines() {
    let mut settings = Settings::default();
    for engine in &mut settings.engines {
        if engine.name == "strip" {
            engine.enabled = false;
        }
    }
    let address = spawn_app(settings).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/v1/engines", address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    let engines = body["engines"].as_array().unwrap();
    assert_eq!(engines.len(), 7);

    let strip = engines
        .iter()
        .find(|e| e["name"] == "strip")
        .expect("disabled engine stays listed");
    assert_eq!(strip["enabled"], false);
}

#[tokio::test]
async fn health_reports_registered_engines() {
    let address = spawn_app(Settings::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["engines"]["registered"], 7);
}

#[tokio::test]
async fn rate_limit_rejects_burst_overflow() {
    let mut settings = Settings::default();
    settings.rate_limit.enabled = true;
    settings.rate_limit.requests_per_second = 1;
    settings.rate_limit.burst_size = 2;
    let address = spawn_app(settings).await;
    let client = reqwest::Client::new();

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let response = client
            .get(format!("{}/strip", address))
            .query(&[("text", "<b>x</b>")])
            .send()
            .await
            .unwrap();
        statuses.push(response.status().as_u16());
    }

    assert_eq!(&statuses[..2], &[200, 200]);
    assert_eq!(statuses[2], 429);
}

#[tokio::test]
async fn health_is_never_rate_limited() {
    let mut settings = Settings::default();
    settings.rate_limit.enabled = true;
    settings.rate_limit.requests_per_second = 1;
    settings.rate_limit.burst_size = 1;
    let address = spawn_app(settings).await;
    let client = reqwest::Client::new();

    for _ in 0..5 {
        let response = client
            .get(format!("{}/health", address))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }
}

#[tokio::test]
async fn disabled_engine_route_is_404() {
    let mut settings = Settings::default();
    for engine in &mut settings.engines {
        if engine.name == "ugc" {
            engine.enabled = false;
        }
    }
    let address = spawn_app(settings).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/ugc", address))
        .query(&[("text", "<b>x</b>")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}
