use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use fittrack_api::config::Config;
use fittrack_api::db::Store;
use fittrack_api::{app, AppState};

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: "http://localhost:3000".into(),
        daily_step_goal: 10000,
        daily_water_goal: 8,
        daily_calorie_goal: 500,
        notifications_enabled: true,
        reminder_interval_min: 60,
        reminder_start: "09:00".into(),
        reminder_end: "21:00".into(),
        seed_on_empty: false,
    }
}

/// Router over a fresh in-memory store. One connection so every request sees
/// the same database.
pub async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let state = AppState::new(Store::new(pool), Arc::new(test_config()));
    app(state)
}

pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    request(app, "GET", uri, None).await
}

pub async fn post(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request(app, "POST", uri, Some(body)).await
}
