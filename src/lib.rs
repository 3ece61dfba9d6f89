pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use config::Config;
use db::Store;
use services::reminders::ReminderScheduler;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<Config>,
    pub ws_tx: Option<broadcast::Sender<String>>,
    pub reminders: ReminderScheduler,
}

impl AppState {
    pub fn new(store: Store, config: Arc<Config>) -> Self {
        let (ws_tx, _) = broadcast::channel::<String>(256);
        Self {
            store,
            config,
            ws_tx: Some(ws_tx),
            reminders: ReminderScheduler::new(),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/ws", get(handlers::ws::ws_handler))
        // Profile
        .route("/api/profile", get(handlers::profile::get_profile))
        .route("/api/profile", put(handlers::profile::update_profile))
        // Activities
        .route("/api/activities", post(handlers::activities::create_activity))
        .route("/api/activities", get(handlers::activities::list_activities))
        .route("/api/activities/:id", get(handlers::activities::get_activity))
        // Stats
        .route("/api/stats/today", get(handlers::stats::get_today_stats))
        .route("/api/stats/streak", get(handlers::stats::get_streak))
        .route("/api/stats/daily", get(handlers::stats::get_daily_stats))
        .route(
            "/api/stats/weekly-summary",
            get(handlers::stats::get_weekly_summary),
        )
        // Water
        .route("/api/water/today", get(handlers::water::get_today_water))
        .route("/api/water", post(handlers::water::add_water))
        // Weight
        .route("/api/weight", post(handlers::weight::create_weight_entry))
        .route("/api/weight", get(handlers::weight::list_weight_entries))
        .route("/api/weight/trend", get(handlers::weight::get_weight_trend))
        // Moods
        .route("/api/moods", post(handlers::moods::create_mood))
        .route("/api/moods", get(handlers::moods::list_moods))
        .route("/api/moods/today", get(handlers::moods::get_today_mood))
        // Sleep
        .route("/api/sleep", post(handlers::sleep::create_sleep_entry))
        .route("/api/sleep", get(handlers::sleep::list_sleep_entries))
        .route("/api/sleep/average", get(handlers::sleep::get_sleep_average))
        // Badges
        .route("/api/badges", get(handlers::badges::list_badges))
        .route("/api/badges/check", post(handlers::badges::check_badges))
        // Goals
        .route("/api/goals", post(handlers::goals::create_goal))
        .route("/api/goals", get(handlers::goals::list_goals))
        .route("/api/goals/progress", get(handlers::goals::get_goal_progress))
        .route("/api/goals/:id", put(handlers::goals::update_goal))
        .route("/api/goals/:id", delete(handlers::goals::delete_goal))
        // Workouts
        .route("/api/workouts", post(handlers::workouts::create_plan))
        .route("/api/workouts", get(handlers::workouts::list_plans))
        .route("/api/workouts/sessions", get(handlers::workouts::list_sessions))
        .route("/api/workouts/:id", get(handlers::workouts::get_plan))
        .route("/api/workouts/:id", put(handlers::workouts::update_plan))
        .route("/api/workouts/:id", delete(handlers::workouts::delete_plan))
        .route(
            "/api/workouts/:id/sessions",
            post(handlers::workouts::record_session),
        )
        // Groups, chat and challenges
        .route("/api/groups", post(handlers::groups::create_group))
        .route("/api/groups", get(handlers::groups::list_groups))
        .route("/api/groups/messages", post(handlers::groups::send_message))
        .route("/api/groups/messages", get(handlers::groups::list_messages))
        .route(
            "/api/groups/challenges",
            post(handlers::groups::create_challenge),
        )
        .route(
            "/api/groups/challenges",
            get(handlers::groups::list_challenges),
        )
        .route(
            "/api/groups/challenges/:id/leaderboard",
            get(handlers::groups::get_leaderboard),
        )
        .route("/api/groups/:id", get(handlers::groups::get_group))
        .route("/api/groups/:id/join", post(handlers::groups::join_group))
        .route("/api/groups/:id/leave", post(handlers::groups::leave_group))
        // Movement reminders
        .route(
            "/api/reminders/settings",
            get(handlers::reminders::get_settings),
        )
        .route(
            "/api/reminders/settings",
            put(handlers::reminders::update_settings),
        )
        .route(
            "/api/reminders/scheduled",
            get(handlers::reminders::list_scheduled),
        )
        // Seed (mocked backend data)
        .route("/api/seed", post(handlers::seed::seed))
        .route("/api/seed/reset", post(handlers::seed::reset))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let mut origins: Vec<axum::http::HeaderValue> = Vec::new();
    match config.frontend_url.parse::<axum::http::HeaderValue>() {
        Ok(hv) => origins.push(hv),
        Err(_) => tracing::warn!(url = %config.frontend_url, "Invalid FRONTEND_URL, skipping CORS origin"),
    }
    // In dev, also allow LAN access (e.g. testing from another device)
    if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
        for o in extra.split(',') {
            if let Ok(hv) = o.trim().parse::<axum::http::HeaderValue>() {
                origins.push(hv);
            }
        }
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}
