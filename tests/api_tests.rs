use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{get, post, request, test_app};

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app().await;
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fittrack-api");
}

#[tokio::test]
async fn today_stats_start_at_zero() {
    let app = test_app().await;
    let (status, body) = get(&app, "/api/stats/today").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["steps"], 0);
    assert_eq!(body["calories"], 0);
    assert_eq!(body["active_minutes"], 0);
}

#[tokio::test]
async fn activities_sum_into_today_stats() {
    let app = test_app().await;

    for calories in [100, 200, 150] {
        let (status, _) = post(
            &app,
            "/api/activities",
            json!({
                "kind": "walking",
                "name": "Walk",
                "duration_min": 20,
                "calories": calories,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = get(&app, "/api/stats/today").await;
    assert_eq!(body["calories"], 450);
    assert_eq!(body["active_minutes"], 60);
}

#[tokio::test]
async fn streak_is_zero_without_today_activity() {
    let app = test_app().await;
    let (status, body) = get(&app, "/api/stats/streak").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["streak_days"], 0);
}

#[tokio::test]
async fn streak_counts_today() {
    let app = test_app().await;
    post(
        &app,
        "/api/activities",
        json!({"kind": "running", "name": "Run", "duration_min": 30}),
    )
    .await;

    let (_, body) = get(&app, "/api/stats/streak").await;
    assert_eq!(body["streak_days"], 1);
}

#[tokio::test]
async fn sleep_average_on_empty_log_is_zero() {
    let app = test_app().await;
    let (status, body) = get(&app, "/api/sleep/average").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["average_hours"], 0.0);
    assert_eq!(body["window_days"], 7);
}

#[tokio::test]
async fn water_increments_in_place() {
    let app = test_app().await;

    let (status, body) = post(&app, "/api/water", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["glasses"], 1);
    assert_eq!(body["goal"], 8);

    let (_, body) = post(&app, "/api/water", json!({})).await;
    assert_eq!(body["glasses"], 2);
    assert_eq!(body["goal"], 8);

    let (_, body) = get(&app, "/api/water/today").await;
    assert_eq!(body["glasses"], 2);
}

#[tokio::test]
async fn weight_trend_is_earliest_minus_latest() {
    let app = test_app().await;

    post(
        &app,
        "/api/weight",
        json!({"weight_kg": 80.0, "date": "2026-01-01"}),
    )
    .await;
    post(
        &app,
        "/api/weight",
        json!({"weight_kg": 75.0, "date": "2026-01-10"}),
    )
    .await;

    let (status, body) = get(&app, "/api/weight/trend").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entry_count"], 2);
    assert_eq!(body["start_kg"], 80.0);
    assert_eq!(body["current_kg"], 75.0);
    assert_eq!(body["loss_kg"], 5.0);
}

#[tokio::test]
async fn steps_badge_earned_at_threshold_and_kept() {
    let app = test_app().await;

    post(
        &app,
        "/api/activities",
        json!({
            "kind": "walking",
            "name": "Long walk",
            "duration_min": 90,
            "steps": 10000,
        }),
    )
    .await;

    let (_, body) = get(&app, "/api/badges").await;
    let badges = body.as_array().expect("badge array");
    assert_eq!(badges.len(), 8);
    let step_master = badges
        .iter()
        .find(|b| b["id"] == "step-master")
        .expect("step-master badge");
    assert_eq!(step_master["earned"], true);
    assert!(step_master["earned_date"].is_string());

    // a later re-check earns nothing new and revokes nothing
    let (_, body) = post(&app, "/api/badges/check", json!(null)).await;
    assert!(body["newly_earned"].as_array().expect("array").is_empty());
    let badge = body["badges"]
        .as_array()
        .expect("array")
        .iter()
        .find(|b| b["id"] == "step-master")
        .expect("step-master badge")
        .clone();
    assert_eq!(badge["earned"], true);
}

#[tokio::test]
async fn goal_progress_is_clamped() {
    let app = test_app().await;

    post(
        &app,
        "/api/activities",
        json!({"kind": "running", "name": "Run", "duration_min": 30, "calories": 450}),
    )
    .await;

    // overshoot: 450 of 100 clamps to 100%
    post(
        &app,
        "/api/goals",
        json!({
            "kind": "daily_calories",
            "title": "Burn 100",
            "target_value": 100.0,
            "unit": "kcal",
        }),
    )
    .await;
    // partial: 450 of 1000 is 45%
    post(
        &app,
        "/api/goals",
        json!({
            "kind": "daily_calories",
            "title": "Burn 1000",
            "target_value": 1000.0,
            "unit": "kcal",
        }),
    )
    .await;

    let (status, body) = get(&app, "/api/goals/progress").await;
    assert_eq!(status, StatusCode::OK);
    let progress = body.as_array().expect("progress array");
    assert_eq!(progress.len(), 2);

    let overshoot = progress
        .iter()
        .find(|p| p["title"] == "Burn 100")
        .expect("overshoot goal");
    assert_eq!(overshoot["percentage"], 100.0);

    let partial = progress
        .iter()
        .find(|p| p["title"] == "Burn 1000")
        .expect("partial goal");
    assert_eq!(partial["percentage"], 45.0);
}

#[tokio::test]
async fn workout_session_logs_activity_and_bumps_plan() {
    let app = test_app().await;

    let (_, plan) = post(
        &app,
        "/api/workouts",
        json!({
            "name": "Leg day",
            "exercises": [
                {"name": "Squats", "sets": 3, "reps": 12}
            ],
        }),
    )
    .await;
    let plan_id = plan["id"].as_str().expect("plan id").to_string();

    let (status, session) = post(
        &app,
        &format!("/api/workouts/{plan_id}/sessions"),
        json!({"duration_min": 40}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["duration_min"], 40);

    let (_, plan) = get(&app, &format!("/api/workouts/{plan_id}")).await;
    assert_eq!(plan["completed_count"], 1);
    assert!(plan["last_completed"].is_string());

    // the completed session shows up as a logged activity
    let (_, activities) = get(&app, "/api/activities").await;
    let activities = activities.as_array().expect("activities");
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0]["kind"], "gym");
    assert_eq!(activities[0]["name"], "Leg day");
}

#[tokio::test]
async fn group_chat_round_trip() {
    let app = test_app().await;

    let (_, group) = post(
        &app,
        "/api/groups",
        json!({"name": "Morning crew"}),
    )
    .await;
    let group_id = group["id"].as_str().expect("group id").to_string();

    let (status, message) = post(
        &app,
        "/api/groups/messages",
        json!({"group_id": group_id, "content": "First!"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["content"], "First!");

    let (_, messages) = get(&app, &format!("/api/groups/messages?group_id={group_id}")).await;
    assert_eq!(messages.as_array().expect("messages").len(), 1);

    // a message must target a group or a recipient, not both or neither
    let (status, _) = post(&app, "/api/groups/messages", json!({"content": "nowhere"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn seed_populates_and_refuses_second_run() {
    let app = test_app().await;

    let (status, body) = post(&app, "/api/seed", json!(null)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["seeded"], true);

    let (_, badges) = get(&app, "/api/badges").await;
    assert_eq!(badges.as_array().expect("badges").len(), 8);

    let (_, groups) = get(&app, "/api/groups").await;
    assert_eq!(groups.as_array().expect("groups").len(), 1);

    let (status, _) = post(&app, "/api/seed", json!(null)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // reset is allowed and reseeds
    let (status, _) = post(&app, "/api/seed/reset", json!(null)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn seeded_challenge_has_full_leaderboard() {
    let app = test_app().await;
    post(&app, "/api/seed", json!(null)).await;

    let (_, challenges) = get(&app, "/api/groups/challenges").await;
    let challenges = challenges.as_array().expect("challenges");
    assert_eq!(challenges.len(), 1);
    let challenge_id = challenges[0]["id"].as_str().expect("challenge id");

    let (status, standings) = get(
        &app,
        &format!("/api/groups/challenges/{challenge_id}/leaderboard"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let standings = standings.as_array().expect("standings");
    assert_eq!(standings.len(), 3);
    let ranks: Vec<u64> = standings
        .iter()
        .map(|e| e["rank"].as_u64().expect("rank"))
        .collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    // sorted descending by value
    let values: Vec<f64> = standings
        .iter()
        .map(|e| e["value"].as_f64().expect("value"))
        .collect();
    assert!(values[0] >= values[1] && values[1] >= values[2]);
}

#[tokio::test]
async fn mood_today_is_latest_entry() {
    let app = test_app().await;

    let (_, body) = get(&app, "/api/moods/today").await;
    assert!(body.is_null());

    post(
        &app,
        "/api/moods",
        json!({"emoji": "😐", "label": "Okay"}),
    )
    .await;
    post(
        &app,
        "/api/moods",
        json!({"emoji": "😊", "label": "Good"}),
    )
    .await;

    let (_, body) = get(&app, "/api/moods/today").await;
    assert_eq!(body["label"], "Good");
}

#[tokio::test]
async fn reminder_settings_drive_schedule() {
    let app = test_app().await;

    let (status, settings) = get(&app, "/api/reminders/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["interval_min"], 60);

    // disabling clears the pending set
    let (status, settings) = request(
        &app,
        "PUT",
        "/api/reminders/settings",
        Some(json!({"enabled": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["enabled"], false);

    let (_, scheduled) = get(&app, "/api/reminders/scheduled").await;
    assert!(scheduled.as_array().expect("scheduled").is_empty());

    // a window that ends before it starts is rejected
    let (status, _) = request(
        &app,
        "PUT",
        "/api/reminders/settings",
        Some(json!({"start_time": "22:00:00", "end_time": "06:00:00"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn invalid_activity_is_rejected() {
    let app = test_app().await;

    let (status, body) = post(
        &app,
        "/api/activities",
        json!({"kind": "running", "name": "", "duration_min": 30}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]["message"].is_string());

    let (status, _) = post(
        &app,
        "/api/activities",
        json!({"kind": "running", "name": "Run", "duration_min": 0}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
