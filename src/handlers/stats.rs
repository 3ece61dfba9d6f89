use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use crate::db::StoreKey;
use crate::dto::{DateRangeQuery, StreakResponse, WeeklySummary};
use crate::error::AppResult;
use crate::models::activity::Activity;
use crate::models::stats::DailyStats;
use crate::services::stats;
use crate::AppState;

pub async fn get_today_stats(State(state): State<AppState>) -> AppResult<Json<DailyStats>> {
    let daily: Vec<DailyStats> = state.store.read_vec(StoreKey::DailyStats).await?;
    let today = Utc::now().date_naive();
    Ok(Json(stats::today_stats(&daily, today)))
}

pub async fn get_streak(State(state): State<AppState>) -> AppResult<Json<StreakResponse>> {
    let activities = own_activities(&state).await?;
    let today = Utc::now().date_naive();
    Ok(Json(StreakResponse {
        streak_days: stats::activity_streak(&activities, today),
    }))
}

/// The local user's log. Group members' mocked activities stay out of
/// personal aggregates; only challenge standings read them.
pub(crate) async fn own_activities(state: &AppState) -> AppResult<Vec<Activity>> {
    let profile = crate::handlers::profile::ensure_profile(state).await?;
    let mut activities: Vec<Activity> = state.store.read_vec(StoreKey::Activities).await?;
    activities.retain(|a| a.user_id == profile.id);
    Ok(activities)
}

/// Daily aggregates over a date range, zero-filled for days without logs so
/// chart rows line up.
pub async fn get_daily_stats(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<DailyStats>>> {
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());
    let start = query
        .start_date
        .unwrap_or_else(|| end - chrono::Duration::days(30));

    let daily: Vec<DailyStats> = state.store.read_vec(StoreKey::DailyStats).await?;

    let mut rows = Vec::new();
    let mut date = start;
    while date <= end {
        rows.push(stats::today_stats(&daily, date));
        date += chrono::Duration::days(1);
    }

    Ok(Json(rows))
}

pub async fn get_weekly_summary(State(state): State<AppState>) -> AppResult<Json<WeeklySummary>> {
    let activities = own_activities(&state).await?;
    let daily: Vec<DailyStats> = state.store.read_vec(StoreKey::DailyStats).await?;
    let today = Utc::now().date_naive();

    Ok(Json(stats::weekly_summary(&activities, &daily, today)))
}
