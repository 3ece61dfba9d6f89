use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::db::StoreKey;
use crate::error::{AppError, AppResult};
use crate::models::activity::{Activity, ActivityQuery, CreateActivityRequest};
use crate::models::stats::DailyStats;
use crate::AppState;

pub async fn create_activity(
    State(state): State<AppState>,
    Json(body): Json<CreateActivityRequest>,
) -> AppResult<Json<Activity>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = crate::handlers::profile::ensure_profile(&state).await?;
    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());
    let calories = body
        .calories
        .unwrap_or_else(|| body.kind.calories_per_minute() * body.duration_min);

    let activity = Activity {
        id: Uuid::new_v4(),
        user_id: profile.id,
        kind: body.kind,
        name: body.name,
        duration_min: body.duration_min,
        calories,
        distance_km: body.distance_km,
        steps: body.steps,
        date,
        notes: body.notes,
        created_at: Utc::now(),
    };

    record_activity(&state, &activity).await?;

    Ok(Json(activity))
}

pub async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<Vec<Activity>>> {
    let start = query
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive() - chrono::Duration::days(30));
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());

    let mut activities = crate::handlers::stats::own_activities(&state).await?;
    activities.retain(|a| {
        a.date >= start && a.date <= end && query.kind.map_or(true, |k| a.kind == k)
    });
    activities.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(Json(activities))
}

pub async fn get_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<Uuid>,
) -> AppResult<Json<Activity>> {
    let activities: Vec<Activity> = state.store.read_vec(StoreKey::Activities).await?;
    let activity = activities
        .into_iter()
        .find(|a| a.id == activity_id)
        .ok_or(AppError::NotFound("Activity not found".into()))?;

    Ok(Json(activity))
}

/// Append to the activity log, fold the activity into its day's aggregate,
/// then re-run the badge evaluator. Also invoked when a workout session
/// completes.
pub(crate) async fn record_activity(state: &AppState, activity: &Activity) -> AppResult<Vec<String>> {
    let mut activities: Vec<Activity> = state.store.read_vec(StoreKey::Activities).await?;
    activities.push(activity.clone());
    state
        .store
        .write_vec(StoreKey::Activities, &activities)
        .await?;

    let mut daily: Vec<DailyStats> = state.store.read_vec(StoreKey::DailyStats).await?;
    match daily.iter_mut().find(|d| d.date == activity.date) {
        Some(record) => record.apply_activity(activity),
        None => {
            let mut record = DailyStats::zero(activity.date);
            record.apply_activity(activity);
            daily.push(record);
        }
    }
    state.store.write_vec(StoreKey::DailyStats, &daily).await?;

    let newly_earned = crate::handlers::badges::run_badge_check(state).await?;

    if let Some(tx) = state.ws_tx.as_ref() {
        let msg = serde_json::json!({
            "type": "activity_logged",
            "activity_id": activity.id,
            "date": activity.date,
        });
        let _ = tx.send(msg.to_string());
    }

    Ok(newly_earned)
}
