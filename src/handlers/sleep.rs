use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::db::StoreKey;
use crate::dto::SleepAverageResponse;
use crate::error::{AppError, AppResult};
use crate::models::sleep::{CreateSleepEntryRequest, SleepEntry};
use crate::services::stats;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SleepAverageQuery {
    pub days: Option<i64>,
}

pub async fn create_sleep_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateSleepEntryRequest>,
) -> AppResult<Json<SleepEntry>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    if body.wake_time <= body.bed_time {
        return Err(AppError::Validation(
            "Wake time must be after bed time".into(),
        ));
    }

    let duration_hours = body.duration_hours.unwrap_or_else(|| {
        (body.wake_time - body.bed_time).num_minutes() as f64 / 60.0
    });

    let entry = SleepEntry {
        id: Uuid::new_v4(),
        bed_time: body.bed_time,
        wake_time: body.wake_time,
        duration_hours,
        quality: body.quality,
        interruptions: body.interruptions.unwrap_or(0),
        notes: body.notes,
    };

    let mut entries: Vec<SleepEntry> = state.store.read_vec(StoreKey::SleepEntries).await?;
    entries.push(entry.clone());
    state
        .store
        .write_vec(StoreKey::SleepEntries, &entries)
        .await?;

    Ok(Json(entry))
}

pub async fn list_sleep_entries(State(state): State<AppState>) -> AppResult<Json<Vec<SleepEntry>>> {
    let mut entries: Vec<SleepEntry> = state.store.read_vec(StoreKey::SleepEntries).await?;
    entries.sort_by(|a, b| b.wake_time.cmp(&a.wake_time));
    Ok(Json(entries))
}

pub async fn get_sleep_average(
    State(state): State<AppState>,
    Query(query): Query<SleepAverageQuery>,
) -> AppResult<Json<SleepAverageResponse>> {
    let days = query.days.unwrap_or(7).clamp(1, 90);
    let entries: Vec<SleepEntry> = state.store.read_vec(StoreKey::SleepEntries).await?;

    Ok(Json(SleepAverageResponse {
        window_days: days,
        average_hours: stats::average_sleep_duration(&entries, days, Utc::now()),
    }))
}
