use axum::{extract::State, Json};
use chrono::Utc;
use validator::Validate;

use crate::db::StoreKey;
use crate::error::{AppError, AppResult};
use crate::models::reminder::{
    ReminderSettings, ScheduledReminder, UpdateReminderSettingsRequest,
};
use crate::services::reminders::compute_schedule;
use crate::AppState;

pub async fn get_settings(State(state): State<AppState>) -> AppResult<Json<ReminderSettings>> {
    let settings = load_settings(&state).await?;
    Ok(Json(settings))
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(body): Json<UpdateReminderSettingsRequest>,
) -> AppResult<Json<ReminderSettings>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let mut settings = load_settings(&state).await?;
    if let Some(enabled) = body.enabled {
        settings.enabled = enabled;
    }
    if let Some(interval_min) = body.interval_min {
        settings.interval_min = interval_min;
    }
    if let Some(start_time) = body.start_time {
        settings.start_time = start_time;
    }
    if let Some(end_time) = body.end_time {
        settings.end_time = end_time;
    }
    if settings.end_time <= settings.start_time {
        return Err(AppError::Validation(
            "Reminder window must end after it starts".into(),
        ));
    }

    state
        .store
        .write_one(StoreKey::ReminderSettings, &settings)
        .await?;
    apply_settings(&state, &settings).await?;

    Ok(Json(settings))
}

pub async fn list_scheduled(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ScheduledReminder>>> {
    let scheduled: Vec<ScheduledReminder> =
        state.store.read_vec(StoreKey::ScheduledReminders).await?;
    Ok(Json(scheduled))
}

pub async fn load_settings(state: &AppState) -> AppResult<ReminderSettings> {
    let stored = state
        .store
        .read_one::<ReminderSettings>(StoreKey::ReminderSettings)
        .await?;
    Ok(stored.unwrap_or_else(|| ReminderSettings::from_config(&state.config)))
}

/// Cancel-and-reschedule wholesale: compute today's firing times, overwrite
/// the persisted pending set, and restart the emission task. When the master
/// switch is off this clears everything and returns quietly.
pub async fn apply_settings(
    state: &AppState,
    settings: &ReminderSettings,
) -> AppResult<Vec<ScheduledReminder>> {
    if !state.config.notifications_enabled {
        tracing::warn!("Notifications disabled by configuration; movement reminders not scheduled");
        state
            .store
            .write_vec::<ScheduledReminder>(StoreKey::ScheduledReminders, &[])
            .await?;
        state
            .reminders
            .reschedule(Vec::new(), state.ws_tx.clone())
            .await;
        return Ok(Vec::new());
    }

    let schedule = compute_schedule(settings, Utc::now());
    state
        .store
        .write_vec(StoreKey::ScheduledReminders, &schedule)
        .await?;
    state
        .reminders
        .reschedule(schedule.clone(), state.ws_tx.clone())
        .await;

    Ok(schedule)
}
