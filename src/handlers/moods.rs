use axum::{extract::State, Json};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::db::StoreKey;
use crate::error::{AppError, AppResult};
use crate::models::mood::{CreateMoodRequest, Mood};
use crate::AppState;

pub async fn create_mood(
    State(state): State<AppState>,
    Json(body): Json<CreateMoodRequest>,
) -> AppResult<Json<Mood>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let mood = Mood {
        id: Uuid::new_v4(),
        emoji: body.emoji,
        label: body.label,
        date: body.date.unwrap_or_else(|| Utc::now().date_naive()),
        notes: body.notes,
        created_at: Utc::now(),
    };

    let mut moods: Vec<Mood> = state.store.read_vec(StoreKey::Moods).await?;
    moods.push(mood.clone());
    state.store.write_vec(StoreKey::Moods, &moods).await?;

    crate::handlers::badges::run_badge_check(&state).await?;

    Ok(Json(mood))
}

pub async fn list_moods(State(state): State<AppState>) -> AppResult<Json<Vec<Mood>>> {
    let mut moods: Vec<Mood> = state.store.read_vec(StoreKey::Moods).await?;
    moods.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(moods))
}

/// The most recent of today's entries; null when nothing was logged today.
pub async fn get_today_mood(State(state): State<AppState>) -> AppResult<Json<Option<Mood>>> {
    let moods: Vec<Mood> = state.store.read_vec(StoreKey::Moods).await?;
    let today = Utc::now().date_naive();
    let latest = moods
        .into_iter()
        .filter(|m| m.date == today)
        .max_by_key(|m| m.created_at);
    Ok(Json(latest))
}
