use axum::{extract::State, Json};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::db::StoreKey;
use crate::dto::WeightTrendResponse;
use crate::error::{AppError, AppResult};
use crate::models::weight::{CreateWeightEntryRequest, WeightEntry};
use crate::services::stats;
use crate::AppState;

pub async fn create_weight_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateWeightEntryRequest>,
) -> AppResult<Json<WeightEntry>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let entry = WeightEntry {
        id: Uuid::new_v4(),
        weight_kg: body.weight_kg,
        date: body.date.unwrap_or_else(|| Utc::now().date_naive()),
        notes: body.notes,
        created_at: Utc::now(),
    };

    let mut entries: Vec<WeightEntry> = state.store.read_vec(StoreKey::WeightEntries).await?;
    entries.push(entry.clone());
    // Kept sorted by date; trend math reads first/last.
    entries.sort_by_key(|e| e.date);
    state
        .store
        .write_vec(StoreKey::WeightEntries, &entries)
        .await?;

    crate::handlers::badges::run_badge_check(&state).await?;

    Ok(Json(entry))
}

pub async fn list_weight_entries(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<WeightEntry>>> {
    let entries: Vec<WeightEntry> = state.store.read_vec(StoreKey::WeightEntries).await?;
    Ok(Json(entries))
}

pub async fn get_weight_trend(
    State(state): State<AppState>,
) -> AppResult<Json<WeightTrendResponse>> {
    let entries: Vec<WeightEntry> = state.store.read_vec(StoreKey::WeightEntries).await?;

    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);

    Ok(Json(WeightTrendResponse {
        entry_count: sorted.len(),
        start_kg: sorted.first().map(|e| e.weight_kg),
        current_kg: sorted.last().map(|e| e.weight_kg),
        loss_kg: stats::weight_loss(&entries),
    }))
}
