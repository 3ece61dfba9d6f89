use axum::{extract::State, Json};
use chrono::Utc;
use validator::Validate;

use crate::db::StoreKey;
use crate::error::{AppError, AppResult};
use crate::models::stats::DailyStats;
use crate::models::water::{AddWaterRequest, WaterIntake};
use crate::services::stats;
use crate::AppState;

pub async fn get_today_water(State(state): State<AppState>) -> AppResult<Json<WaterIntake>> {
    let records: Vec<WaterIntake> = state.store.read_vec(StoreKey::WaterIntake).await?;
    let today = Utc::now().date_naive();
    Ok(Json(stats::today_water(
        &records,
        today,
        state.config.daily_water_goal,
    )))
}

/// Increment today's record in place, creating a fresh 0-of-goal record on
/// first log of the day. The goal never changes after creation.
pub async fn add_water(
    State(state): State<AppState>,
    Json(body): Json<AddWaterRequest>,
) -> AppResult<Json<WaterIntake>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let glasses = body.glasses.unwrap_or(1);
    let today = Utc::now().date_naive();

    let mut records: Vec<WaterIntake> = state.store.read_vec(StoreKey::WaterIntake).await?;
    let record = match records.iter_mut().find(|w| w.date == today) {
        Some(record) => {
            record.glasses += glasses;
            record.clone()
        }
        None => {
            let mut record = WaterIntake::fresh(today, state.config.daily_water_goal);
            record.glasses = glasses;
            records.push(record.clone());
            record
        }
    };
    state.store.write_vec(StoreKey::WaterIntake, &records).await?;

    // Mirror into the day's aggregate so the today screen reads one record.
    let mut daily: Vec<DailyStats> = state.store.read_vec(StoreKey::DailyStats).await?;
    match daily.iter_mut().find(|d| d.date == today) {
        Some(day) => day.water_glasses = record.glasses,
        None => {
            let mut day = DailyStats::zero(today);
            day.water_glasses = record.glasses;
            daily.push(day);
        }
    }
    state.store.write_vec(StoreKey::DailyStats, &daily).await?;

    crate::handlers::badges::run_badge_check(&state).await?;

    Ok(Json(record))
}
