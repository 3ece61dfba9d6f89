use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::db::StoreKey;
use crate::dto::DeleteResponse;
use crate::error::{AppError, AppResult};
use crate::models::goal::{CreateGoalRequest, Goal, GoalProgress, UpdateGoalRequest};
use crate::models::sleep::SleepEntry;
use crate::models::stats::DailyStats;
use crate::models::water::WaterIntake;
use crate::models::weight::WeightEntry;
use crate::models::workout::WorkoutSession;
use crate::services::goals::{goal_progress, GoalContext};
use crate::AppState;

pub async fn create_goal(
    State(state): State<AppState>,
    Json(body): Json<CreateGoalRequest>,
) -> AppResult<Json<Goal>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let now = Utc::now();
    let goal = Goal {
        id: Uuid::new_v4(),
        kind: body.kind,
        title: body.title,
        target_value: body.target_value,
        unit: body.unit,
        start_value: body.start_value,
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    let mut goals: Vec<Goal> = state.store.read_vec(StoreKey::Goals).await?;
    goals.push(goal.clone());
    state.store.write_vec(StoreKey::Goals, &goals).await?;

    Ok(Json(goal))
}

pub async fn list_goals(State(state): State<AppState>) -> AppResult<Json<Vec<Goal>>> {
    let mut goals: Vec<Goal> = state.store.read_vec(StoreKey::Goals).await?;
    goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(goals))
}

pub async fn update_goal(
    State(state): State<AppState>,
    Path(goal_id): Path<Uuid>,
    Json(body): Json<UpdateGoalRequest>,
) -> AppResult<Json<Goal>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let mut goals: Vec<Goal> = state.store.read_vec(StoreKey::Goals).await?;
    let goal = goals
        .iter_mut()
        .find(|g| g.id == goal_id)
        .ok_or(AppError::NotFound("Goal not found".into()))?;

    if let Some(title) = body.title {
        goal.title = title;
    }
    if let Some(target_value) = body.target_value {
        goal.target_value = target_value;
    }
    if let Some(unit) = body.unit {
        goal.unit = unit;
    }
    if let Some(start_value) = body.start_value {
        goal.start_value = Some(start_value);
    }
    if let Some(is_active) = body.is_active {
        goal.is_active = is_active;
    }
    goal.updated_at = Utc::now();

    let updated = goal.clone();
    state.store.write_vec(StoreKey::Goals, &goals).await?;

    Ok(Json(updated))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path(goal_id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    let mut goals: Vec<Goal> = state.store.read_vec(StoreKey::Goals).await?;
    let before = goals.len();
    goals.retain(|g| g.id != goal_id);
    if goals.len() == before {
        return Err(AppError::NotFound("Goal not found".into()));
    }
    state.store.write_vec(StoreKey::Goals, &goals).await?;

    Ok(Json(DeleteResponse {
        deleted: true,
        id: goal_id,
    }))
}

/// Progress for every active goal, recomputed from the logs on each call.
pub async fn get_goal_progress(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<GoalProgress>>> {
    let goals: Vec<Goal> = state.store.read_vec(StoreKey::Goals).await?;

    let activities = crate::handlers::stats::own_activities(&state).await?;
    let daily: Vec<DailyStats> = state.store.read_vec(StoreKey::DailyStats).await?;
    let water: Vec<WaterIntake> = state.store.read_vec(StoreKey::WaterIntake).await?;
    let weights: Vec<WeightEntry> = state.store.read_vec(StoreKey::WeightEntries).await?;
    let sleep: Vec<SleepEntry> = state.store.read_vec(StoreKey::SleepEntries).await?;
    let sessions: Vec<WorkoutSession> =
        state.store.read_vec(StoreKey::WorkoutSessions).await?;

    let now = Utc::now();
    let ctx = GoalContext {
        activities: &activities,
        daily: &daily,
        water: &water,
        weights: &weights,
        sleep: &sleep,
        sessions: &sessions,
        today: now.date_naive(),
        now,
    };

    let progress: Vec<GoalProgress> = goals
        .iter()
        .filter(|g| g.is_active)
        .map(|g| goal_progress(g, &ctx))
        .collect();

    Ok(Json(progress))
}
