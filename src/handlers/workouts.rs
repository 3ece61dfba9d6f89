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
use crate::models::activity::{Activity, ActivityKind};
use crate::models::workout::{
    CreateWorkoutPlanRequest, RecordSessionRequest, UpdateWorkoutPlanRequest, WorkoutPlan,
    WorkoutSession,
};
use crate::AppState;

pub async fn create_plan(
    State(state): State<AppState>,
    Json(body): Json<CreateWorkoutPlanRequest>,
) -> AppResult<Json<WorkoutPlan>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let now = Utc::now();
    let plan = WorkoutPlan {
        id: Uuid::new_v4(),
        name: body.name,
        description: body.description,
        exercises: body.exercises,
        completed_count: 0,
        last_completed: None,
        created_at: now,
        updated_at: now,
    };

    let mut plans: Vec<WorkoutPlan> = state.store.read_vec(StoreKey::WorkoutPlans).await?;
    plans.push(plan.clone());
    state.store.write_vec(StoreKey::WorkoutPlans, &plans).await?;

    Ok(Json(plan))
}

pub async fn list_plans(State(state): State<AppState>) -> AppResult<Json<Vec<WorkoutPlan>>> {
    let plans: Vec<WorkoutPlan> = state.store.read_vec(StoreKey::WorkoutPlans).await?;
    Ok(Json(plans))
}

pub async fn get_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
) -> AppResult<Json<WorkoutPlan>> {
    let plans: Vec<WorkoutPlan> = state.store.read_vec(StoreKey::WorkoutPlans).await?;
    let plan = plans
        .into_iter()
        .find(|p| p.id == plan_id)
        .ok_or(AppError::NotFound("Workout plan not found".into()))?;
    Ok(Json(plan))
}

pub async fn update_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
    Json(body): Json<UpdateWorkoutPlanRequest>,
) -> AppResult<Json<WorkoutPlan>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let mut plans: Vec<WorkoutPlan> = state.store.read_vec(StoreKey::WorkoutPlans).await?;
    let plan = plans
        .iter_mut()
        .find(|p| p.id == plan_id)
        .ok_or(AppError::NotFound("Workout plan not found".into()))?;

    if let Some(name) = body.name {
        plan.name = name;
    }
    if let Some(description) = body.description {
        plan.description = Some(description);
    }
    if let Some(exercises) = body.exercises {
        plan.exercises = exercises;
    }
    plan.updated_at = Utc::now();

    let updated = plan.clone();
    state.store.write_vec(StoreKey::WorkoutPlans, &plans).await?;

    Ok(Json(updated))
}

pub async fn delete_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
) -> AppResult<Json<DeleteResponse>> {
    let mut plans: Vec<WorkoutPlan> = state.store.read_vec(StoreKey::WorkoutPlans).await?;
    let before = plans.len();
    plans.retain(|p| p.id != plan_id);
    if plans.len() == before {
        return Err(AppError::NotFound("Workout plan not found".into()));
    }
    state.store.write_vec(StoreKey::WorkoutPlans, &plans).await?;

    Ok(Json(DeleteResponse {
        deleted: true,
        id: plan_id,
    }))
}

/// Record a run-through of a plan: log the session, bump the plan's
/// completion counters, and log the matching activity (which in turn folds
/// daily stats and re-runs the badge evaluator).
pub async fn record_session(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
    Json(body): Json<RecordSessionRequest>,
) -> AppResult<Json<WorkoutSession>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let mut plans: Vec<WorkoutPlan> = state.store.read_vec(StoreKey::WorkoutPlans).await?;
    let plan = plans
        .iter_mut()
        .find(|p| p.id == plan_id)
        .ok_or(AppError::NotFound("Workout plan not found".into()))?;

    let now = Utc::now();
    let date = body.date.unwrap_or_else(|| now.date_naive());
    let calories = body
        .calories
        .unwrap_or_else(|| ActivityKind::Gym.calories_per_minute() * body.duration_min);

    let session = WorkoutSession {
        id: Uuid::new_v4(),
        plan_id,
        date,
        duration_min: body.duration_min,
        calories: Some(calories),
        notes: body.notes,
        created_at: now,
    };

    plan.completed_count += 1;
    plan.last_completed = Some(now);
    plan.updated_at = now;
    let plan_name = plan.name.clone();
    state.store.write_vec(StoreKey::WorkoutPlans, &plans).await?;

    let mut sessions: Vec<WorkoutSession> =
        state.store.read_vec(StoreKey::WorkoutSessions).await?;
    sessions.push(session.clone());
    state
        .store
        .write_vec(StoreKey::WorkoutSessions, &sessions)
        .await?;

    let profile = crate::handlers::profile::ensure_profile(&state).await?;
    let activity = Activity {
        id: Uuid::new_v4(),
        user_id: profile.id,
        kind: ActivityKind::Gym,
        name: plan_name,
        duration_min: body.duration_min,
        calories,
        distance_km: None,
        steps: None,
        date,
        notes: None,
        created_at: now,
    };
    crate::handlers::activities::record_activity(&state, &activity).await?;

    Ok(Json(session))
}

pub async fn list_sessions(State(state): State<AppState>) -> AppResult<Json<Vec<WorkoutSession>>> {
    let mut sessions: Vec<WorkoutSession> =
        state.store.read_vec(StoreKey::WorkoutSessions).await?;
    sessions.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(Json(sessions))
}
