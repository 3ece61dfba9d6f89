use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// What a goal measures. Each kind reads a different log over its own period
/// (today, or the trailing 7-day window for the weekly kinds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    DailySteps,
    DailyCalories,
    DailyActiveMinutes,
    DailyWater,
    WeeklyDistance,
    WeeklyActiveMinutes,
    WeeklyWorkouts,
    SleepDuration,
    TargetWeight,
    WeightLoss,
    ActivityStreak,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub kind: GoalKind,
    pub title: String,
    pub target_value: f64,
    pub unit: String,
    pub start_value: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGoalRequest {
    pub kind: GoalKind,
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[validate(range(min = 0.0, message = "Target must not be negative"))]
    pub target_value: f64,
    #[validate(length(min = 1, max = 20))]
    pub unit: String,
    pub start_value: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGoalRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,
    #[validate(range(min = 0.0, message = "Target must not be negative"))]
    pub target_value: Option<f64>,
    pub unit: Option<String>,
    pub start_value: Option<f64>,
    pub is_active: Option<bool>,
}

/// Computed on demand; never stored.
#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub goal_id: Uuid,
    pub kind: GoalKind,
    pub title: String,
    pub current_value: f64,
    pub target_value: f64,
    pub unit: String,
    /// Clamped to [0, 100].
    pub percentage: f64,
}
