use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    pub duration_min: Option<i64>,
    pub rest_sec: Option<i64>,
}

/// A user-authored routine. `completed_count` and `last_completed` are bumped
/// every time a session referencing the plan is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub exercises: Vec<Exercise>,
    pub completed_count: i64,
    pub last_completed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Completion log for one run-through of a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub date: NaiveDate,
    pub duration_min: i64,
    pub calories: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkoutPlanRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWorkoutPlanRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub exercises: Option<Vec<Exercise>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RecordSessionRequest {
    #[validate(range(min = 1, max = 1440, message = "Duration must be 1-1440 minutes"))]
    pub duration_min: i64,
    pub calories: Option<i64>,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}
