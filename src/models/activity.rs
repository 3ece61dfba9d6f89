use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Walking,
    Running,
    Cycling,
    Swimming,
    Gym,
    Yoga,
    Pilates,
    Hiking,
    Dancing,
    Basketball,
    Soccer,
    Tennis,
    Other,
}

impl ActivityKind {
    /// Rough kcal burned per minute, used when a manual log omits calories.
    pub fn calories_per_minute(self) -> i64 {
        match self {
            ActivityKind::Walking => 4,
            ActivityKind::Running => 11,
            ActivityKind::Cycling => 8,
            ActivityKind::Swimming => 9,
            ActivityKind::Gym => 6,
            ActivityKind::Yoga => 3,
            ActivityKind::Pilates => 4,
            ActivityKind::Hiking => 6,
            ActivityKind::Dancing => 5,
            ActivityKind::Basketball => 8,
            ActivityKind::Soccer => 9,
            ActivityKind::Tennis => 7,
            ActivityKind::Other => 5,
        }
    }
}

/// A logged activity. Created on manual log or on completing a workout
/// session; immutable afterwards and never deleted in-app.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: ActivityKind,
    pub name: String,
    pub duration_min: i64,
    pub calories: i64,
    pub distance_km: Option<f64>,
    pub steps: Option<i64>,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateActivityRequest {
    pub kind: ActivityKind,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(range(min = 1, max = 1440, message = "Duration must be 1-1440 minutes"))]
    pub duration_min: i64,
    /// Estimated from kind and duration when omitted.
    pub calories: Option<i64>,
    pub distance_km: Option<f64>,
    pub steps: Option<i64>,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub kind: Option<ActivityKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_snake_case() {
        let json = serde_json::to_string(&ActivityKind::Basketball).unwrap();
        assert_eq!(json, r#""basketball""#);
        let kind: ActivityKind = serde_json::from_str(r#""walking""#).unwrap();
        assert_eq!(kind, ActivityKind::Walking);
    }

    #[test]
    fn test_create_request_minimal_body() {
        let json = r#"{"kind":"running","name":"Morning run","duration_min":30}"#;
        let req: CreateActivityRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.kind, ActivityKind::Running);
        assert!(req.calories.is_none());
        assert!(req.date.is_none());
    }
}
