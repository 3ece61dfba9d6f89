use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A mood check-in. Multiple entries may exist for one date; the today screen
/// consumes the most recent one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mood {
    pub id: Uuid,
    pub emoji: String,
    pub label: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMoodRequest {
    #[validate(length(min = 1, max = 8))]
    pub emoji: String,
    #[validate(length(min = 1, max = 40, message = "Label must be 1-40 characters"))]
    pub label: String,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}
