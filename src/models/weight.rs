use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Append-only weight log, kept sorted by date for trend calculations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: Uuid,
    pub weight_kg: f64,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWeightEntryRequest {
    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be 20-500 kg"))]
    pub weight_kg: f64,
    /// Defaults to today.
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}
