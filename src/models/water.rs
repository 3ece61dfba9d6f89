use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One record per date, incremented in place. The goal is fixed from config
/// when the day's record is first created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterIntake {
    pub id: Uuid,
    pub date: NaiveDate,
    pub glasses: i32,
    pub goal: i32,
}

impl WaterIntake {
    pub fn fresh(date: NaiveDate, goal: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            glasses: 0,
            goal,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddWaterRequest {
    /// Glasses to add; defaults to 1.
    #[validate(range(min = 1, max = 20, message = "Glasses must be 1-20"))]
    pub glasses: Option<i32>,
}
