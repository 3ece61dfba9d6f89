use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepEntry {
    pub id: Uuid,
    pub bed_time: DateTime<Utc>,
    pub wake_time: DateTime<Utc>,
    pub duration_hours: f64,
    pub quality: SleepQuality,
    pub interruptions: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSleepEntryRequest {
    pub bed_time: DateTime<Utc>,
    pub wake_time: DateTime<Utc>,
    /// Derived from bed/wake times when omitted.
    pub duration_hours: Option<f64>,
    pub quality: SleepQuality,
    #[validate(range(min = 0, max = 50))]
    pub interruptions: Option<i32>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SleepQuality::Excellent).unwrap(),
            r#""excellent""#
        );
    }
}
