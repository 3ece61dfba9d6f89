use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::activity::Activity;

/// Per-date aggregate of the day's activity, updated additively whenever an
/// activity is recorded. Always re-derivable from the activity log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub steps: i64,
    pub calories: i64,
    pub active_minutes: i64,
    pub distance_km: f64,
    pub water_glasses: i32,
}

impl DailyStats {
    /// Missing data is a valid zero state, not an error.
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            steps: 0,
            calories: 0,
            active_minutes: 0,
            distance_km: 0.0,
            water_glasses: 0,
        }
    }

    /// Fold one activity into the aggregate.
    pub fn apply_activity(&mut self, activity: &Activity) {
        self.steps += activity.steps.unwrap_or(0);
        self.calories += activity.calories;
        self.active_minutes += activity.duration_min;
        self.distance_km += activity.distance_km.unwrap_or(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::ActivityKind;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_activity(calories: i64, steps: Option<i64>, distance: Option<f64>) -> Activity {
        Activity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind: ActivityKind::Walking,
            name: "Walk".into(),
            duration_min: 30,
            calories,
            distance_km: distance,
            steps,
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_zero_state() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let stats = DailyStats::zero(date);
        assert_eq!(stats.steps, 0);
        assert_eq!(stats.calories, 0);
        assert_eq!(stats.active_minutes, 0);
        assert_eq!(stats.distance_km, 0.0);
        assert_eq!(stats.water_glasses, 0);
    }

    #[test]
    fn test_apply_activity_is_additive() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut stats = DailyStats::zero(date);
        stats.apply_activity(&make_activity(100, Some(2000), Some(1.5)));
        stats.apply_activity(&make_activity(200, None, None));
        stats.apply_activity(&make_activity(150, Some(1000), Some(0.5)));

        assert_eq!(stats.calories, 450);
        assert_eq!(stats.steps, 3000);
        assert_eq!(stats.active_minutes, 90);
        assert!((stats.distance_km - 2.0).abs() < 1e-9);
    }
}
