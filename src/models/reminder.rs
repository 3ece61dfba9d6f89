use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;

/// Movement-reminder configuration. Toggling `enabled` off cancels the whole
/// pending set; there is no paused/in-progress lifecycle beyond this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderSettings {
    pub enabled: bool,
    pub interval_min: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ReminderSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enabled: config.notifications_enabled,
            interval_min: config.reminder_interval_min,
            start_time: parse_time(&config.reminder_start, NaiveTime::from_hms_opt(9, 0, 0)),
            end_time: parse_time(&config.reminder_end, NaiveTime::from_hms_opt(21, 0, 0)),
        }
    }
}

fn parse_time(raw: &str, fallback: Option<NaiveTime>) -> NaiveTime {
    NaiveTime::parse_from_str(raw, "%H:%M").unwrap_or_else(|_| {
        tracing::warn!(raw, "Unparseable reminder time, using default");
        fallback.unwrap_or_default()
    })
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReminderSettingsRequest {
    pub enabled: Option<bool>,
    #[validate(range(min = 15, max = 480, message = "Interval must be 15-480 minutes"))]
    pub interval_min: Option<u32>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// One pending notification. The persisted set is overwritten wholesale on
/// every reschedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledReminder {
    pub id: Uuid,
    pub fire_at: DateTime<Utc>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_accepts_hh_mm() {
        let t = parse_time("07:45", NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(t, NaiveTime::from_hms_opt(7, 45, 0).unwrap());
    }

    #[test]
    fn test_parse_time_falls_back_on_garbage() {
        let t = parse_time("later", NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(t, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }
}
