//! Movement reminders: schedule computation plus the background task that
//! emits them. A settings change cancels and reschedules wholesale.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::models::reminder::{ReminderSettings, ScheduledReminder};

const MOVEMENT_MESSAGES: &[&str] = &[
    "Time to stretch your legs!",
    "Stand up and move for a minute.",
    "A quick walk keeps the streak alive.",
    "Roll those shoulders and take a lap.",
    "Your step count called. It wants more.",
    "Two minutes of movement, right now.",
    "Grab some water and walk it off.",
    "Posture check, then a short stroll.",
];

/// Today's firing times: walk the start→end window in fixed interval steps
/// and keep the steps strictly in the future. Empty when disabled.
pub fn compute_schedule(settings: &ReminderSettings, now: DateTime<Utc>) -> Vec<ScheduledReminder> {
    if !settings.enabled || settings.interval_min == 0 {
        return Vec::new();
    }

    let mut rng = rand::thread_rng();
    let date = now.date_naive();
    let mut fire_at = date.and_time(settings.start_time).and_utc();
    let window_end = date.and_time(settings.end_time).and_utc();
    let step = Duration::minutes(i64::from(settings.interval_min));

    let mut schedule = Vec::new();
    while fire_at <= window_end {
        if fire_at > now {
            let message = MOVEMENT_MESSAGES
                .choose(&mut rng)
                .copied()
                .unwrap_or("Time to move!");
            schedule.push(ScheduledReminder {
                id: Uuid::new_v4(),
                fire_at,
                message: message.into(),
            });
        }
        fire_at += step;
    }
    schedule
}

/// Owns the single emission task. Rescheduling aborts the previous task, so
/// at most one pending set is ever live.
#[derive(Clone, Default)]
pub struct ReminderScheduler {
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reschedule(
        &self,
        reminders: Vec<ScheduledReminder>,
        ws_tx: Option<broadcast::Sender<String>>,
    ) {
        let mut slot = self.task.lock().await;
        if let Some(handle) = slot.take() {
            handle.abort();
        }

        if reminders.is_empty() {
            tracing::info!("Movement reminders cleared");
            return;
        }

        let count = reminders.len();
        let handle = tokio::spawn(async move {
            for reminder in reminders {
                let wait = (reminder.fire_at - Utc::now()).to_std().unwrap_or_default();
                tokio::time::sleep(wait).await;

                tracing::info!(
                    reminder_id = %reminder.id,
                    message = %reminder.message,
                    "Movement reminder fired"
                );
                if let Some(tx) = ws_tx.as_ref() {
                    let msg = serde_json::json!({
                        "type": "movement_reminder",
                        "reminder_id": reminder.id,
                        "message": reminder.message,
                    });
                    let _ = tx.send(msg.to_string());
                }
            }
        });
        *slot = Some(handle);
        tracing::info!(scheduled = count, "Movement reminders scheduled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn settings(enabled: bool, interval_min: u32) -> ReminderSettings {
        ReminderSettings {
            enabled,
            interval_min,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_schedule_steps_through_window() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 10, 30, 0).unwrap();
        let schedule = compute_schedule(&settings(true, 60), now);

        // 11:00 through 21:00 on the hour
        assert_eq!(schedule.len(), 11);
        assert!(schedule.iter().all(|r| r.fire_at > now));
        assert_eq!(
            schedule[0].fire_at,
            Utc.with_ymd_and_hms(2026, 3, 10, 11, 0, 0).unwrap()
        );
        assert_eq!(
            schedule.last().unwrap().fire_at,
            Utc.with_ymd_and_hms(2026, 3, 10, 21, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_schedule_empty_when_disabled() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 10, 30, 0).unwrap();
        assert!(compute_schedule(&settings(false, 60), now).is_empty());
    }

    #[test]
    fn test_schedule_empty_after_window() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 22, 0, 0).unwrap();
        assert!(compute_schedule(&settings(true, 60), now).is_empty());
    }

    #[test]
    fn test_schedule_zero_interval_is_total() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 10, 30, 0).unwrap();
        assert!(compute_schedule(&settings(true, 0), now).is_empty());
    }

    #[test]
    fn test_schedule_messages_come_from_pool() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 8, 0, 0).unwrap();
        let schedule = compute_schedule(&settings(true, 120), now);
        assert!(!schedule.is_empty());
        for reminder in &schedule {
            assert!(MOVEMENT_MESSAGES.contains(&reminder.message.as_str()));
        }
    }
}
