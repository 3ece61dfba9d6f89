//! Pure aggregation over the in-memory event logs. Every function here is
//! total: missing data degrades to a zero/empty result, never an error.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashMap;

use crate::dto::{DayActivity, WeeklySummary};
use crate::models::activity::Activity;
use crate::models::sleep::SleepEntry;
use crate::models::stats::DailyStats;
use crate::models::water::WaterIntake;
use crate::models::weight::WeightEntry;

/// The day's aggregate record, or the zero record when nothing was logged.
pub fn today_stats(daily: &[DailyStats], today: NaiveDate) -> DailyStats {
    daily
        .iter()
        .find(|d| d.date == today)
        .cloned()
        .unwrap_or_else(|| DailyStats::zero(today))
}

/// Consecutive calendar days with at least one activity, counted backward
/// from today. A day without activity today means 0, regardless of history.
pub fn activity_streak(activities: &[Activity], today: NaiveDate) -> i64 {
    let mut dates: Vec<NaiveDate> = activities.iter().map(|a| a.date).collect();
    dates.sort();
    dates.dedup();

    let mut streak = 0i64;
    let mut check = today;
    for date in dates.iter().rev() {
        if *date == check {
            streak += 1;
            check -= Duration::days(1);
        } else if *date < check {
            break;
        }
    }
    streak
}

/// Mean sleep duration over entries whose wake time falls in the trailing
/// `days`-day window. 0 on an empty window.
pub fn average_sleep_duration(entries: &[SleepEntry], days: i64, now: DateTime<Utc>) -> f64 {
    let cutoff = now - Duration::days(days);
    let durations: Vec<f64> = entries
        .iter()
        .filter(|e| e.wake_time >= cutoff && e.wake_time <= now)
        .map(|e| e.duration_hours)
        .collect();

    if durations.is_empty() {
        return 0.0;
    }
    durations.iter().sum::<f64>() / durations.len() as f64
}

/// Earliest weight minus latest weight, by entry date. Positive when the
/// user lost weight; 0 with fewer than two entries.
pub fn weight_loss(entries: &[WeightEntry]) -> f64 {
    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);
    match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) if sorted.len() > 1 => first.weight_kg - last.weight_kg,
        _ => 0.0,
    }
}

/// The day's water record, or a fresh 0-of-goal record when nothing was
/// logged yet.
pub fn today_water(records: &[WaterIntake], today: NaiveDate, default_goal: i32) -> WaterIntake {
    records
        .iter()
        .find(|w| w.date == today)
        .cloned()
        .unwrap_or_else(|| WaterIntake::fresh(today, default_goal))
}

/// Review-screen aggregate over the trailing 7 days (today inclusive).
pub fn weekly_summary(
    activities: &[Activity],
    daily: &[DailyStats],
    today: NaiveDate,
) -> WeeklySummary {
    let week_start = today - Duration::days(6);
    let in_week =
        |date: NaiveDate| -> bool { date >= week_start && date <= today };

    let week_activities: Vec<&Activity> =
        activities.iter().filter(|a| in_week(a.date)).collect();

    let mut by_kind: HashMap<String, i64> = HashMap::new();
    for activity in &week_activities {
        let key = serde_json::to_value(activity.kind)
            .ok()
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_else(|| "other".into());
        *by_kind.entry(key).or_insert(0) += 1;
    }

    let mut days: Vec<DayActivity> = Vec::with_capacity(7);
    for offset in 0..7 {
        let date = week_start + Duration::days(offset);
        let stats = today_stats(daily, date);
        days.push(DayActivity {
            date,
            calories: stats.calories,
            active_minutes: stats.active_minutes,
            steps: stats.steps,
        });
    }

    let best_day = days
        .iter()
        .max_by_key(|d| d.calories)
        .filter(|d| d.calories > 0)
        .map(|d| d.date);

    WeeklySummary {
        week_start,
        week_end: today,
        total_activities: week_activities.len() as i64,
        total_calories: week_activities.iter().map(|a| a.calories).sum(),
        total_active_minutes: week_activities.iter().map(|a| a.duration_min).sum(),
        total_distance_km: week_activities
            .iter()
            .filter_map(|a| a.distance_km)
            .sum(),
        total_steps: week_activities.iter().filter_map(|a| a.steps).sum(),
        days_active: week_activities
            .iter()
            .map(|a| a.date)
            .collect::<std::collections::HashSet<_>>()
            .len() as i64,
        activities_by_kind: by_kind,
        best_day,
        days,
    }
}
