//! On-demand goal progress. One exhaustive match per computation; each kind
//! is an independent filter+reduce over its log, with no shared state.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::activity::Activity;
use crate::models::goal::{Goal, GoalKind, GoalProgress};
use crate::models::sleep::SleepEntry;
use crate::models::stats::DailyStats;
use crate::models::water::WaterIntake;
use crate::models::weight::WeightEntry;
use crate::models::workout::WorkoutSession;
use crate::services::stats;

pub struct GoalContext<'a> {
    pub activities: &'a [Activity],
    pub daily: &'a [DailyStats],
    pub water: &'a [WaterIntake],
    pub weights: &'a [WeightEntry],
    pub sleep: &'a [SleepEntry],
    pub sessions: &'a [WorkoutSession],
    pub today: NaiveDate,
    pub now: DateTime<Utc>,
}

impl GoalContext<'_> {
    fn week_start(&self) -> NaiveDate {
        self.today - Duration::days(6)
    }

    fn in_trailing_week(&self, date: NaiveDate) -> bool {
        date >= self.week_start() && date <= self.today
    }
}

/// Total for all inputs; percentage is clamped to [0, 100].
pub fn goal_progress(goal: &Goal, ctx: &GoalContext) -> GoalProgress {
    let today = stats::today_stats(ctx.daily, ctx.today);

    let current = match goal.kind {
        GoalKind::DailySteps => today.steps as f64,
        GoalKind::DailyCalories => today.calories as f64,
        GoalKind::DailyActiveMinutes => today.active_minutes as f64,
        GoalKind::DailyWater => {
            stats::today_water(ctx.water, ctx.today, 0).glasses as f64
        }
        GoalKind::WeeklyDistance => ctx
            .activities
            .iter()
            .filter(|a| ctx.in_trailing_week(a.date))
            .filter_map(|a| a.distance_km)
            .sum(),
        GoalKind::WeeklyActiveMinutes => ctx
            .activities
            .iter()
            .filter(|a| ctx.in_trailing_week(a.date))
            .map(|a| a.duration_min as f64)
            .sum(),
        GoalKind::WeeklyWorkouts => ctx
            .sessions
            .iter()
            .filter(|s| ctx.in_trailing_week(s.date))
            .count() as f64,
        GoalKind::SleepDuration => stats::average_sleep_duration(ctx.sleep, 7, ctx.now),
        GoalKind::TargetWeight => latest_weight(ctx.weights).unwrap_or(0.0),
        GoalKind::WeightLoss => stats::weight_loss(ctx.weights),
        GoalKind::ActivityStreak => stats::activity_streak(ctx.activities, ctx.today) as f64,
        // No log backs a custom goal; start_value is the manually tracked value.
        GoalKind::Custom => goal.start_value.unwrap_or(0.0),
    };

    let percentage = match goal.kind {
        GoalKind::TargetWeight => target_weight_percentage(goal, current),
        _ => ratio_percentage(current, goal.target_value),
    };

    GoalProgress {
        goal_id: goal.id,
        kind: goal.kind,
        title: goal.title.clone(),
        current_value: current,
        target_value: goal.target_value,
        unit: goal.unit.clone(),
        percentage,
    }
}

fn latest_weight(entries: &[WeightEntry]) -> Option<f64> {
    entries
        .iter()
        .max_by_key(|e| e.date)
        .map(|e| e.weight_kg)
}

fn ratio_percentage(current: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (current / target * 100.0).clamp(0.0, 100.0)
}

/// Progress along the start→target line. Without a start value the first
/// weigh-in stands in; reaching or passing the target is 100.
fn target_weight_percentage(goal: &Goal, current: f64) -> f64 {
    let start = goal.start_value.unwrap_or(current);
    let target = goal.target_value;
    let span = start - target;
    if span.abs() < f64::EPSILON {
        return if (current - target).abs() < f64::EPSILON { 100.0 } else { 0.0 };
    }
    ((start - current) / span * 100.0).clamp(0.0, 100.0)
}
