//! # FitTrack — shared response DTOs
//!
//! Composite response shapes used across handlers. Entity-specific request
//! types live next to their models; everything here is read-model only.
//!
//! Conventions:
//! - `*Response` → serialized to client JSON
//! - Derived values are computed in `services` and only carried here

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::badge::Badge;

/// Standard success message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Standard delete confirmation
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub streak_days: i64,
}

/// One day of the weekly review strip.
#[derive(Debug, Clone, Serialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub calories: i64,
    pub active_minutes: i64,
    pub steps: i64,
}

/// GET /api/stats/weekly-summary
#[derive(Debug, Serialize)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_activities: i64,
    pub total_calories: i64,
    pub total_active_minutes: i64,
    pub total_distance_km: f64,
    pub total_steps: i64,
    pub days_active: i64,
    pub activities_by_kind: HashMap<String, i64>,
    pub best_day: Option<NaiveDate>,
    pub days: Vec<DayActivity>,
}

/// GET /api/sleep/average
#[derive(Debug, Serialize)]
pub struct SleepAverageResponse {
    pub window_days: i64,
    pub average_hours: f64,
}

/// GET /api/weight/trend
#[derive(Debug, Serialize)]
pub struct WeightTrendResponse {
    pub entry_count: usize,
    pub start_kg: Option<f64>,
    pub current_kg: Option<f64>,
    pub loss_kg: f64,
}

/// POST /api/badges/check
#[derive(Debug, Serialize)]
pub struct BadgeCheckResponse {
    pub newly_earned: Vec<String>,
    pub badges: Vec<Badge>,
}

/// Shared date-range query for log listings.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// POST /api/seed
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub seeded: bool,
    pub activities: usize,
    pub groups: usize,
    pub messages: usize,
}
