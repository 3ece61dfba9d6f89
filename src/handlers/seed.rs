use axum::{extract::State, Json};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::db::StoreKey;
use crate::dto::SeedResponse;
use crate::error::{AppError, AppResult};
use crate::models::activity::{Activity, ActivityKind};
use crate::models::group::{Group, GroupChallenge, GroupMember, Message};
use crate::models::mood::Mood;
use crate::models::profile::Profile;
use crate::models::sleep::{SleepEntry, SleepQuality};
use crate::models::stats::DailyStats;
use crate::models::water::WaterIntake;
use crate::models::weight::WeightEntry;
use crate::models::workout::{Exercise, WorkoutPlan, WorkoutSession};
use crate::AppState;

// ── POST /api/seed ───────────────────────────────────────────────────────────

pub async fn seed(State(state): State<AppState>) -> AppResult<Json<SeedResponse>> {
    if !state.store.is_empty().await? {
        return Err(AppError::Conflict(
            "Store already contains data; use /api/seed/reset".into(),
        ));
    }
    let response = seed_sample_data(&state).await?;
    Ok(Json(response))
}

// ── POST /api/seed/reset ─────────────────────────────────────────────────────

pub async fn reset(State(state): State<AppState>) -> AppResult<Json<SeedResponse>> {
    state.store.clear().await?;
    let response = seed_sample_data(&state).await?;
    tracing::info!("Sample data reset");
    Ok(Json(response))
}

/// Seed on first start when configured and the store has never been written.
pub async fn seed_if_empty(state: &AppState) -> AppResult<()> {
    if state.config.seed_on_empty && state.store.is_empty().await? {
        let response = seed_sample_data(state).await?;
        tracing::info!(activities = response.activities, "Seeded empty store with sample data");
    }
    Ok(())
}

// ── Sample data ──────────────────────────────────────────────────────────────

// Day offsets (days ago) per activity kind; realistic, not perfect.
const WALK_DAYS: &[i64] = &[0, 1, 2, 3, 5, 6, 7, 9, 10, 13];
const RUN_DAYS: &[i64] = &[0, 2, 4, 6, 8, 11, 13];
const RIDE_DAYS: &[i64] = &[1, 3, 6, 8, 13];

const MOODS: &[(i64, &str, &str)] = &[
    (0, "😊", "Good"),
    (1, "😐", "Okay"),
    (2, "😊", "Good"),
    (3, "😫", "Tired"),
    (4, "🤩", "Great"),
    (5, "😐", "Okay"),
    (6, "😊", "Good"),
];

// (days ago, sleep hours, quality, interruptions)
const SLEEP_NIGHTS: &[(i64, f64, SleepQuality, i32)] = &[
    (0, 7.5, SleepQuality::Good, 1),
    (1, 6.0, SleepQuality::Fair, 2),
    (2, 8.0, SleepQuality::Excellent, 0),
    (3, 5.5, SleepQuality::Poor, 3),
    (4, 7.0, SleepQuality::Good, 1),
    (5, 7.5, SleepQuality::Good, 0),
    (6, 6.5, SleepQuality::Fair, 2),
];

async fn seed_sample_data(state: &AppState) -> AppResult<SeedResponse> {
    let today = Utc::now().date_naive();
    let now = Utc::now();

    // ── Profile with mocked friends ──────────────────────────────────────
    let mut profile = Profile::new("Alex");
    profile.friends = vec!["Jordan".into(), "Sam".into(), "Riley".into()];
    state.store.write_one(StoreKey::Profile, &profile).await?;

    // Mocked group members from the fake social backend
    let jordan = GroupMember { id: Uuid::new_v4(), name: "Jordan".into() };
    let sam = GroupMember { id: Uuid::new_v4(), name: "Sam".into() };

    // ── Activity log over the last two weeks ─────────────────────────────
    let mut activities = Vec::new();
    for &days_ago in WALK_DAYS {
        activities.push(make_activity(
            profile.id,
            ActivityKind::Walking,
            "Lunch walk",
            today - Duration::days(days_ago),
            35,
            140,
            Some(2.4),
            Some(3200),
        ));
    }
    for &days_ago in RUN_DAYS {
        activities.push(make_activity(
            profile.id,
            ActivityKind::Running,
            "Morning run",
            today - Duration::days(days_ago),
            28,
            310,
            Some(5.0),
            Some(5600),
        ));
    }
    for &days_ago in RIDE_DAYS {
        activities.push(make_activity(
            profile.id,
            ActivityKind::Cycling,
            "Evening ride",
            today - Duration::days(days_ago),
            45,
            380,
            Some(14.0),
            None,
        ));
    }
    // Mocked members get a week of walks so the leaderboard has competition
    for days_ago in 0..7 {
        activities.push(make_activity(
            jordan.id,
            ActivityKind::Walking,
            "Walk",
            today - Duration::days(days_ago),
            40,
            160,
            Some(2.8),
            Some(4100),
        ));
        if days_ago % 2 == 0 {
            activities.push(make_activity(
                sam.id,
                ActivityKind::Running,
                "Run",
                today - Duration::days(days_ago),
                25,
                280,
                Some(4.2),
                Some(4800),
            ));
        }
    }
    state.store.write_vec(StoreKey::Activities, &activities).await?;

    // ── Daily stats derived by replaying the local user's log ────────────
    let mut daily: Vec<DailyStats> = Vec::new();
    for activity in activities.iter().filter(|a| a.user_id == profile.id) {
        match daily.iter_mut().find(|d| d.date == activity.date) {
            Some(record) => record.apply_activity(activity),
            None => {
                let mut record = DailyStats::zero(activity.date);
                record.apply_activity(activity);
                daily.push(record);
            }
        }
    }

    // ── Water: a 5-of-goal day in progress ───────────────────────────────
    let mut water_today = WaterIntake::fresh(today, state.config.daily_water_goal);
    water_today.glasses = 5;
    state
        .store
        .write_vec(StoreKey::WaterIntake, std::slice::from_ref(&water_today))
        .await?;
    if let Some(record) = daily.iter_mut().find(|d| d.date == today) {
        record.water_glasses = water_today.glasses;
    }
    state.store.write_vec(StoreKey::DailyStats, &daily).await?;

    // ── Weight trend ─────────────────────────────────────────────────────
    let weights = vec![
        make_weight(today - Duration::days(30), 80.0, Some("Starting out")),
        make_weight(today - Duration::days(10), 78.5, None),
        make_weight(today, 78.0, None),
    ];
    state.store.write_vec(StoreKey::WeightEntries, &weights).await?;

    // ── Default goals from configured daily targets ──────────────────────
    let goals = vec![
        make_goal(
            crate::models::goal::GoalKind::DailySteps,
            "Daily steps",
            state.config.daily_step_goal as f64,
            "steps",
            now,
        ),
        make_goal(
            crate::models::goal::GoalKind::DailyCalories,
            "Daily burn",
            state.config.daily_calorie_goal as f64,
            "kcal",
            now,
        ),
    ];
    state.store.write_vec(StoreKey::Goals, &goals).await?;

    // ── Moods ────────────────────────────────────────────────────────────
    let moods: Vec<Mood> = MOODS
        .iter()
        .map(|(days_ago, emoji, label)| Mood {
            id: Uuid::new_v4(),
            emoji: (*emoji).into(),
            label: (*label).into(),
            date: today - Duration::days(*days_ago),
            notes: None,
            created_at: now - Duration::days(*days_ago),
        })
        .collect();
    state.store.write_vec(StoreKey::Moods, &moods).await?;

    // ── Sleep log ────────────────────────────────────────────────────────
    let sleep: Vec<SleepEntry> = SLEEP_NIGHTS
        .iter()
        .map(|(days_ago, hours, quality, interruptions)| {
            let date = today - Duration::days(*days_ago);
            let wake_time = Utc
                .from_utc_datetime(&date.and_hms_opt(7, 0, 0).unwrap_or_default());
            SleepEntry {
                id: Uuid::new_v4(),
                bed_time: wake_time - Duration::minutes((hours * 60.0) as i64),
                wake_time,
                duration_hours: *hours,
                quality: *quality,
                interruptions: *interruptions,
                notes: None,
            }
        })
        .collect();
    state.store.write_vec(StoreKey::SleepEntries, &sleep).await?;

    // ── A workout plan with one completed session ────────────────────────
    let plan_id = Uuid::new_v4();
    let session_date = today - Duration::days(3);
    let plan = WorkoutPlan {
        id: plan_id,
        name: "Full Body Basics".into(),
        description: Some("Three rounds, minimal equipment".into()),
        exercises: vec![
            Exercise { name: "Squats".into(), sets: 3, reps: 12, duration_min: None, rest_sec: Some(60) },
            Exercise { name: "Push-ups".into(), sets: 3, reps: 10, duration_min: None, rest_sec: Some(60) },
            Exercise { name: "Plank".into(), sets: 3, reps: 1, duration_min: Some(2), rest_sec: Some(45) },
        ],
        completed_count: 1,
        last_completed: Some(now - Duration::days(3)),
        created_at: now - Duration::days(20),
        updated_at: now - Duration::days(3),
    };
    state
        .store
        .write_vec(StoreKey::WorkoutPlans, std::slice::from_ref(&plan))
        .await?;
    let session = WorkoutSession {
        id: Uuid::new_v4(),
        plan_id,
        date: session_date,
        duration_min: 30,
        calories: Some(180),
        notes: None,
        created_at: now - Duration::days(3),
    };
    state
        .store
        .write_vec(StoreKey::WorkoutSessions, std::slice::from_ref(&session))
        .await?;

    // ── Group, chat and a step challenge ─────────────────────────────────
    let group = Group {
        id: Uuid::new_v4(),
        name: "Weekend Warriors".into(),
        description: Some("Friends keeping each other honest".into()),
        members: vec![
            GroupMember { id: profile.id, name: profile.name.clone() },
            jordan.clone(),
            sam.clone(),
        ],
        created_at: now - Duration::days(14),
    };
    state
        .store
        .write_vec(StoreKey::Groups, std::slice::from_ref(&group))
        .await?;

    let messages = vec![
        make_message(jordan.id, Some(group.id), None, "Who's in for a hike on Saturday?", now - Duration::hours(26)),
        make_message(profile.id, Some(group.id), None, "Count me in, trailhead at 9?", now - Duration::hours(25)),
        make_message(sam.id, Some(group.id), None, "9 works. Bringing snacks.", now - Duration::hours(24)),
        make_message(jordan.id, None, Some(profile.id), "Nice streak this week!", now - Duration::hours(5)),
    ];
    state.store.write_vec(StoreKey::Messages, &messages).await?;

    let challenge = GroupChallenge {
        id: Uuid::new_v4(),
        group_id: group.id,
        title: "Weekly step-up".into(),
        metric: crate::models::group::ChallengeMetric::Steps,
        target: 50_000.0,
        starts_on: today - Duration::days(6),
        ends_on: today,
        created_at: now - Duration::days(6),
    };
    state
        .store
        .write_vec(StoreKey::Challenges, std::slice::from_ref(&challenge))
        .await?;

    // Earned flags catch up with the seeded logs
    crate::handlers::badges::run_badge_check(state).await?;

    Ok(SeedResponse {
        seeded: true,
        activities: activities.len(),
        groups: 1,
        messages: messages.len(),
    })
}

fn make_activity(
    user_id: Uuid,
    kind: ActivityKind,
    name: &str,
    date: NaiveDate,
    duration_min: i64,
    calories: i64,
    distance_km: Option<f64>,
    steps: Option<i64>,
) -> Activity {
    Activity {
        id: Uuid::new_v4(),
        user_id,
        kind,
        name: name.into(),
        duration_min,
        calories,
        distance_km,
        steps,
        date,
        notes: None,
        created_at: Utc::now(),
    }
}

fn make_goal(
    kind: crate::models::goal::GoalKind,
    title: &str,
    target_value: f64,
    unit: &str,
    now: chrono::DateTime<Utc>,
) -> crate::models::goal::Goal {
    crate::models::goal::Goal {
        id: Uuid::new_v4(),
        kind,
        title: title.into(),
        target_value,
        unit: unit.into(),
        start_value: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn make_weight(date: NaiveDate, weight_kg: f64, notes: Option<&str>) -> WeightEntry {
    WeightEntry {
        id: Uuid::new_v4(),
        weight_kg,
        date,
        notes: notes.map(String::from),
        created_at: Utc::now(),
    }
}

fn make_message(
    sender_id: Uuid,
    group_id: Option<Uuid>,
    recipient_id: Option<Uuid>,
    content: &str,
    sent_at: chrono::DateTime<Utc>,
) -> Message {
    Message {
        id: Uuid::new_v4(),
        sender_id,
        group_id,
        recipient_id,
        content: content.into(),
        sent_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Seed data shape assertions ───────────────────────────────────────

    #[test]
    fn test_seed_walk_days_count() {
        assert_eq!(WALK_DAYS.len(), 10);
    }

    #[test]
    fn test_seed_run_days_count() {
        assert_eq!(RUN_DAYS.len(), 7);
    }

    #[test]
    fn test_seed_ride_days_count() {
        assert_eq!(RIDE_DAYS.len(), 5);
    }

    #[test]
    fn test_seed_today_has_activity() {
        // the streak display depends on a today entry existing
        assert!(WALK_DAYS.contains(&0));
        assert!(RUN_DAYS.contains(&0));
    }

    #[test]
    fn test_seed_offsets_fit_two_weeks() {
        for days in [WALK_DAYS, RUN_DAYS, RIDE_DAYS] {
            assert!(days.iter().all(|d| (0..14).contains(d)));
        }
    }

    #[test]
    fn test_seed_moods_cover_a_week() {
        assert_eq!(MOODS.len(), 7);
        let mut offsets: Vec<i64> = MOODS.iter().map(|(d, _, _)| *d).collect();
        offsets.sort();
        offsets.dedup();
        assert_eq!(offsets, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_seed_sleep_hours_plausible() {
        for (_, hours, _, interruptions) in SLEEP_NIGHTS {
            assert!(*hours >= 4.0 && *hours <= 10.0);
            assert!(*interruptions >= 0);
        }
    }
}
