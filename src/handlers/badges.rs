use axum::{extract::State, Json};
use chrono::Utc;

use crate::db::StoreKey;
use crate::dto::BadgeCheckResponse;
use crate::error::AppResult;
use crate::models::badge::{default_catalog, migrate_icon_urls, Badge};
use crate::models::stats::DailyStats;
use crate::models::water::WaterIntake;
use crate::models::weight::WeightEntry;
use crate::services::badges::{evaluate, BadgeContext};
use crate::AppState;

pub async fn list_badges(State(state): State<AppState>) -> AppResult<Json<Vec<Badge>>> {
    let badges = load_catalog(&state).await?;
    Ok(Json(badges))
}

pub async fn check_badges(State(state): State<AppState>) -> AppResult<Json<BadgeCheckResponse>> {
    let newly_earned = run_badge_check(&state).await?;
    let badges = load_catalog(&state).await?;
    Ok(Json(BadgeCheckResponse {
        newly_earned,
        badges,
    }))
}

/// Load the stored catalog, seeding the static one on first use. Applies the
/// icon-URL migration and persists any rewrite.
pub(crate) async fn load_catalog(state: &AppState) -> AppResult<Vec<Badge>> {
    let mut badges: Vec<Badge> = state.store.read_vec(StoreKey::Badges).await?;
    if badges.is_empty() {
        badges = default_catalog();
        state.store.write_vec(StoreKey::Badges, &badges).await?;
        return Ok(badges);
    }
    if migrate_icon_urls(&mut badges) {
        tracing::info!("Migrated badge icon URLs");
        state.store.write_vec(StoreKey::Badges, &badges).await?;
    }
    Ok(badges)
}

/// Re-evaluate the whole catalog against current aggregates and write it
/// back unconditionally. Invoked after every mutating log event.
pub(crate) async fn run_badge_check(state: &AppState) -> AppResult<Vec<String>> {
    let mut badges = load_catalog(state).await?;

    let activities = crate::handlers::stats::own_activities(state).await?;
    let daily: Vec<DailyStats> = state.store.read_vec(StoreKey::DailyStats).await?;
    let water: Vec<WaterIntake> = state.store.read_vec(StoreKey::WaterIntake).await?;
    let weights: Vec<WeightEntry> = state.store.read_vec(StoreKey::WeightEntries).await?;
    let profile = crate::handlers::profile::ensure_profile(state).await?;

    let ctx = BadgeContext {
        activities: &activities,
        daily: &daily,
        water: &water,
        weights: &weights,
        friend_count: profile.friends.len(),
        today: Utc::now().date_naive(),
    };
    let newly_earned = evaluate(&mut badges, &ctx, Utc::now());
    state.store.write_vec(StoreKey::Badges, &badges).await?;

    if !newly_earned.is_empty() {
        tracing::info!(badges = ?newly_earned, "Badges earned");
        if let Some(tx) = state.ws_tx.as_ref() {
            let msg = serde_json::json!({
                "type": "badges_earned",
                "badge_ids": newly_earned,
            });
            let _ = tx.send(msg.to_string());
        }
    }

    Ok(newly_earned)
}
