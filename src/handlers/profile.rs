use axum::{extract::State, Json};
use validator::Validate;

use crate::db::StoreKey;
use crate::error::{AppError, AppResult};
use crate::models::profile::{Profile, UpdateProfileRequest};
use crate::AppState;

pub async fn get_profile(State(state): State<AppState>) -> AppResult<Json<Profile>> {
    let profile = ensure_profile(&state).await?;
    Ok(Json(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> AppResult<Json<Profile>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let mut profile = ensure_profile(&state).await?;
    if let Some(name) = body.name {
        profile.name = name;
    }
    if let Some(friends) = body.friends {
        profile.friends = friends;
    }
    state.store.write_one(StoreKey::Profile, &profile).await?;

    // A bigger friends list can satisfy the friends badge.
    crate::handlers::badges::run_badge_check(&state).await?;

    Ok(Json(profile))
}

/// The single local profile, created lazily on first use.
pub(crate) async fn ensure_profile(state: &AppState) -> AppResult<Profile> {
    if let Some(profile) = state.store.read_one::<Profile>(StoreKey::Profile).await? {
        return Ok(profile);
    }
    let profile = Profile::new("Fit Tracker");
    state.store.write_one(StoreKey::Profile, &profile).await?;
    Ok(profile)
}
