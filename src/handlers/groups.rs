use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::db::StoreKey;
use crate::dto::MessageResponse;
use crate::error::{AppError, AppResult};
use crate::models::activity::Activity;
use crate::models::group::{
    CreateChallengeRequest, CreateGroupRequest, Group, GroupChallenge, GroupMember,
    LeaderboardEntry, Message, MessageQuery, SendMessageRequest,
};
use crate::services::challenges;
use crate::AppState;

pub async fn create_group(
    State(state): State<AppState>,
    Json(body): Json<CreateGroupRequest>,
) -> AppResult<Json<Group>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = crate::handlers::profile::ensure_profile(&state).await?;
    let group = Group {
        id: Uuid::new_v4(),
        name: body.name,
        description: body.description,
        members: vec![GroupMember {
            id: profile.id,
            name: profile.name,
        }],
        created_at: Utc::now(),
    };

    let mut groups: Vec<Group> = state.store.read_vec(StoreKey::Groups).await?;
    groups.push(group.clone());
    state.store.write_vec(StoreKey::Groups, &groups).await?;

    Ok(Json(group))
}

pub async fn list_groups(State(state): State<AppState>) -> AppResult<Json<Vec<Group>>> {
    let groups: Vec<Group> = state.store.read_vec(StoreKey::Groups).await?;
    Ok(Json(groups))
}

pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> AppResult<Json<Group>> {
    let groups: Vec<Group> = state.store.read_vec(StoreKey::Groups).await?;
    let group = groups
        .into_iter()
        .find(|g| g.id == group_id)
        .ok_or(AppError::NotFound("Group not found".into()))?;
    Ok(Json(group))
}

pub async fn join_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> AppResult<Json<Group>> {
    let profile = crate::handlers::profile::ensure_profile(&state).await?;

    let mut groups: Vec<Group> = state.store.read_vec(StoreKey::Groups).await?;
    let group = groups
        .iter_mut()
        .find(|g| g.id == group_id)
        .ok_or(AppError::NotFound("Group not found".into()))?;

    if group.members.iter().any(|m| m.id == profile.id) {
        return Err(AppError::Conflict("Already a member of this group".into()));
    }
    group.members.push(GroupMember {
        id: profile.id,
        name: profile.name,
    });

    let joined = group.clone();
    state.store.write_vec(StoreKey::Groups, &groups).await?;

    Ok(Json(joined))
}

pub async fn leave_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let profile = crate::handlers::profile::ensure_profile(&state).await?;

    let mut groups: Vec<Group> = state.store.read_vec(StoreKey::Groups).await?;
    let group = groups
        .iter_mut()
        .find(|g| g.id == group_id)
        .ok_or(AppError::NotFound("Group not found".into()))?;

    let before = group.members.len();
    group.members.retain(|m| m.id != profile.id);
    if group.members.len() == before {
        return Err(AppError::NotFound("Not a member of this group".into()));
    }
    state.store.write_vec(StoreKey::Groups, &groups).await?;

    Ok(Json(MessageResponse {
        message: "Left group".into(),
    }))
}

/// Send a chat message to a group or directly to another member. Exactly one
/// of `group_id` / `recipient_id` must be set.
pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> AppResult<Json<Message>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    if body.group_id.is_some() == body.recipient_id.is_some() {
        return Err(AppError::Validation(
            "Set exactly one of group_id or recipient_id".into(),
        ));
    }

    let profile = crate::handlers::profile::ensure_profile(&state).await?;

    if let Some(group_id) = body.group_id {
        let groups: Vec<Group> = state.store.read_vec(StoreKey::Groups).await?;
        let group = groups
            .iter()
            .find(|g| g.id == group_id)
            .ok_or(AppError::NotFound("Group not found".into()))?;
        if !group.members.iter().any(|m| m.id == profile.id) {
            return Err(AppError::Validation("Not a member of this group".into()));
        }
    }

    let message = Message {
        id: Uuid::new_v4(),
        sender_id: profile.id,
        group_id: body.group_id,
        recipient_id: body.recipient_id,
        content: body.content,
        sent_at: Utc::now(),
    };

    let mut messages: Vec<Message> = state.store.read_vec(StoreKey::Messages).await?;
    messages.push(message.clone());
    state.store.write_vec(StoreKey::Messages, &messages).await?;

    if let Some(tx) = state.ws_tx.as_ref() {
        let msg = serde_json::json!({
            "type": "message_sent",
            "message_id": message.id,
            "group_id": message.group_id,
            "recipient_id": message.recipient_id,
        });
        let _ = tx.send(msg.to_string());
    }

    Ok(Json(message))
}

pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> AppResult<Json<Vec<Message>>> {
    let mut messages: Vec<Message> = state.store.read_vec(StoreKey::Messages).await?;
    if let Some(group_id) = query.group_id {
        messages.retain(|m| m.group_id == Some(group_id));
    }
    if let Some(recipient_id) = query.recipient_id {
        messages.retain(|m| m.recipient_id == Some(recipient_id));
    }
    messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));
    Ok(Json(messages))
}

pub async fn create_challenge(
    State(state): State<AppState>,
    Json(body): Json<CreateChallengeRequest>,
) -> AppResult<Json<GroupChallenge>> {
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;

    if body.ends_on < body.starts_on {
        return Err(AppError::Validation(
            "Challenge must end on or after its start date".into(),
        ));
    }

    let groups: Vec<Group> = state.store.read_vec(StoreKey::Groups).await?;
    if !groups.iter().any(|g| g.id == body.group_id) {
        return Err(AppError::NotFound("Group not found".into()));
    }

    let challenge = GroupChallenge {
        id: Uuid::new_v4(),
        group_id: body.group_id,
        title: body.title,
        metric: body.metric,
        target: body.target,
        starts_on: body.starts_on,
        ends_on: body.ends_on,
        created_at: Utc::now(),
    };

    let mut all: Vec<GroupChallenge> = state.store.read_vec(StoreKey::Challenges).await?;
    all.push(challenge.clone());
    state.store.write_vec(StoreKey::Challenges, &all).await?;

    Ok(Json(challenge))
}

#[derive(Debug, serde::Deserialize)]
pub struct ChallengeQuery {
    pub group_id: Option<Uuid>,
}

pub async fn list_challenges(
    State(state): State<AppState>,
    Query(query): Query<ChallengeQuery>,
) -> AppResult<Json<Vec<GroupChallenge>>> {
    let mut all: Vec<GroupChallenge> = state.store.read_vec(StoreKey::Challenges).await?;
    if let Some(group_id) = query.group_id {
        all.retain(|c| c.group_id == group_id);
    }
    Ok(Json(all))
}

/// Standings are a pure function of the activity log; nothing is cached.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(challenge_id): Path<Uuid>,
) -> AppResult<Json<Vec<LeaderboardEntry>>> {
    let all: Vec<GroupChallenge> = state.store.read_vec(StoreKey::Challenges).await?;
    let challenge = all
        .iter()
        .find(|c| c.id == challenge_id)
        .ok_or(AppError::NotFound("Challenge not found".into()))?;

    let groups: Vec<Group> = state.store.read_vec(StoreKey::Groups).await?;
    let group = groups
        .iter()
        .find(|g| g.id == challenge.group_id)
        .ok_or(AppError::NotFound("Group not found".into()))?;

    let activities: Vec<Activity> = state.store.read_vec(StoreKey::Activities).await?;

    Ok(Json(challenges::leaderboard(challenge, group, &activities)))
}
