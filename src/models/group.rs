use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupMember {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<GroupMember>,
    pub created_at: DateTime<Utc>,
}

/// A chat message, tagged with either a group or a direct recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub group_id: Option<Uuid>,
    pub recipient_id: Option<Uuid>,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeMetric {
    Steps,
    DistanceKm,
    Calories,
    ActiveMinutes,
}

/// A group competition over a date window. Standings are recomputed from the
/// activity log on read; nothing is stored per-member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupChallenge {
    pub id: Uuid,
    pub group_id: Uuid,
    pub title: String,
    pub metric: ChallengeMetric,
    pub target: f64,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub member: GroupMember,
    pub value: f64,
    pub rank: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub group_id: Option<Uuid>,
    pub recipient_id: Option<Uuid>,
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub group_id: Option<Uuid>,
    pub recipient_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateChallengeRequest {
    pub group_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    pub metric: ChallengeMetric,
    #[validate(range(min = 0.0))]
    pub target: f64,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}
