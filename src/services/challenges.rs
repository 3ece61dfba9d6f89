//! Challenge standings, recomputed from the activity log on every read.

use crate::models::activity::Activity;
use crate::models::group::{ChallengeMetric, Group, GroupChallenge, LeaderboardEntry};

/// Rank every group member by their metric total inside the challenge
/// window. Ties keep member order; ranks are 1-based.
pub fn leaderboard(
    challenge: &GroupChallenge,
    group: &Group,
    activities: &[Activity],
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = group
        .members
        .iter()
        .map(|member| {
            let value = activities
                .iter()
                .filter(|a| {
                    a.user_id == member.id
                        && a.date >= challenge.starts_on
                        && a.date <= challenge.ends_on
                })
                .map(|a| metric_value(challenge.metric, a))
                .sum();
            LeaderboardEntry {
                member: member.clone(),
                value,
                rank: 0,
            }
        })
        .collect();

    entries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
    entries
}

fn metric_value(metric: ChallengeMetric, activity: &Activity) -> f64 {
    match metric {
        ChallengeMetric::Steps => activity.steps.unwrap_or(0) as f64,
        ChallengeMetric::DistanceKm => activity.distance_km.unwrap_or(0.0),
        ChallengeMetric::Calories => activity.calories as f64,
        ChallengeMetric::ActiveMinutes => activity.duration_min as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::ActivityKind;
    use crate::models::group::GroupMember;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn make_activity(user_id: Uuid, date: NaiveDate, steps: i64) -> Activity {
        Activity {
            id: Uuid::new_v4(),
            user_id,
            kind: ActivityKind::Walking,
            name: "Walk".into(),
            duration_min: 30,
            calories: 120,
            distance_km: None,
            steps: Some(steps),
            date,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_leaderboard_ranks_by_metric_total() {
        let alice = GroupMember { id: Uuid::new_v4(), name: "Alice".into() };
        let bob = GroupMember { id: Uuid::new_v4(), name: "Bob".into() };
        let group = Group {
            id: Uuid::new_v4(),
            name: "Walkers".into(),
            description: None,
            members: vec![alice.clone(), bob.clone()],
            created_at: Utc::now(),
        };
        let challenge = GroupChallenge {
            id: Uuid::new_v4(),
            group_id: group.id,
            title: "March steps".into(),
            metric: ChallengeMetric::Steps,
            target: 50_000.0,
            starts_on: day(1),
            ends_on: day(31),
            created_at: Utc::now(),
        };
        let activities = vec![
            make_activity(alice.id, day(2), 4000),
            make_activity(bob.id, day(2), 6000),
            make_activity(alice.id, day(3), 1000),
            // outside the window
            make_activity(alice.id, NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(), 9000),
        ];

        let standings = leaderboard(&challenge, &group, &activities);

        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].member, bob);
        assert_eq!(standings[0].value, 6000.0);
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[1].member, alice);
        assert_eq!(standings[1].value, 5000.0);
        assert_eq!(standings[1].rank, 2);
    }

    #[test]
    fn test_leaderboard_empty_group() {
        let group = Group {
            id: Uuid::new_v4(),
            name: "Ghost town".into(),
            description: None,
            members: vec![],
            created_at: Utc::now(),
        };
        let challenge = GroupChallenge {
            id: Uuid::new_v4(),
            group_id: group.id,
            title: "Nobody".into(),
            metric: ChallengeMetric::Calories,
            target: 100.0,
            starts_on: day(1),
            ends_on: day(31),
            created_at: Utc::now(),
        };
        assert!(leaderboard(&challenge, &group, &[]).is_empty());
    }
}
