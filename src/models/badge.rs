use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Asset host badge icons moved to. Stored catalogs may still carry the old
/// `assets.fittrack.app` URLs; `migrate_icon_urls` rewrites them on load.
const ICON_BASE: &str = "https://cdn.fittrack.app/badges";
const LEGACY_ICON_BASE: &str = "http://assets.fittrack.app/badges";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Steps,
    ConsecutiveDays,
    WeightLoss,
    Calories,
    Water,
    Friends,
}

/// A one-way achievement flag: `earned` is set by the evaluator and never
/// unset, even if the underlying aggregate later drops below the requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub kind: BadgeKind,
    pub requirement: f64,
    pub earned: bool,
    pub earned_date: Option<DateTime<Utc>>,
}

impl Badge {
    fn new(id: &str, name: &str, description: &str, kind: BadgeKind, requirement: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: format!("{ICON_BASE}/{id}.png"),
            kind,
            requirement,
            earned: false,
            earned_date: None,
        }
    }
}

/// The static badge catalog. Written to the store on first start; earned
/// flags accumulate on top of it from then on.
pub fn default_catalog() -> Vec<Badge> {
    vec![
        Badge::new(
            "first-steps",
            "First Steps",
            "Walk 5,000 steps in a single day",
            BadgeKind::Steps,
            5_000.0,
        ),
        Badge::new(
            "step-master",
            "Step Master",
            "Walk 10,000 steps in a single day",
            BadgeKind::Steps,
            10_000.0,
        ),
        Badge::new(
            "week-warrior",
            "Week Warrior",
            "Log an activity 7 days in a row",
            BadgeKind::ConsecutiveDays,
            7.0,
        ),
        Badge::new(
            "consistency-champ",
            "Consistency Champ",
            "Log an activity 30 days in a row",
            BadgeKind::ConsecutiveDays,
            30.0,
        ),
        Badge::new(
            "trimmed-down",
            "Trimmed Down",
            "Lose 5 kg from your first weigh-in",
            BadgeKind::WeightLoss,
            5.0,
        ),
        Badge::new(
            "calorie-crusher",
            "Calorie Crusher",
            "Burn 500 calories in a single day",
            BadgeKind::Calories,
            500.0,
        ),
        Badge::new(
            "well-hydrated",
            "Well Hydrated",
            "Drink 8 glasses of water in a single day",
            BadgeKind::Water,
            8.0,
        ),
        Badge::new(
            "social-butterfly",
            "Social Butterfly",
            "Add 5 friends",
            BadgeKind::Friends,
            5.0,
        ),
    ]
}

/// Ad-hoc icon-URL migration applied when the catalog is loaded. Returns
/// true when any badge was rewritten so the caller can persist the fix.
pub fn migrate_icon_urls(badges: &mut [Badge]) -> bool {
    let mut changed = false;
    for badge in badges.iter_mut() {
        if let Some(rest) = badge.icon.strip_prefix(LEGACY_ICON_BASE) {
            badge.icon = format!("{ICON_BASE}{rest}");
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_eight_unearned_badges() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 8);
        assert!(catalog.iter().all(|b| !b.earned && b.earned_date.is_none()));
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = default_catalog();
        let mut ids: Vec<&str> = catalog.iter().map(|b| b.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_migrate_rewrites_legacy_icon_urls() {
        let mut badges = default_catalog();
        badges[0].icon = format!("{LEGACY_ICON_BASE}/first-steps.png");

        let changed = migrate_icon_urls(&mut badges);

        assert!(changed);
        assert_eq!(badges[0].icon, format!("{ICON_BASE}/first-steps.png"));
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let mut badges = default_catalog();
        assert!(!migrate_icon_urls(&mut badges));
    }
}
