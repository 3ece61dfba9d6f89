use serde::{de::DeserializeOwned, Serialize};
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};

/// One key per persisted data category. Each key holds the JSON-serialized
/// collection (or single record) for that category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    Activities,
    DailyStats,
    WeightEntries,
    WaterIntake,
    Moods,
    SleepEntries,
    Badges,
    Goals,
    WorkoutPlans,
    WorkoutSessions,
    Groups,
    Messages,
    Challenges,
    Profile,
    ReminderSettings,
    ScheduledReminders,
}

impl StoreKey {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::Activities => "activities",
            StoreKey::DailyStats => "daily_stats",
            StoreKey::WeightEntries => "weight_entries",
            StoreKey::WaterIntake => "water_intake",
            StoreKey::Moods => "moods",
            StoreKey::SleepEntries => "sleep_entries",
            StoreKey::Badges => "badges",
            StoreKey::Goals => "goals",
            StoreKey::WorkoutPlans => "workout_plans",
            StoreKey::WorkoutSessions => "workout_sessions",
            StoreKey::Groups => "groups",
            StoreKey::Messages => "messages",
            StoreKey::Challenges => "challenges",
            StoreKey::Profile => "profile",
            StoreKey::ReminderSettings => "reminder_settings",
            StoreKey::ScheduledReminders => "scheduled_reminders",
        }
    }
}

/// Flat key-value store. Values are whole JSON documents written back in one
/// piece; concurrent writers to the same key are last-write-wins. Every
/// derived collection can be recomputed from the event logs, so a torn
/// multi-key update heals on the next recompute.
#[derive(Clone)]
pub struct Store {
    db: SqlitePool,
}

impl Store {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }

    /// Read the collection under `key`. A missing key is an empty collection,
    /// not an error.
    pub async fn read_vec<T: DeserializeOwned>(&self, key: StoreKey) -> AppResult<Vec<T>> {
        match self.read_raw(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt value for {}: {e}", key.as_str()))),
            None => Ok(Vec::new()),
        }
    }

    pub async fn write_vec<T: Serialize>(&self, key: StoreKey, items: &[T]) -> AppResult<()> {
        let raw = serde_json::to_string(items)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serialize {}: {e}", key.as_str())))?;
        self.write_raw(key, &raw).await
    }

    /// Read the single record under `key`, if one has been written.
    pub async fn read_one<T: DeserializeOwned>(&self, key: StoreKey) -> AppResult<Option<T>> {
        match self.read_raw(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt value for {}: {e}", key.as_str()))),
            None => Ok(None),
        }
    }

    pub async fn write_one<T: Serialize>(&self, key: StoreKey, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serialize {}: {e}", key.as_str())))?;
        self.write_raw(key, &raw).await
    }

    /// True when nothing has ever been written. Used for seed-on-empty.
    pub async fn is_empty(&self) -> AppResult<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM store")
            .fetch_one(&self.db)
            .await?;
        Ok(count == 0)
    }

    /// Drop every key. Seed reset rebuilds from scratch afterwards.
    pub async fn clear(&self) -> AppResult<()> {
        sqlx::query("DELETE FROM store").execute(&self.db).await?;
        Ok(())
    }

    async fn read_raw(&self, key: StoreKey) -> AppResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM store WHERE key = ?1")
            .bind(key.as_str())
            .fetch_optional(&self.db)
            .await?;
        Ok(value)
    }

    async fn write_raw(&self, key: StoreKey, value: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO store (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            "#,
        )
        .bind(key.as_str())
        .bind(value)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}
