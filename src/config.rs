use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    // Daily targets applied when a fresh per-day record is created
    pub daily_step_goal: i64,
    pub daily_water_goal: i32,
    pub daily_calorie_goal: i64,

    // Movement reminders
    pub notifications_enabled: bool,
    pub reminder_interval_min: u32,
    pub reminder_start: String,
    pub reminder_end: String,

    // Seed sample data on first start when the store is empty
    pub seed_on_empty: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://fittrack.db?mode=rwc".into()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            daily_step_goal: env::var("DAILY_STEP_GOAL")
                .unwrap_or_else(|_| "10000".into())
                .parse()
                .expect("DAILY_STEP_GOAL must be a number"),
            daily_water_goal: env::var("DAILY_WATER_GOAL")
                .unwrap_or_else(|_| "8".into())
                .parse()
                .expect("DAILY_WATER_GOAL must be a number"),
            daily_calorie_goal: env::var("DAILY_CALORIE_GOAL")
                .unwrap_or_else(|_| "500".into())
                .parse()
                .expect("DAILY_CALORIE_GOAL must be a number"),

            notifications_enabled: env::var("NOTIFICATIONS_ENABLED")
                .unwrap_or_else(|_| "true".into())
                .parse()
                .unwrap_or(true),
            reminder_interval_min: env::var("REMINDER_INTERVAL_MIN")
                .unwrap_or_else(|_| "60".into())
                .parse()
                .unwrap_or(60),
            reminder_start: env::var("REMINDER_START").unwrap_or_else(|_| "09:00".into()),
            reminder_end: env::var("REMINDER_END").unwrap_or_else(|_| "21:00".into()),

            seed_on_empty: env::var("SEED_ON_EMPTY")
                .unwrap_or_else(|_| "false".into())
                .parse()
                .unwrap_or(false),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 9090,
            frontend_url: "http://localhost:3000".into(),
            daily_step_goal: 10000,
            daily_water_goal: 8,
            daily_calorie_goal: 500,
            notifications_enabled: true,
            reminder_interval_min: 60,
            reminder_start: "09:00".into(),
            reminder_end: "21:00".into(),
            seed_on_empty: false,
        }
    }

    #[test]
    fn test_listen_addr_format() {
        assert_eq!(test_config().listen_addr(), "127.0.0.1:9090");
    }
}
