pub mod activities;
pub mod badges;
pub mod goals;
pub mod groups;
pub mod health;
pub mod moods;
pub mod profile;
pub mod reminders;
pub mod seed;
pub mod sleep;
pub mod stats;
pub mod water;
pub mod weight;
pub mod workouts;
pub mod ws;
