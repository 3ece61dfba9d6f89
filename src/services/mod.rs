pub mod badges;
pub mod challenges;
pub mod goals;
pub mod reminders;
pub mod stats;
