pub mod add;
pub mod dashboard;
pub mod name;
pub mod reminders;
pub mod remove;
pub mod review;
pub mod show;
