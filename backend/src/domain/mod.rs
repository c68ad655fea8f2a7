//! Domain logic shared by the routes, the storage queries and the sweep.

pub mod care_plans;
pub mod reminders;
