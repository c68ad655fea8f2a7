//! # Reminder Sweeper
//!
//! Periodic due-evaluation: once a minute, fetch the upcoming reminders
//! and stamp `lastTriggered` on every one whose target fire time is
//! within the due window. Notification delivery is out of scope — only
//! the timestamp bookkeeping happens here. A failure never stops the
//! sweep or future ticks.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::{json, Map};
use shared::Reminder;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::domain::reminders;
use crate::storage::DocumentStore;

const SWEEP_PERIOD: Duration = Duration::from_secs(60);

pub struct ReminderSweeper<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> ReminderSweeper<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the sweep loop in a background task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(SWEEP_PERIOD);
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tick.tick().await;
                self.sweep(Utc::now());
            }
        })
    }

    /// One sweep pass. Returns how many reminders were stamped; errors
    /// are logged per reminder and do not abort the pass.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let upcoming = self.store.upcoming_reminders();
        debug!("sweeping {} upcoming reminders", upcoming.len());

        let mut fired = 0;
        for reminder in upcoming {
            if !reminders::is_due(&reminder, now) {
                continue;
            }
            info!(
                "reminder due: {} for child {}",
                reminder.title, reminder.child_id
            );
            let mut patch = Map::new();
            patch.insert("lastTriggered".to_string(), json!(now));
            match self.store.update::<Reminder>(&reminder.id, patch) {
                Ok(Some(_)) => fired += 1,
                Ok(None) => debug!("reminder {} vanished mid-sweep", reminder.id),
                Err(e) => error!("failed to stamp reminder {}: {}", reminder.id, e),
            }
        }
        fired
    }
}
