use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::models::Reminder;
use super::{Notifier, NotifyError};
use crate::concepts::Concept;

/// Turns newly created concepts into reminder requests
pub struct ReminderDispatcher {
    notifier: Arc<dyn Notifier>,
}

impl ReminderDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Reminder for the concept's first checkpoint, if that is still ahead of `now`
    pub fn reminder_for(concept: &Concept, now: DateTime<Utc>) -> Option<Reminder> {
        let first = *concept.checkpoints.first()?;
        if first > now {
            Some(Reminder::review(concept, first, now))
        } else {
            None
        }
    }

    /// Request exactly one reminder for a freshly created concept.
    ///
    /// Returns the scheduled reminder, or `None` when the first checkpoint has
    /// already passed.
    pub async fn dispatch_for_new_concept(
        &self,
        concept: &Concept,
        now: DateTime<Utc>,
    ) -> Result<Option<Reminder>, NotifyError> {
        let reminder = match Self::reminder_for(concept, now) {
            Some(reminder) => reminder,
            None => {
                log::debug!(
                    "First review of '{}' already passed, no reminder scheduled",
                    concept.name
                );
                return Ok(None);
            }
        };

        self.notifier.schedule(&reminder).await?;
        log::info!(
            "Scheduled reminder for '{}' at {}",
            concept.name,
            reminder.trigger_at.to_rfc3339()
        );
        Ok(Some(reminder))
    }
}
