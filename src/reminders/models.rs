//! Data models for review reminders

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::concepts::Concept;

pub const REMINDER_TITLE: &str = "Time to Review!";

/// Data attached to a reminder so the receiver can open the right concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPayload {
    pub concept_id: Uuid,
    pub concept_name: String,
}

/// A request to notify the user at `trigger_at`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub trigger_at: DateTime<Utc>,
    pub payload: ReminderPayload,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// Review reminder for `concept` firing at `trigger_at`
    pub fn review(concept: &Concept, trigger_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: REMINDER_TITLE.to_string(),
            body: format!("It's time to review \"{}\"", concept.name),
            trigger_at,
            payload: ReminderPayload {
                concept_id: concept.id,
                concept_name: concept.name.clone(),
            },
            created_at: now,
        }
    }

    pub fn is_pending(&self, now: DateTime<Utc>) -> bool {
        self.trigger_at > now
    }
}
