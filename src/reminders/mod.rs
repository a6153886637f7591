//! Review reminders
//!
//! The dispatcher decides *whether* and *when* to remind; delivery is left to
//! a `Notifier` implementation.

pub mod dispatcher;
pub mod models;
pub mod outbox;

use async_trait::async_trait;
use thiserror::Error;

use crate::storage::StoreError;

pub use dispatcher::ReminderDispatcher;
pub use models::*;
pub use outbox::OutboxNotifier;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Failed to schedule notification: {0}")]
    Scheduling(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Capability to deliver a reminder at its trigger time
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn schedule(&self, reminder: &Reminder) -> Result<(), NotifyError>;
}
