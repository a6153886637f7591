//! Outbox for scheduled reminders
//!
//! Reminders are kept under the `reminders` key of the data store (the
//! `reminders.json` file for a [`FileStore`](crate::storage::FileStore)) for
//! an external delivery agent to pick up.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::models::Reminder;
use super::{Notifier, NotifyError};
use crate::storage::KeyValueStore;

pub const REMINDERS_KEY: &str = "reminders";

pub struct OutboxNotifier {
    store: Arc<dyn KeyValueStore>,
    lock: Mutex<()>,
}

impl OutboxNotifier {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// All reminders still in the outbox, ordered by trigger time
    pub async fn list(&self) -> Result<Vec<Reminder>, NotifyError> {
        let mut reminders: Vec<Reminder> = match self.store.get(REMINDERS_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => return Ok(Vec::new()),
        };
        reminders.sort_by(|a, b| a.trigger_at.cmp(&b.trigger_at));
        Ok(reminders)
    }

    /// Reminders that have not fired yet at `now`
    pub async fn pending(&self, now: DateTime<Utc>) -> Result<Vec<Reminder>, NotifyError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|r| r.is_pending(now))
            .collect())
    }

    /// Drop every reminder for `concept_id` and return how many were removed
    pub async fn cancel_for(&self, concept_id: Uuid) -> Result<usize, NotifyError> {
        let _guard = self.lock.lock().await;

        let mut reminders = self.list().await?;
        let before = reminders.len();
        reminders.retain(|r| r.payload.concept_id != concept_id);

        let cancelled = before - reminders.len();
        if cancelled > 0 {
            self.write(&reminders).await?;
            log::debug!("Cancelled {} reminders for concept {}", cancelled, concept_id);
        }
        Ok(cancelled)
    }

    async fn write(&self, reminders: &[Reminder]) -> Result<(), NotifyError> {
        let json = serde_json::to_string_pretty(reminders)?;
        self.store.set(REMINDERS_KEY, json).await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for OutboxNotifier {
    async fn schedule(&self, reminder: &Reminder) -> Result<(), NotifyError> {
        let _guard = self.lock.lock().await;

        let mut reminders = self.list().await?;
        reminders.push(reminder.clone());
        self.write(&reminders).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concepts::Concept;
    use crate::storage::{FileStore, MemoryStore};
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn create_test_outbox() -> (OutboxNotifier, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (OutboxNotifier::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_empty_outbox() {
        let (outbox, _store) = create_test_outbox();
        assert!(outbox.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_schedule_persists_sorted() {
        let (outbox, _store) = create_test_outbox();
        let late = Concept::new("Late".to_string(), "x".to_string(), t0() + Duration::days(3));
        let early = Concept::new("Early".to_string(), "y".to_string(), t0());

        outbox
            .schedule(&Reminder::review(&late, t0() + Duration::days(4), t0()))
            .await
            .unwrap();
        outbox
            .schedule(&Reminder::review(&early, t0() + Duration::days(1), t0()))
            .await
            .unwrap();

        let reminders = outbox.list().await.unwrap();
        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[0].payload.concept_name, "Early");
        assert_eq!(reminders[1].payload.concept_name, "Late");
    }

    #[tokio::test]
    async fn test_pending_filters_fired_reminders() {
        let (outbox, _store) = create_test_outbox();
        let concept = Concept::new("Borrowing".to_string(), "x".to_string(), t0());

        outbox
            .schedule(&Reminder::review(&concept, t0() + Duration::days(1), t0()))
            .await
            .unwrap();
        outbox
            .schedule(&Reminder::review(&concept, t0() + Duration::days(5), t0()))
            .await
            .unwrap();

        let pending = outbox.pending(t0() + Duration::days(2)).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].trigger_at, t0() + Duration::days(5));
    }

    #[tokio::test]
    async fn test_cancel_for_removes_only_that_concept() {
        let (outbox, _store) = create_test_outbox();
        let removed = Concept::new("Lifetimes".to_string(), "x".to_string(), t0());
        let kept = Concept::new("Generics".to_string(), "y".to_string(), t0());

        outbox
            .schedule(&Reminder::review(&removed, t0() + Duration::days(1), t0()))
            .await
            .unwrap();
        outbox
            .schedule(&Reminder::review(&kept, t0() + Duration::days(1), t0()))
            .await
            .unwrap();

        assert_eq!(outbox.cancel_for(removed.id).await.unwrap(), 1);
        assert_eq!(outbox.cancel_for(removed.id).await.unwrap(), 0);

        let pending = outbox.pending(t0()).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].payload.concept_id, kept.id);
    }

    #[tokio::test]
    async fn test_cancel_for_on_empty_outbox_writes_nothing() {
        let (outbox, store) = create_test_outbox();

        assert_eq!(outbox.cancel_for(Uuid::new_v4()).await.unwrap(), 0);
        assert!(store.get(REMINDERS_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_outbox_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        let outbox = OutboxNotifier::new(Arc::new(FileStore::new(data_dir.clone())));
        let concept = Concept::new("Macros".to_string(), "x".to_string(), t0());

        outbox
            .schedule(&Reminder::review(&concept, t0() + Duration::days(1), t0()))
            .await
            .unwrap();

        let names: Vec<String> = std::fs::read_dir(&data_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["reminders.json".to_string()]);
        assert_eq!(outbox.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_outbox_is_an_error() {
        let (outbox, store) = create_test_outbox();
        store.set(REMINDERS_KEY, "not json".to_string()).await.unwrap();

        assert!(matches!(outbox.list().await, Err(NotifyError::Json(_))));
    }
}
