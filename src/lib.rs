//! Spaced-repetition engine for personal knowledge retention.
//!
//! Concepts are seeded with a review plan when created, each review outcome
//! pushes the next review further out (or back to tomorrow on failure), and
//! the dashboard splits the collection into what is due now and what is
//! coming up.

pub mod concepts;
pub mod config;
pub mod reminders;
pub mod storage;

use std::sync::Arc;

use config::Settings;
use concepts::{ConceptError, ConceptRepository};
use reminders::{OutboxNotifier, ReminderDispatcher};
use storage::FileStore;

/// File-backed services wired from resolved settings
pub struct AppState {
    pub settings: Settings,
    pub repository: Arc<ConceptRepository>,
    pub outbox: Arc<OutboxNotifier>,
    pub dispatcher: ReminderDispatcher,
}

impl AppState {
    pub fn open(settings: Settings) -> Result<Self, ConceptError> {
        let store = Arc::new(FileStore::new(settings.data_dir.clone()));
        let repository = ConceptRepository::with_settings(store.clone(), settings.scheduler.clone())?;
        let outbox = Arc::new(OutboxNotifier::new(store));
        let dispatcher = ReminderDispatcher::new(outbox.clone());

        log::info!("Opened concept store at {:?}", settings.data_dir);

        Ok(Self {
            settings,
            repository: Arc::new(repository),
            outbox,
            dispatcher,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use concepts::NewConcept;
    use config::ReminderSettings;
    use tempfile::TempDir;

    fn open_state(temp_dir: &TempDir) -> AppState {
        AppState::open(Settings {
            data_dir: temp_dir.path().join("data"),
            scheduler: Default::default(),
            reminders: ReminderSettings::default(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_removed_concept_reminders_can_be_cancelled() {
        let temp_dir = TempDir::new().unwrap();
        let state = open_state(&temp_dir);
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();

        let concept = state
            .repository
            .add_concept(
                NewConcept {
                    name: "Pinning".to_string(),
                    description: "Self-referential futures".to_string(),
                },
                now,
            )
            .await
            .unwrap();
        state.dispatcher.dispatch_for_new_concept(&concept, now).await.unwrap();
        assert_eq!(state.outbox.pending(now).await.unwrap().len(), 1);

        state.repository.remove_concept(concept.id).await.unwrap();
        assert_eq!(state.outbox.cancel_for(concept.id).await.unwrap(), 1);
        assert!(state.outbox.pending(now).await.unwrap().is_empty());

        // Concepts and reminders share the data directory
        let reopened = open_state(&temp_dir);
        assert!(reopened.repository.load().await.unwrap().is_empty());
        assert!(reopened.outbox.list().await.unwrap().is_empty());
    }
}
