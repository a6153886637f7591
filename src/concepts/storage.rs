//! Concept repository
//!
//! Store layout (key → JSON value):
//! ```text
//! userName  → "Ada"
//! concepts  → [ { id, name, description, checkpoints, reviewLog, createdAt, updatedAt }, ... ]
//! ```
//!
//! The whole collection is read and replaced as one value. All mutations go
//! through [`ConceptRepository::update`], which holds the repository lock for
//! the full load → modify → save cycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::algorithm::{ReviewScheduler, SchedulerSettings};
use super::dashboard::Dashboard;
use super::models::{Concept, NewConcept, StoredConcept};
use crate::storage::{KeyValueStore, StoreError};

pub const CONCEPTS_KEY: &str = "concepts";
pub const USER_NAME_KEY: &str = "userName";

#[derive(Error, Debug)]
pub enum ConceptError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Malformed data under '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid concept record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Failed to encode concepts: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Concept not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid schedule settings: {0}")]
    InvalidSchedule(String),
}

pub type Result<T> = std::result::Result<T, ConceptError>;

/// Repository for the concept collection and the user's display name
pub struct ConceptRepository {
    store: Arc<dyn KeyValueStore>,
    scheduler: ReviewScheduler,
    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl ConceptRepository {
    /// Repository using the default schedule
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            scheduler: ReviewScheduler::default(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_settings(store: Arc<dyn KeyValueStore>, settings: SchedulerSettings) -> Result<Self> {
        let scheduler = ReviewScheduler::new(settings).map_err(ConceptError::InvalidSchedule)?;
        Ok(Self {
            store,
            scheduler,
            write_lock: Mutex::new(()),
        })
    }

    // ==================== Collection Operations ====================

    /// Load every concept. A store that has never been written yields an
    /// empty collection.
    pub async fn load(&self) -> Result<Vec<Concept>> {
        let raw = match self.store.get(CONCEPTS_KEY).await? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        let records: Vec<StoredConcept> =
            serde_json::from_str(&raw).map_err(|source| ConceptError::Malformed {
                key: CONCEPTS_KEY.to_string(),
                source,
            })?;

        let mut migrated = 0;
        let mut concepts = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let concept = match record {
                StoredConcept::Current(concept) => concept,
                StoredConcept::Legacy(legacy) => {
                    migrated += 1;
                    legacy.into_concept(index).ok_or_else(|| ConceptError::InvalidRecord {
                        index,
                        reason: "no review dates".to_string(),
                    })?
                }
            };
            validate_record(index, &concept)?;
            concepts.push(concept);
        }

        if migrated > 0 {
            log::info!("Migrated {} legacy concept records", migrated);
        }

        Ok(concepts)
    }

    /// Replace the stored collection
    pub async fn save(&self, concepts: &[Concept]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.write(concepts).await
    }

    async fn write(&self, concepts: &[Concept]) -> Result<()> {
        let json = serde_json::to_string_pretty(concepts).map_err(ConceptError::Encode)?;
        self.store.set(CONCEPTS_KEY, json).await?;
        log::debug!("Saved {} concepts", concepts.len());
        Ok(())
    }

    /// Atomically load the collection, apply `f`, and save the result.
    ///
    /// Nothing is written when `f` returns an error.
    pub async fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Concept>, &ReviewScheduler) -> Result<T>,
    {
        let _guard = self.write_lock.lock().await;
        let mut concepts = self.load().await?;
        let out = f(&mut concepts, &self.scheduler)?;
        self.write(&concepts).await?;
        Ok(out)
    }

    // ==================== Concept Operations ====================

    /// Create a concept seeded with the configured plan and append it
    pub async fn add_concept(&self, request: NewConcept, now: DateTime<Utc>) -> Result<Concept> {
        let name = request.name.trim();
        let description = request.description.trim();
        if name.is_empty() {
            return Err(ConceptError::InvalidInput("Concept name must not be empty".to_string()));
        }
        if description.is_empty() {
            return Err(ConceptError::InvalidInput(
                "Concept description must not be empty".to_string(),
            ));
        }

        let concept = self
            .scheduler
            .new_concept(name.to_string(), description.to_string(), now);

        let created = concept.clone();
        self.update(move |concepts, _| {
            concepts.push(concept);
            Ok(())
        })
        .await?;

        log::info!("Added concept '{}' ({})", created.name, created.id);
        Ok(created)
    }

    /// Record a review outcome and return the updated concept
    pub async fn record_review(&self, id: Uuid, success: bool, now: DateTime<Utc>) -> Result<Concept> {
        self.update(|concepts, scheduler| {
            let concept = concepts
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or(ConceptError::NotFound(id))?;
            let next = scheduler.record_review(concept, success, now);
            log::info!(
                "Recorded {} review of '{}', next review at {}",
                if success { "successful" } else { "failed" },
                concept.name,
                next.to_rfc3339()
            );
            Ok(concept.clone())
        })
        .await
    }

    /// Delete a concept and return it
    pub async fn remove_concept(&self, id: Uuid) -> Result<Concept> {
        self.update(|concepts, _| {
            let pos = concepts
                .iter()
                .position(|c| c.id == id)
                .ok_or(ConceptError::NotFound(id))?;
            Ok(concepts.remove(pos))
        })
        .await
    }

    pub async fn get_concept(&self, id: Uuid) -> Result<Concept> {
        self.load()
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(ConceptError::NotFound(id))
    }

    /// Concepts whose name matches `name` case-insensitively. Exact matches
    /// win; otherwise every concept whose name starts with `name` is returned.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Concept>> {
        let needle = name.trim().to_lowercase();
        let concepts = self.load().await?;

        let exact: Vec<Concept> = concepts
            .iter()
            .filter(|c| c.name.to_lowercase() == needle)
            .cloned()
            .collect();
        if !exact.is_empty() {
            return Ok(exact);
        }

        Ok(concepts
            .into_iter()
            .filter(|c| c.name.to_lowercase().starts_with(&needle))
            .collect())
    }

    // ==================== User Operations ====================

    pub async fn user_name(&self) -> Result<Option<String>> {
        let raw = match self.store.get(USER_NAME_KEY).await? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str::<String>(&raw) {
            Ok(name) => Ok(Some(name)),
            // Earlier versions stored the bare name without JSON quoting
            Err(_) => {
                log::debug!("Reading unquoted legacy value for '{}'", USER_NAME_KEY);
                Ok(Some(raw))
            }
        }
    }

    pub async fn set_user_name(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConceptError::InvalidInput("Name must not be empty".to_string()));
        }
        let json = serde_json::to_string(name).map_err(ConceptError::Encode)?;
        self.store.set(USER_NAME_KEY, json).await?;
        Ok(name.to_string())
    }

    // ==================== Dashboard ====================

    pub async fn dashboard(&self, now: DateTime<Utc>) -> Result<Dashboard> {
        let user_name = self.user_name().await?;
        let concepts = self.load().await?;
        Ok(Dashboard::build(user_name.as_deref(), &concepts, now))
    }
}

fn validate_record(index: usize, concept: &Concept) -> Result<()> {
    let invalid = |reason: &str| ConceptError::InvalidRecord {
        index,
        reason: reason.to_string(),
    };

    if concept.name.trim().is_empty() {
        return Err(invalid("empty name"));
    }
    if concept.checkpoints.is_empty() {
        return Err(invalid("no planned checkpoints"));
    }
    Ok(())
}
