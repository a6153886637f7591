//! Data models for concepts and their review history

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::algorithm::seed_schedule;

/// A unit of study material tracked for spaced repetition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Planned review dates assigned at creation. Never modified afterwards.
    pub checkpoints: Vec<DateTime<Utc>>,
    /// Outcomes of actual reviews, oldest first. Append-only.
    #[serde(default)]
    pub review_log: Vec<ReviewEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Concept {
    /// Create a concept seeded with the default checkpoint plan
    pub fn new(name: String, description: String, created_at: DateTime<Utc>) -> Self {
        Self::with_checkpoints(
            name,
            description,
            seed_schedule(created_at).to_vec(),
            created_at,
        )
    }

    pub fn with_checkpoints(
        name: String,
        description: String,
        checkpoints: Vec<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            checkpoints,
            review_log: Vec::new(),
            created_at,
            updated_at: created_at,
        }
    }

    /// Full review history: the planned checkpoints followed by the date each
    /// recorded review scheduled, in insertion order.
    pub fn review_dates(&self) -> Vec<DateTime<Utc>> {
        self.checkpoints
            .iter()
            .copied()
            .chain(self.review_log.iter().map(|e| e.scheduled_for))
            .collect()
    }

    /// When this concept should next be reviewed.
    ///
    /// Taken from the review log once a review has been recorded, otherwise
    /// from the first planned checkpoint.
    pub fn next_review_at(&self) -> Option<DateTime<Utc>> {
        match self.review_log.last() {
            Some(entry) => Some(entry.scheduled_for),
            None => self.checkpoints.first().copied(),
        }
    }

    /// The most recent actual review, if any
    pub fn last_reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.review_log.iter().rev().find_map(|e| e.reviewed_at)
    }

    pub fn has_been_reviewed(&self) -> bool {
        !self.review_log.is_empty()
    }
}

/// One recorded review outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    /// The next review date this outcome produced
    pub scheduled_for: DateTime<Utc>,
    /// When the review happened. Unknown for migrated records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Whether recall succeeded. Unknown for migrated records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

/// Review status of a concept at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConceptStatus {
    /// Never reviewed
    New,
    /// Reviewed, next review still in the future
    Completed,
    /// Reviewed, next review has arrived
    Overdue,
}

impl std::fmt::Display for ConceptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::New => "New",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        };
        f.write_str(label)
    }
}

/// Input for creating a concept
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConcept {
    pub name: String,
    pub description: String,
}

/// Record shape written by earlier versions: a bare list of dates whose first
/// four entries were the seeded plan.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LegacyConcept {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub review_dates: Vec<DateTime<Utc>>,
}

/// Number of seeded dates at the front of a legacy `reviewDates` list
const LEGACY_SEED_LEN: usize = 4;

/// Namespace for ids derived from legacy records
const LEGACY_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a9e_4b7d_4e21_9a53_d0c8_7e41_b2f6);

impl LegacyConcept {
    /// Split the flat date list into plan and log. Returns `None` when there
    /// are no dates to build a plan from.
    ///
    /// The id is derived from the record's position and content, so the same
    /// unsaved legacy collection yields the same ids on every load.
    pub(crate) fn into_concept(self, index: usize) -> Option<Concept> {
        let first = *self.review_dates.first()?;
        let split = self.review_dates.len().min(LEGACY_SEED_LEN);
        let (seeds, reviews) = self.review_dates.split_at(split);

        // Legacy plans always started one day after creation
        let created_at = first - Duration::days(1);
        let updated_at = reviews.last().copied().unwrap_or(created_at);

        let seed = format!("{}:{}:{}", index, self.name, first.to_rfc3339());

        Some(Concept {
            id: Uuid::new_v5(&LEGACY_ID_NAMESPACE, seed.as_bytes()),
            name: self.name,
            description: self.description,
            checkpoints: seeds.to_vec(),
            review_log: reviews
                .iter()
                .map(|date| ReviewEntry {
                    scheduled_for: *date,
                    reviewed_at: None,
                    success: None,
                })
                .collect(),
            created_at,
            updated_at,
        })
    }
}

/// A stored record in either the current or the legacy shape
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredConcept {
    Current(Concept),
    Legacy(LegacyConcept),
}
