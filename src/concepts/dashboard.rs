//! Derived dashboard views over a concept collection
//!
//! Everything here is a pure function of the collection and a reference time.
//! The collection itself is never modified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::{Concept, ConceptStatus};

/// Name shown when the user never set one
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Whether `concept` is due for review at `now`
pub fn is_due(concept: &Concept, now: DateTime<Utc>) -> bool {
    // A concept without any schedule is surfaced rather than hidden
    concept.next_review_at().map_or(true, |next| now >= next)
}

/// Split a collection into (due, upcoming), preserving input order
pub fn partition(concepts: &[Concept], now: DateTime<Utc>) -> (Vec<&Concept>, Vec<&Concept>) {
    concepts.iter().partition(|c| is_due(c, now))
}

pub fn status(concept: &Concept, now: DateTime<Utc>) -> ConceptStatus {
    if !concept.has_been_reviewed() {
        ConceptStatus::New
    } else if is_due(concept, now) {
        ConceptStatus::Overdue
    } else {
        ConceptStatus::Completed
    }
}

/// Count of reviewed concepts out of the whole collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewProgress {
    pub completed: usize,
    pub total: usize,
}

impl ReviewProgress {
    /// Completion percentage in `0.0..=100.0`; an empty collection is 0%
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

pub fn progress(concepts: &[Concept]) -> ReviewProgress {
    ReviewProgress {
        completed: concepts.iter().filter(|c| c.has_been_reviewed()).count(),
        total: concepts.len(),
    }
}

/// Everything the dashboard shows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub user_name: String,
    pub due: Vec<Concept>,
    pub upcoming: Vec<Concept>,
    pub progress: ReviewProgress,
    pub generated_at: DateTime<Utc>,
}

impl Dashboard {
    pub fn build(user_name: Option<&str>, concepts: &[Concept], now: DateTime<Utc>) -> Self {
        let (due, upcoming) = partition(concepts, now);
        let user_name = user_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
            .to_string();

        Self {
            user_name,
            due: due.into_iter().cloned().collect(),
            upcoming: upcoming.into_iter().cloned().collect(),
            progress: progress(concepts),
            generated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concepts::algorithm::ReviewScheduler;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn concept_at(name: &str, created_at: DateTime<Utc>) -> Concept {
        Concept::new(name.to_string(), format!("About {}", name), created_at)
    }

    #[test]
    fn test_new_concept_due_on_first_checkpoint() {
        let concept = concept_at("Slices", t0());

        assert!(!is_due(&concept, t0()));
        assert!(!is_due(&concept, t0() + Duration::hours(23)));
        assert!(is_due(&concept, t0() + Duration::days(1)));
        assert_eq!(status(&concept, t0() + Duration::days(1)), ConceptStatus::New);
    }

    #[test]
    fn test_status_after_review() {
        let scheduler = ReviewScheduler::default();
        let mut concept = concept_at("Traits", t0());
        let reviewed_at = t0() + Duration::days(2);
        scheduler.record_review(&mut concept, false, reviewed_at);

        assert_eq!(status(&concept, reviewed_at), ConceptStatus::Completed);
        assert_eq!(
            status(&concept, reviewed_at + Duration::days(1)),
            ConceptStatus::Overdue
        );
    }

    #[test]
    fn test_concept_without_schedule_is_due() {
        let mut concept = concept_at("Broken", t0());
        concept.checkpoints.clear();
        assert!(is_due(&concept, t0()));
    }

    #[test]
    fn test_partition_is_exclusive_exhaustive_and_stable() {
        let concepts = vec![
            concept_at("a", t0() - Duration::days(5)),
            concept_at("b", t0()),
            concept_at("c", t0() - Duration::days(2)),
            concept_at("d", t0() + Duration::days(1)),
            concept_at("e", t0() - Duration::days(1)),
        ];
        let now = t0();

        let (due, upcoming) = partition(&concepts, now);

        let due_names: Vec<&str> = due.iter().map(|c| c.name.as_str()).collect();
        let upcoming_names: Vec<&str> = upcoming.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(due_names, vec!["a", "c", "e"]);
        assert_eq!(upcoming_names, vec!["b", "d"]);

        for concept in &concepts {
            let in_due = due.iter().any(|c| c.id == concept.id);
            let in_upcoming = upcoming.iter().any(|c| c.id == concept.id);
            assert_ne!(in_due, in_upcoming);
            assert_eq!(in_due, is_due(concept, now));
        }
    }

    #[test]
    fn test_progress() {
        assert_eq!(progress(&[]), ReviewProgress { completed: 0, total: 0 });
        assert_eq!(progress(&[]).percent(), 0.0);

        let scheduler = ReviewScheduler::default();
        let mut concepts = vec![concept_at("x", t0()), concept_at("y", t0()), concept_at("z", t0())];
        assert_eq!(progress(&concepts), ReviewProgress { completed: 0, total: 3 });

        scheduler.record_review(&mut concepts[1], true, t0() + Duration::days(1));
        let p = progress(&concepts);
        assert_eq!(p, ReviewProgress { completed: 1, total: 3 });
        assert!((p.percent() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_dashboard_build() {
        let concepts = vec![
            concept_at("old", t0() - Duration::days(3)),
            concept_at("fresh", t0()),
        ];

        let dashboard = Dashboard::build(Some("Ada"), &concepts, t0());
        assert_eq!(dashboard.user_name, "Ada");
        assert_eq!(dashboard.due.len(), 1);
        assert_eq!(dashboard.due[0].name, "old");
        assert_eq!(dashboard.upcoming.len(), 1);
        assert_eq!(dashboard.progress.total, 2);

        let anonymous = Dashboard::build(None, &concepts, t0());
        assert_eq!(anonymous.user_name, DEFAULT_DISPLAY_NAME);
        let blank = Dashboard::build(Some("   "), &concepts, t0());
        assert_eq!(blank.user_name, DEFAULT_DISPLAY_NAME);
    }
}
