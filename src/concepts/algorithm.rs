//! Review scheduling
//!
//! A new concept is seeded with a fixed plan of checkpoints (+1, +3, +7 and
//! +30 days). Each recorded review appends one date to the concept's history:
//! - success: `now + 1.5 * (last interval)`, where the last interval is the
//!   gap between the final two dates of the history
//! - success with fewer than two dates: `now + 1 day`
//! - failure: `now + 1 day`, whatever the history looks like
//!
//! Nothing here reads the wall clock; callers pass `now`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::models::{Concept, ReviewEntry};

/// Day offsets of the seeded checkpoints
pub const DEFAULT_CHECKPOINT_DAYS: [u32; 4] = [1, 3, 7, 30];

/// Multiplier applied to the last interval after a successful review
pub const DEFAULT_GROWTH_FACTOR: f64 = 1.5;

/// Interval used after a failed review or when no prior interval exists
pub const DEFAULT_RELEARN_DAYS: u32 = 1;

/// Tunables for the scheduler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    pub checkpoint_days: Vec<u32>,
    pub growth_factor: f64,
    pub relearn_days: u32,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            checkpoint_days: DEFAULT_CHECKPOINT_DAYS.to_vec(),
            growth_factor: DEFAULT_GROWTH_FACTOR,
            relearn_days: DEFAULT_RELEARN_DAYS,
        }
    }
}

impl SchedulerSettings {
    /// Check that these settings always produce a strictly increasing plan
    /// and review dates strictly after `now`.
    pub fn validate(&self) -> Result<(), String> {
        if self.checkpoint_days.is_empty() {
            return Err("checkpoint_days must not be empty".to_string());
        }
        if self.checkpoint_days[0] == 0 {
            return Err("checkpoint_days must be positive".to_string());
        }
        if self.checkpoint_days.windows(2).any(|w| w[0] >= w[1]) {
            return Err("checkpoint_days must be strictly increasing".to_string());
        }
        if !self.growth_factor.is_finite() || self.growth_factor <= 0.0 {
            return Err(format!(
                "growth_factor must be a positive number, got {}",
                self.growth_factor
            ));
        }
        if self.relearn_days == 0 {
            return Err("relearn_days must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Scheduler with a validated set of tunables
#[derive(Debug, Clone, Default)]
pub struct ReviewScheduler {
    settings: SchedulerSettings,
}

impl ReviewScheduler {
    pub fn new(settings: SchedulerSettings) -> Result<Self, String> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Planned checkpoints for a concept created at `created_at`
    pub fn seed_schedule(&self, created_at: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        self.settings
            .checkpoint_days
            .iter()
            .map(|days| add_saturating(created_at, Duration::days(i64::from(*days))))
            .collect()
    }

    /// Compute the date that follows `history` after a review at `now`.
    ///
    /// The result is always strictly after `now` (unless `now` is already the
    /// latest representable instant).
    pub fn next_review_date(
        &self,
        history: &[DateTime<Utc>],
        success: bool,
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        let relearn = Duration::days(i64::from(self.settings.relearn_days));

        if !success {
            return add_saturating(now, relearn);
        }

        let interval = match history {
            [.., previous, last] => *last - *previous,
            _ => return add_saturating(now, relearn),
        };

        // Hand-edited or migrated histories can go backwards; a non-positive
        // interval would schedule the review in the past.
        if interval <= Duration::zero() {
            return add_saturating(now, relearn);
        }

        let scaled_ms = (interval.num_milliseconds() as f64 * self.settings.growth_factor)
            .round()
            .max(1.0);
        // `as` saturates for out-of-range floats
        let scaled = Duration::try_milliseconds(scaled_ms as i64).unwrap_or(Duration::MAX);
        add_saturating(now, scaled)
    }

    /// Create a concept with this scheduler's seeded plan
    pub fn new_concept(
        &self,
        name: String,
        description: String,
        created_at: DateTime<Utc>,
    ) -> Concept {
        let checkpoints = self.seed_schedule(created_at);
        Concept::with_checkpoints(name, description, checkpoints, created_at)
    }

    /// Record a review outcome on `concept` and return the new next-review date
    pub fn record_review(
        &self,
        concept: &mut Concept,
        success: bool,
        now: DateTime<Utc>,
    ) -> DateTime<Utc> {
        let next = self.next_review_date(&concept.review_dates(), success, now);
        concept.review_log.push(ReviewEntry {
            scheduled_for: next,
            reviewed_at: Some(now),
            success: Some(success),
        });
        concept.updated_at = now;
        next
    }
}

/// Seeded checkpoints with the default plan: +1, +3, +7 and +30 days
pub fn seed_schedule(created_at: DateTime<Utc>) -> [DateTime<Utc>; 4] {
    DEFAULT_CHECKPOINT_DAYS.map(|days| add_saturating(created_at, Duration::days(i64::from(days))))
}

/// Next review date with the default tunables
pub fn next_review_date(
    history: &[DateTime<Utc>],
    success: bool,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    ReviewScheduler::default().next_review_date(history, success, now)
}

fn add_saturating(at: DateTime<Utc>, delta: Duration) -> DateTime<Utc> {
    at.checked_add_signed(delta)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: i64) -> String {
    if days <= 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
