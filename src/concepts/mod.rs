//! Spaced repetition for concepts
//!
//! This module provides:
//! - Concept model with a planned checkpoint schedule and an append-only review log
//! - Review scheduling (seeded plan, interval growth on success, reset on failure)
//! - Dashboard views (due/upcoming split, status, progress)
//! - Repository over a key-value store with atomic read-modify-write

pub mod algorithm;
pub mod dashboard;
pub mod models;
pub mod storage;

pub use algorithm::{ReviewScheduler, SchedulerSettings};
pub use dashboard::{Dashboard, ReviewProgress};
pub use models::*;
pub use storage::{ConceptError, ConceptRepository};
