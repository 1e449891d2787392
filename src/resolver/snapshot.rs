//! Derived semester status

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::ActivityPeriod;

/// Where "now" sits relative to the whole calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Pre,
    Active,
    Post,
}

/// Status of the calendar at one instant. Rebuilt from scratch on every
/// call to [`resolve`](super::resolve).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterSnapshot {
    pub phase: Phase,
    pub current_activity: ActivityPeriod,
    /// Position of `current_activity` in the calendar
    pub matched_index: usize,
    pub activity_start: NaiveDateTime,
    pub activity_end: NaiveDateTime,
    pub next_activity: Option<ActivityPeriod>,
    pub next_activity_start: Option<NaiveDateTime>,
    pub semester_start: NaiveDateTime,
    pub semester_end: NaiveDateTime,
    pub progress_percent: f64,
    pub current_week: Option<u32>,
    pub total_weeks: u32,
}

impl SemesterSnapshot {
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }
}
