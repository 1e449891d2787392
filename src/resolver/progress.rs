//! Semester progress policies

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calendar::ConfigurationError;

/// How far through the semester "now" is, as a percentage.
///
/// A deployment picks one policy in its calendar file; the resolver never
/// mixes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ProgressPolicy {
    /// Elapsed time over the whole configured span
    #[default]
    ElapsedTime,
    /// Elapsed time over the first `weeks` teaching weeks; stops advancing
    /// once that horizon is passed
    TeachingWeekCapped { weeks: u32 },
}

impl ProgressPolicy {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self {
            ProgressPolicy::TeachingWeekCapped { weeks: 0 } => {
                Err(ConfigurationError::ZeroHorizon)
            }
            _ => Ok(()),
        }
    }

    /// Progress in `[0, 100]`, with sub-day precision
    pub fn percent(
        &self,
        now: NaiveDateTime,
        semester_start: NaiveDateTime,
        semester_end: NaiveDateTime,
    ) -> f64 {
        let horizon = match self {
            ProgressPolicy::ElapsedTime => semester_end,
            // A horizon past the representable range is past the semester end too
            ProgressPolicy::TeachingWeekCapped { weeks } => {
                Duration::try_days(7 * i64::from(*weeks))
                    .and_then(|span| semester_start.checked_add_signed(span))
                    .map_or(semester_end, |capped| capped.min(semester_end))
            }
        };

        let span_ms = (horizon - semester_start).num_milliseconds();
        let elapsed_ms = (now - semester_start).num_milliseconds();

        if span_ms <= 0 {
            return if elapsed_ms >= 0 { 100.0 } else { 0.0 };
        }

        (elapsed_ms as f64 / span_ms as f64 * 100.0).clamp(0.0, 100.0)
    }
}
