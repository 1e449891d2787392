//! Calendar configuration errors

use thiserror::Error;

/// Everything that can be wrong with a calendar before it reaches the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("calendar has no activity periods")]
    EmptyCalendar,

    #[error("period {index} ({label}) ends before it starts")]
    InvertedPeriod { index: usize, label: String },

    #[error("period {index} ({label}) starts on or before the end of the previous period")]
    Overlapping { index: usize, label: String },

    #[error("period {index} ({label}) has week_start 0, week numbers start at 1")]
    ZeroWeekStart { index: usize, label: String },

    #[error("teaching-week progress horizon must be at least one week")]
    ZeroHorizon,

    #[error("failed to read calendar file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to parse calendar file: {0}")]
    Parse(String),
}
