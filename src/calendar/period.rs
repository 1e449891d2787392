//! Activity period records and their validation

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::ConfigurationError;

/// Category of an activity period. Only drives cosmetic choices such as
/// the accent colour; the resolver never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Teaching,
    Break,
    Revision,
    Exam,
    Industrial,
}

impl ActivityKind {
    /// Accent colour used by renderers for this kind of activity
    pub fn accent_hex(&self) -> &'static str {
        match self {
            ActivityKind::Teaching => "#4f46e5",
            ActivityKind::Revision => "#d97706",
            ActivityKind::Exam => "#e11d48",
            ActivityKind::Break => "#3D007A",
            ActivityKind::Industrial => "#0284c7",
        }
    }
}

/// One labelled, inclusive date range of the calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPeriod {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub start: NaiveDate,
    /// Inclusive
    pub end: NaiveDate,
    /// First teaching-week number covered by this period, if it counts weeks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_start: Option<u32>,
}

impl ActivityPeriod {
    pub fn new(
        label: impl Into<String>,
        kind: ActivityKind,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            start,
            end,
            week_start: None,
        }
    }

    /// Mark this period as counting teaching weeks from `week_start`
    pub fn with_week_start(mut self, week_start: u32) -> Self {
        self.week_start = Some(week_start);
        self
    }

    /// 00:00:00 on the first day
    pub fn start_instant(&self) -> NaiveDateTime {
        start_of_day(self.start)
    }

    /// 23:59:59 on the last day
    pub fn end_instant(&self) -> NaiveDateTime {
        end_of_day(self.end)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // 23:59:59 always exists
    date.and_hms_opt(23, 59, 59).unwrap_or_else(|| start_of_day(date))
}

/// Check that periods are non-empty, individually well-formed, and
/// strictly ordered without overlap.
pub fn validate_periods(periods: &[ActivityPeriod]) -> Result<(), ConfigurationError> {
    if periods.is_empty() {
        return Err(ConfigurationError::EmptyCalendar);
    }

    for (index, period) in periods.iter().enumerate() {
        if period.end < period.start {
            return Err(ConfigurationError::InvertedPeriod {
                index,
                label: period.label.clone(),
            });
        }
        if period.week_start == Some(0) {
            return Err(ConfigurationError::ZeroWeekStart {
                index,
                label: period.label.clone(),
            });
        }
    }

    for (index, pair) in periods.windows(2).enumerate() {
        if pair[1].start <= pair[0].end {
            return Err(ConfigurationError::Overlapping {
                index: index + 1,
                label: pair[1].label.clone(),
            });
        }
    }

    Ok(())
}

/// Period with `YYYY-MM-DD` bounds, for test fixtures
#[cfg(test)]
pub(crate) fn fixture(label: &str, kind: ActivityKind, start: &str, end: &str) -> ActivityPeriod {
    let parse = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
    ActivityPeriod::new(label, kind, parse(start), parse(end))
}
