//! Countdown breakdown and target selection

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::SemesterSnapshot;
use crate::calendar::NextSemester;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_DAY: u64 = 86_400_000;

/// Remaining time until a target, never negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountdownParts {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub total_ms: u64,
}

impl CountdownParts {
    pub fn from_millis(total_ms: u64) -> Self {
        Self {
            days: total_ms / MS_PER_DAY,
            hours: (total_ms / MS_PER_HOUR) % 24,
            minutes: (total_ms / MS_PER_MINUTE) % 60,
            seconds: (total_ms / MS_PER_SECOND) % 60,
            total_ms,
        }
    }

    /// Milliseconds represented by the day/hour/minute/second fields alone
    pub fn whole_second_millis(&self) -> u64 {
        self.days * MS_PER_DAY
            + self.hours * MS_PER_HOUR
            + self.minutes * MS_PER_MINUTE
            + self.seconds * MS_PER_SECOND
    }

    /// `"12d 03:04:05"`
    pub fn to_clock_string(&self) -> String {
        format!(
            "{}d {:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Break down `max(0, target - now)`
pub fn countdown(target: NaiveDateTime, now: NaiveDateTime) -> CountdownParts {
    let remaining = (target - now).num_milliseconds().max(0);
    CountdownParts::from_millis(remaining as u64)
}

/// Which fallback tier supplied the countdown target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    NextActivity,
    NextSemester,
    ActivityEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownTarget {
    pub at: NaiveDateTime,
    pub kind: TargetKind,
}

/// Pick what to count down to: the next activity's start, else the
/// configured next-semester start, else the end of the current activity.
pub fn select_countdown_target(
    snapshot: &SemesterSnapshot,
    next_semester: Option<&NextSemester>,
) -> CountdownTarget {
    if let Some(at) = snapshot.next_activity_start {
        return CountdownTarget {
            at,
            kind: TargetKind::NextActivity,
        };
    }

    if let Some(next) = next_semester {
        return CountdownTarget {
            at: next.start_instant(),
            kind: TargetKind::NextSemester,
        };
    }

    CountdownTarget {
        at: snapshot.activity_end,
        kind: TargetKind::ActivityEnd,
    }
}
