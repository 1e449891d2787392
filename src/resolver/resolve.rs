//! Mapping an instant onto the calendar

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{Phase, ProgressPolicy, SemesterSnapshot};
use crate::calendar::{validate_periods, ActivityPeriod, ConfigurationError};

const MS_PER_WEEK: f64 = 7.0 * 86_400_000.0;

/// Which period stays "current" on days that fall between two periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// The period after the gap, treating the gap as a lead-in
    #[default]
    Upcoming,
    /// The period before the gap, until the next one starts
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveOptions {
    pub progress: ProgressPolicy,
    pub gap: GapPolicy,
}

/// Resolve the calendar status at `now` (host local time).
///
/// Periods must be non-empty, ordered and non-overlapping; anything else is
/// reported as a [`ConfigurationError`].
pub fn resolve(
    periods: &[ActivityPeriod],
    now: NaiveDateTime,
    options: &ResolveOptions,
) -> Result<SemesterSnapshot, ConfigurationError> {
    validate_periods(periods)?;
    options.progress.validate()?;

    let today = now.date();
    let first = &periods[0];
    let last = &periods[periods.len() - 1];

    let phase = if today < first.start {
        Phase::Pre
    } else if today > last.end {
        Phase::Post
    } else {
        Phase::Active
    };

    let matched_index = match_activity(periods, today, options.gap);
    let current = &periods[matched_index];
    let next = periods.get(matched_index + 1);

    let semester_start = first.start_instant();
    let semester_end = last.end_instant();

    let current_week = match phase {
        Phase::Active => week_number(current, today),
        _ => None,
    };

    let progress_percent = match phase {
        Phase::Pre => 0.0,
        Phase::Post => 100.0,
        Phase::Active => options.progress.percent(now, semester_start, semester_end),
    };

    trace!(
        "Resolved {} -> {:?} '{}' week={:?} progress={:.3}",
        now,
        phase,
        current.label,
        current_week,
        progress_percent
    );

    Ok(SemesterSnapshot {
        phase,
        current_activity: current.clone(),
        matched_index,
        activity_start: current.start_instant(),
        activity_end: current.end_instant(),
        next_activity: next.cloned(),
        next_activity_start: next.map(ActivityPeriod::start_instant),
        semester_start,
        semester_end,
        progress_percent,
        current_week,
        total_weeks: total_weeks(periods),
    })
}

fn match_activity(periods: &[ActivityPeriod], today: NaiveDate, gap: GapPolicy) -> usize {
    let last_index = periods.len() - 1;

    if today < periods[0].start {
        return 0;
    }
    if today > periods[last_index].end {
        return last_index;
    }

    for (index, period) in periods.iter().enumerate() {
        if period.contains(today) {
            return index;
        }
        if let Some(following) = periods.get(index + 1) {
            if period.end < today && today < following.start {
                return match gap {
                    GapPolicy::Upcoming => index + 1,
                    GapPolicy::Previous => index,
                };
            }
        }
    }

    last_index
}

/// `week_start + whole weeks since the period began`. Absent for periods
/// without week counting and for days before the period starts. Days past
/// the period's end (a gap kept by [`GapPolicy::Previous`]) stay on its last
/// week, and a week number past `u32::MAX` is treated as absent.
fn week_number(period: &ActivityPeriod, today: NaiveDate) -> Option<u32> {
    let week_start = period.week_start?;
    let days = (today.min(period.end) - period.start).num_days();
    if days < 0 {
        return None;
    }
    let weeks_in = u32::try_from(days / 7).ok()?;
    week_start.checked_add(weeks_in)
}

fn total_weeks(periods: &[ActivityPeriod]) -> u32 {
    periods
        .iter()
        .filter(|p| p.week_start.is_some())
        .map(|p| {
            let span_ms = (p.end_instant() - p.start_instant()).num_milliseconds() as f64;
            (span_ms / MS_PER_WEEK).round() as u32
        })
        .fold(0, u32::saturating_add)
}
