//! Dashboard view composition
//!
//! Turns a snapshot into the strings a renderer shows: headline, week
//! badge, sub-line and countdown label.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    calendar::CalendarConfig,
    preferences::Theme,
    resolver::{CountdownParts, CountdownTarget, Phase, SemesterSnapshot, TargetKind},
};

const FALLBACK_ACCENT: &str = "#4f46e5";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// "Monday, 20 October 2025"
    pub today: String,
    pub phase: Phase,
    /// "Week N", or "Currently" outside week-counted periods
    pub eyebrow: String,
    pub headline: String,
    pub sub_line: String,
    pub show_progress: bool,
    pub progress_percent: f64,
    pub countdown_label: String,
    /// Absent once the semester is over
    pub countdown: Option<CountdownParts>,
    pub countdown_target: CountdownTarget,
    pub accent: String,
    pub theme: Theme,
}

pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}

pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

impl DashboardView {
    pub fn compose(
        calendar: &CalendarConfig,
        snapshot: &SemesterSnapshot,
        target: CountdownTarget,
        countdown: CountdownParts,
        now: NaiveDateTime,
        theme: Theme,
    ) -> Self {
        let eyebrow = match snapshot.current_week {
            Some(week) => format!("Week {}", week),
            None => "Currently".to_string(),
        };

        let headline = match snapshot.phase {
            Phase::Pre => "Semester hasn't started yet".to_string(),
            Phase::Post => "Semester Complete".to_string(),
            Phase::Active => snapshot.current_activity.label.clone(),
        };

        let sub_line = match snapshot.phase {
            Phase::Active => format!(
                "{} is {:.1}% complete.",
                calendar.label, snapshot.progress_percent
            ),
            Phase::Pre | Phase::Post => calendar.label.clone(),
        };

        let countdown_label = match snapshot.phase {
            Phase::Pre => format!(
                "Semester begins on {}",
                format_short_date(snapshot.semester_start.date())
            ),
            Phase::Post => format!("Ended on {}", format_short_date(snapshot.semester_end.date())),
            Phase::Active => countdown_label(calendar, snapshot, target.kind),
        };

        Self {
            today: format_long_date(now.date()),
            phase: snapshot.phase,
            eyebrow,
            headline,
            sub_line,
            show_progress: snapshot.is_active(),
            progress_percent: snapshot.progress_percent,
            countdown_label,
            countdown: (snapshot.phase != Phase::Post).then_some(countdown),
            countdown_target: target,
            accent: accent_for(snapshot).to_string(),
            theme,
        }
    }
}

fn countdown_label(
    calendar: &CalendarConfig,
    snapshot: &SemesterSnapshot,
    kind: TargetKind,
) -> String {
    match (kind, &snapshot.next_activity, &calendar.next_semester) {
        (TargetKind::NextActivity, Some(next), _) => format!("{} starts in", next.label),
        (TargetKind::NextSemester, _, Some(next)) => format!("{} starts in", next.label),
        _ => format!("{} ends in", snapshot.current_activity.label),
    }
}

fn accent_for(snapshot: &SemesterSnapshot) -> &'static str {
    match snapshot.phase {
        Phase::Active => snapshot.current_activity.kind.accent_hex(),
        Phase::Pre | Phase::Post => FALLBACK_ACCENT,
    }
}
