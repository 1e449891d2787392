//! Calendar file loading
//!
//! A calendar is a TOML document with a display label, optional policies,
//! an optional next-semester override and an ordered list of periods:
//!
//! ```toml
//! label = "Semester I 2025/2026"
//! gap_policy = "upcoming"
//!
//! [progress]
//! policy = "elapsed_time"
//!
//! [next_semester]
//! start = "2026-03-09"
//! label = "Semester II 2025/2026"
//!
//! [[periods]]
//! label = "Teaching Weeks 1-7"
//! type = "teaching"
//! start = "2025-10-06"
//! end = "2025-11-23"
//! week_start = 1
//! ```

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{period::start_of_day, validate_periods, ActivityPeriod, ConfigurationError};
use crate::resolver::{GapPolicy, ProgressPolicy, ResolveOptions};

/// Start of the following semester, used as a countdown target once the
/// last period has no successor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextSemester {
    pub start: NaiveDate,
    pub label: String,
}

impl NextSemester {
    pub fn start_instant(&self) -> NaiveDateTime {
        start_of_day(self.start)
    }
}

/// A fully loaded calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Label shown for the semester, e.g. "Semester I 2025/2026"
    pub label: String,
    #[serde(default)]
    pub gap_policy: GapPolicy,
    #[serde(default)]
    pub progress: ProgressPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_semester: Option<NextSemester>,
    pub periods: Vec<ActivityPeriod>,
}

impl CalendarConfig {
    /// Read, parse and validate a calendar file
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        debug!("Loading calendar from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| ConfigurationError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let calendar = Self::from_toml_str(&content)?;
        info!(
            "Loaded calendar '{}' with {} periods ({} to {})",
            calendar.label,
            calendar.periods.len(),
            calendar.periods[0].start,
            calendar.periods[calendar.periods.len() - 1].end,
        );
        Ok(calendar)
    }

    /// Parse and validate a calendar from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigurationError> {
        let calendar: CalendarConfig =
            toml::from_str(content).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        calendar.validate()?;
        Ok(calendar)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_periods(&self.periods)?;
        self.progress.validate()
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            progress: self.progress,
            gap: self.gap_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ActivityKind;
    use std::io::Write;

    const SAMPLE: &str = r#"
label = "Semester I 2025/2026"

[next_semester]
start = "2026-03-09"
label = "Semester II 2025/2026"

[[periods]]
label = "Teaching Weeks 1-7"
type = "teaching"
start = "2025-10-06"
end = "2025-11-23"
week_start = 1

[[periods]]
label = "Mid-Semester Break"
type = "break"
start = "2025-11-24"
end = "2025-11-30"
"#;

    #[test]
    fn parses_sample_with_defaults() {
        let calendar = CalendarConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(calendar.label, "Semester I 2025/2026");
        assert_eq!(calendar.gap_policy, GapPolicy::Upcoming);
        assert_eq!(calendar.progress, ProgressPolicy::ElapsedTime);
        assert_eq!(calendar.periods.len(), 2);
        assert_eq!(calendar.periods[0].week_start, Some(1));
        assert_eq!(calendar.periods[1].kind, ActivityKind::Break);
        assert_eq!(calendar.periods[1].week_start, None);
        assert_eq!(
            calendar.next_semester.unwrap().start_instant().to_string(),
            "2026-03-09 00:00:00"
        );
    }

    fn with_header(extra: &str) -> String {
        SAMPLE.replacen(
            "label = \"Semester I 2025/2026\"\n",
            &format!("label = \"Semester I 2025/2026\"\n{}", extra),
            1,
        )
    }

    #[test]
    fn parses_explicit_policies() {
        let text = with_header(concat!(
            "gap_policy = \"previous\"\n",
            "[progress]\npolicy = \"teaching_week_capped\"\nweeks = 15\n",
        ));
        let calendar = CalendarConfig::from_toml_str(&text).unwrap();
        assert_eq!(calendar.gap_policy, GapPolicy::Previous);
        assert_eq!(calendar.progress, ProgressPolicy::TeachingWeekCapped { weeks: 15 });
    }

    #[test]
    fn rejects_missing_periods_and_bad_dates() {
        let err = CalendarConfig::from_toml_str("label = \"x\"\nperiods = []\n").unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyCalendar);

        let bad = SAMPLE.replace("2025-11-24", "2025-13-24");
        assert!(matches!(
            CalendarConfig::from_toml_str(&bad),
            Err(ConfigurationError::Parse(_))
        ));
    }

    #[test]
    fn rejects_zero_week_horizon() {
        let text = with_header("[progress]\npolicy = \"teaching_week_capped\"\nweeks = 0\n");
        assert_eq!(
            CalendarConfig::from_toml_str(&text).unwrap_err(),
            ConfigurationError::ZeroHorizon
        );
    }

    #[test]
    fn oversized_week_horizon_still_resolves() {
        let text =
            with_header("[progress]\npolicy = \"teaching_week_capped\"\nweeks = 100000000\n");
        let calendar = CalendarConfig::from_toml_str(&text).unwrap();
        let now = NaiveDate::from_ymd_opt(2025, 10, 20)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        let snapshot =
            crate::resolver::resolve(&calendar.periods, now, &calendar.resolve_options()).unwrap();
        assert!(snapshot.progress_percent > 0.0 && snapshot.progress_percent < 100.0);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let calendar = CalendarConfig::load(file.path()).unwrap();
        assert_eq!(calendar.periods[0].label, "Teaching Weeks 1-7");
    }

    #[test]
    fn bundled_calendar_is_valid() {
        let calendar = CalendarConfig::from_toml_str(include_str!("../../calendar.toml")).unwrap();
        assert_eq!(calendar.periods.len(), 5);
        assert_eq!(calendar.periods[4].kind, ActivityKind::Exam);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CalendarConfig::load(Path::new("/nonexistent/calendar.toml")).unwrap_err();
        assert!(matches!(err, ConfigurationError::Io { .. }));
    }
}
