//! Main application state

use std::{sync::Arc, time::Instant};

use chrono::NaiveDateTime;
use thiserror::Error;
use tokio::sync::watch;
use tracing::warn;

use super::TickState;
use crate::{
    calendar::{CalendarConfig, ConfigurationError},
    preferences::{self, PreferenceStore, Theme},
    resolver::{
        countdown, resolve, select_countdown_target, CountdownParts, CountdownTarget,
        SemesterSnapshot,
    },
    utils::Clock,
    view::DashboardView,
};

#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("preference store failed: {0:#}")]
    Preferences(#[from] anyhow::Error),
}

/// Snapshot, countdown target and countdown for one instant
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub now: NaiveDateTime,
    pub snapshot: SemesterSnapshot,
    pub target: CountdownTarget,
    pub countdown: CountdownParts,
}

/// Shared state behind the HTTP handlers and the ticker
pub struct AppState {
    /// Immutable once loaded
    pub calendar: CalendarConfig,
    pub clock: Arc<dyn Clock>,
    pub preferences: Arc<dyn PreferenceStore>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Latest ticker output
    pub tick_tx: watch::Sender<TickState>,
    /// Keep the receiver alive to prevent channel closure
    pub _tick_rx: watch::Receiver<TickState>,
}

impl AppState {
    pub fn new(
        calendar: CalendarConfig,
        clock: Arc<dyn Clock>,
        preferences: Arc<dyn PreferenceStore>,
        port: u16,
        host: String,
    ) -> Self {
        let (tick_tx, tick_rx) = watch::channel(TickState::pending());

        Self {
            calendar,
            clock,
            preferences,
            start_time: Instant::now(),
            port,
            host,
            tick_tx,
            _tick_rx: tick_rx,
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Resolve the calendar at `now` and pick the countdown for it
    pub fn evaluate(&self, now: NaiveDateTime) -> Result<Evaluation, ConfigurationError> {
        let snapshot = resolve(&self.calendar.periods, now, &self.calendar.resolve_options())?;
        let target = select_countdown_target(&snapshot, self.calendar.next_semester.as_ref());
        let countdown = countdown(target.at, now);

        Ok(Evaluation {
            now,
            snapshot,
            target,
            countdown,
        })
    }

    /// Compose the full dashboard at `now`
    pub fn dashboard(&self, now: NaiveDateTime) -> Result<DashboardView, StateError> {
        let evaluation = self.evaluate(now)?;
        let theme = self.theme()?;

        Ok(DashboardView::compose(
            &self.calendar,
            &evaluation.snapshot,
            evaluation.target,
            evaluation.countdown,
            now,
            theme,
        ))
    }

    pub fn theme(&self) -> anyhow::Result<Theme> {
        preferences::load_theme(self.preferences.as_ref())
    }

    pub fn toggle_theme(&self) -> anyhow::Result<Theme> {
        preferences::toggle_theme(self.preferences.as_ref())
    }

    /// Publish the ticker's latest result to watchers
    pub fn publish_tick(&self, tick: TickState) {
        if let Err(e) = self.tick_tx.send(tick) {
            warn!("Failed to publish tick: {}", e);
        }
    }

    pub fn latest_tick(&self) -> TickState {
        self.tick_tx.borrow().clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        calendar::{period::fixture, ActivityKind::*, NextSemester},
        preferences::MemoryPreferenceStore,
        resolver::{GapPolicy, Phase, ProgressPolicy, TargetKind},
        utils::FixedClock,
    };
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub(crate) fn sample_calendar() -> CalendarConfig {
        CalendarConfig {
            label: "Semester I 2025/2026".into(),
            gap_policy: GapPolicy::Upcoming,
            progress: ProgressPolicy::ElapsedTime,
            next_semester: Some(NextSemester {
                start: date("2026-03-09"),
                label: "Semester II 2025/2026".into(),
            }),
            periods: vec![
                fixture("Teaching Weeks 1-7", Teaching, "2025-10-06", "2025-11-23")
                    .with_week_start(1),
                fixture("Mid-Semester Break", Break, "2025-11-24", "2025-11-30"),
                fixture("Final Examination", Exam, "2025-12-01", "2026-02-15"),
            ],
        }
    }

    pub(crate) fn state_at(now: NaiveDateTime) -> AppState {
        AppState::new(
            sample_calendar(),
            Arc::new(FixedClock(now)),
            Arc::new(MemoryPreferenceStore::new()),
            0,
            "127.0.0.1".into(),
        )
    }

    #[test]
    fn evaluates_at_clock_time() {
        let now = date("2025-10-20").and_hms_opt(8, 30, 0).unwrap();
        let state = state_at(now);
        let evaluation = state.evaluate(state.now()).unwrap();

        assert_eq!(evaluation.snapshot.phase, Phase::Active);
        assert_eq!(evaluation.snapshot.current_week, Some(3));
        assert_eq!(evaluation.target.kind, TargetKind::NextActivity);
        assert_eq!(evaluation.target.at, date("2025-11-24").and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(evaluation.countdown.days, 34);
        assert_eq!(evaluation.countdown.hours, 15);
        assert_eq!(evaluation.countdown.minutes, 30);
    }

    #[test]
    fn empty_calendar_surfaces_configuration_error() {
        let mut state = state_at(date("2025-10-20").and_hms_opt(8, 0, 0).unwrap());
        state.calendar.periods.clear();

        assert_eq!(
            state.evaluate(state.now()).unwrap_err(),
            ConfigurationError::EmptyCalendar
        );
        assert!(matches!(
            state.dashboard(state.now()),
            Err(StateError::Configuration(ConfigurationError::EmptyCalendar))
        ));
    }

    #[test]
    fn dashboard_reflects_theme() {
        let state = state_at(date("2025-11-25").and_hms_opt(8, 0, 0).unwrap());
        assert_eq!(state.dashboard(state.now()).unwrap().theme, Theme::Light);

        state.toggle_theme().unwrap();
        let view = state.dashboard(state.now()).unwrap();
        assert_eq!(view.theme, Theme::Dark);
        assert_eq!(view.headline, "Mid-Semester Break");
    }

    #[test]
    fn publishes_latest_tick() {
        let state = state_at(date("2025-10-20").and_hms_opt(8, 0, 0).unwrap());
        assert!(state.latest_tick().is_pending());

        let mut rx = state.tick_tx.subscribe();
        state.publish_tick(TickState::failed(state.now(), "boom".into()));

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().error.as_deref(), Some("boom"));
        assert_eq!(state.latest_tick().error.as_deref(), Some("boom"));
    }
}
