//! Once-per-second semester ticker

use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::{
    resolver::{Phase, SemesterSnapshot},
    state::{AppState, TickState},
};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Changes noticed between two consecutive ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transitions {
    pub day_changed: bool,
    pub phase_changed: bool,
    pub activity_changed: bool,
}

/// Remembers the previous tick so the ticker can report day-boundary,
/// phase and activity changes instead of logging every second.
#[derive(Debug, Default)]
pub struct TransitionTracker {
    last_day: Option<NaiveDate>,
    last_phase: Option<Phase>,
    last_activity: Option<usize>,
}

impl TransitionTracker {
    pub fn observe(&mut self, day: NaiveDate, snapshot: &SemesterSnapshot) -> Transitions {
        let transitions = Transitions {
            day_changed: self.last_day.is_some_and(|d| d != day),
            phase_changed: self.last_phase.is_some_and(|p| p != snapshot.phase),
            activity_changed: self.last_activity.is_some_and(|i| i != snapshot.matched_index),
        };

        self.last_day = Some(day);
        self.last_phase = Some(snapshot.phase);
        self.last_activity = Some(snapshot.matched_index);
        transitions
    }
}

/// Sample the clock once, resolve, and build the tick to publish
pub fn run_tick(state: &AppState, tracker: &mut TransitionTracker) -> TickState {
    let now = state.now();

    match state.evaluate(now) {
        Ok(evaluation) => {
            let transitions = tracker.observe(now.date(), &evaluation.snapshot);
            let snapshot = &evaluation.snapshot;

            if transitions.day_changed {
                info!(
                    "Day boundary crossed, now {} (week {:?})",
                    now.date(),
                    snapshot.current_week
                );
            }
            if transitions.phase_changed {
                info!("Semester phase changed to {:?}", snapshot.phase);
            }
            if transitions.activity_changed {
                info!("Current activity is now '{}'", snapshot.current_activity.label);
            }

            debug!(
                "Tick at {}: {:?} '{}' {:.2}% countdown {}",
                now,
                snapshot.phase,
                snapshot.current_activity.label,
                snapshot.progress_percent,
                evaluation.countdown.to_clock_string()
            );

            TickState::resolved(now, evaluation.snapshot, evaluation.target, evaluation.countdown)
        }
        Err(e) => {
            error!("Failed to resolve semester status: {}", e);
            TickState::failed(now, e.to_string())
        }
    }
}

/// Background task that re-resolves the calendar every second and
/// publishes the result
pub async fn tick_task(state: Arc<AppState>) {
    info!("Starting semester ticker");

    let mut ticker = interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut tracker = TransitionTracker::default();

    loop {
        ticker.tick().await;
        let tick = run_tick(&state, &mut tracker);
        state.publish_tick(tick);
    }
}
