//! Latest published ticker output

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::resolver::{CountdownParts, CountdownTarget, SemesterSnapshot};

/// What the ticker computed on its most recent pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickState {
    /// When the tick was computed; absent before the first tick
    pub computed_at: Option<NaiveDateTime>,
    pub snapshot: Option<SemesterSnapshot>,
    pub countdown_target: Option<CountdownTarget>,
    pub countdown: Option<CountdownParts>,
    /// Set instead of the fields above when resolution failed
    pub error: Option<String>,
}

impl TickState {
    /// Placeholder published before the ticker has run
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn resolved(
        computed_at: NaiveDateTime,
        snapshot: SemesterSnapshot,
        countdown_target: CountdownTarget,
        countdown: CountdownParts,
    ) -> Self {
        Self {
            computed_at: Some(computed_at),
            snapshot: Some(snapshot),
            countdown_target: Some(countdown_target),
            countdown: Some(countdown),
            error: None,
        }
    }

    pub fn failed(computed_at: NaiveDateTime, error: String) -> Self {
        Self {
            computed_at: Some(computed_at),
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.computed_at.is_none()
    }
}
