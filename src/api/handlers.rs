//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, error, warn};

use super::responses::{
    CountdownResponse, ErrorResponse, HealthResponse, StatusResponse, ThemeResponse,
};
use crate::{
    calendar::ConfigurationError,
    resolver::SemesterSnapshot,
    state::{AppState, StateError},
    view::DashboardView,
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Optional `?at=YYYY-MM-DDTHH:MM:SS` override of the clock
#[derive(Debug, Default, Deserialize)]
pub struct AtQuery {
    pub at: Option<NaiveDateTime>,
}

impl AtQuery {
    fn instant(&self, state: &AppState) -> NaiveDateTime {
        self.at.unwrap_or_else(|| state.now())
    }
}

fn configuration_error(e: ConfigurationError) -> (StatusCode, Json<ErrorResponse>) {
    warn!("Calendar could not be resolved: {}", e);
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse::new(e.to_string())),
    )
}

fn internal_error(e: anyhow::Error) -> (StatusCode, Json<ErrorResponse>) {
    error!("Preference store failed: {:#}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(format!("{:#}", e))),
    )
}

/// Handle GET /status - Latest ticker output
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        calendar: state.calendar.label.clone(),
        tick: state.latest_tick(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    })
}

/// Handle GET /snapshot - Resolve the calendar now or at `?at=`
pub async fn snapshot_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AtQuery>,
) -> ApiResult<SemesterSnapshot> {
    let now = query.instant(&state);
    debug!("Snapshot requested for {}", now);

    state
        .evaluate(now)
        .map(|evaluation| Json(evaluation.snapshot))
        .map_err(configuration_error)
}

/// Handle GET /countdown - Countdown to the selected target
pub async fn countdown_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AtQuery>,
) -> ApiResult<CountdownResponse> {
    let now = query.instant(&state);
    let evaluation = state.evaluate(now).map_err(configuration_error)?;

    Ok(Json(CountdownResponse {
        now,
        target: evaluation.target,
        display: evaluation.countdown.to_clock_string(),
        countdown: evaluation.countdown,
    }))
}

/// Handle GET /dashboard - Composed view for renderers
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AtQuery>,
) -> ApiResult<DashboardView> {
    let now = query.instant(&state);

    match state.dashboard(now) {
        Ok(view) => Ok(Json(view)),
        Err(StateError::Configuration(e)) => Err(configuration_error(e)),
        Err(StateError::Preferences(e)) => Err(internal_error(e)),
    }
}

/// Handle GET /theme - Current display theme
pub async fn theme_handler(State(state): State<Arc<AppState>>) -> ApiResult<ThemeResponse> {
    state
        .theme()
        .map(|theme| Json(ThemeResponse { theme }))
        .map_err(internal_error)
}

/// Handle POST /theme/toggle - Flip and persist the display theme
pub async fn toggle_theme_handler(State(state): State<Arc<AppState>>) -> ApiResult<ThemeResponse> {
    state
        .toggle_theme()
        .map(|theme| Json(ThemeResponse { theme }))
        .map_err(internal_error)
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
