//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/status", get(status_handler))
        .route("/snapshot", get(snapshot_handler))
        .route("/countdown", get(countdown_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/theme", get(theme_handler))
        .route("/theme/toggle", post(toggle_theme_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_state::tests::state_at;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use chrono::{NaiveDate, NaiveDateTime};
    use tower::ServiceExt;

    fn at(s: &str, h: u32) -> NaiveDateTime {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), 64_000).await.unwrap();
        let parsed = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, parsed)
    }

    fn app_at(now: NaiveDateTime) -> Router {
        create_router(Arc::new(state_at(now)))
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let (status, body) = call(app_at(at("2025-10-20", 9)), Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn snapshot_uses_clock_by_default() {
        let (status, body) = call(app_at(at("2025-10-20", 9)), Method::GET, "/snapshot").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "active");
        assert_eq!(body["current_week"], 3);
        assert_eq!(body["current_activity"]["type"], "teaching");
        assert_eq!(body["next_activity"]["label"], "Mid-Semester Break");
    }

    #[tokio::test]
    async fn snapshot_honours_at_query() {
        let app = app_at(at("2025-10-20", 9));
        let (status, body) = call(app, Method::GET, "/snapshot?at=2025-09-01T12:00:00").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "pre");
        assert_eq!(body["progress_percent"], 0.0);
        assert!(body["current_week"].is_null());
    }

    #[tokio::test]
    async fn bad_at_query_is_rejected() {
        let app = app_at(at("2025-10-20", 9));
        let (status, _) = call(app, Method::GET, "/snapshot?at=yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn countdown_endpoint_reports_target() {
        let app = app_at(at("2025-11-23", 12));
        let (status, body) = call(app, Method::GET, "/countdown").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["target"]["kind"], "next_activity");
        assert_eq!(body["countdown"]["hours"], 12);
        assert_eq!(body["display"], "0d 12:00:00");
    }

    #[tokio::test]
    async fn dashboard_after_semester() {
        let app = app_at(at("2026-03-01", 9));
        let (status, body) = call(app, Method::GET, "/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["headline"], "Semester Complete");
        assert_eq!(body["countdown_label"], "Ended on 15 February 2026");
        assert!(body["countdown"].is_null());
    }

    #[tokio::test]
    async fn empty_calendar_is_unprocessable() {
        let mut state = state_at(at("2025-10-20", 9));
        state.calendar.periods.clear();
        let app = create_router(Arc::new(state));

        let (status, body) = call(app, Method::GET, "/dashboard").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "calendar has no activity periods");
    }

    #[tokio::test]
    async fn theme_toggle_round_trip() {
        let state = Arc::new(state_at(at("2025-10-20", 9)));

        let (_, body) = call(create_router(Arc::clone(&state)), Method::GET, "/theme").await;
        assert_eq!(body["theme"], "light");

        let router = create_router(Arc::clone(&state));
        let (status, body) = call(router, Method::POST, "/theme/toggle").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["theme"], "dark");

        let (_, body) = call(create_router(state), Method::GET, "/dashboard").await;
        assert_eq!(body["theme"], "dark");
    }

    #[tokio::test]
    async fn status_before_first_tick_is_pending() {
        let (status, body) = call(app_at(at("2025-10-20", 9)), Method::GET, "/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["calendar"], "Semester I 2025/2026");
        assert!(body["tick"]["computed_at"].is_null());
    }

    #[tokio::test]
    async fn toggle_requires_post() {
        let (status, _) = call(app_at(at("2025-10-20", 9)), Method::GET, "/theme/toggle").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
