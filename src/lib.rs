//! Semester Status - an academic calendar dashboard
//!
//! Resolves which phase, activity and teaching week "now" falls in for a
//! configured list of date ranges, and serves the result alongside a live
//! countdown over HTTP.

pub mod api;
pub mod calendar;
pub mod config;
pub mod preferences;
pub mod resolver;
pub mod state;
pub mod tasks;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use api::create_router;
pub use calendar::{ActivityKind, ActivityPeriod, CalendarConfig, ConfigurationError};
pub use config::Config;
pub use resolver::{countdown, resolve, CountdownParts, Phase, SemesterSnapshot};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
