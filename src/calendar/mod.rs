//! Calendar configuration module
//!
//! Activity periods, their validation, and loading a calendar from disk.

pub mod error;
pub mod loader;
pub mod period;

// Re-export main types
pub use error::ConfigurationError;
pub use loader::{CalendarConfig, NextSemester};
pub use period::{validate_periods, ActivityKind, ActivityPeriod};
