//! Utility functions module
//!
//! Clock sources and process signal handling.

pub mod clock;
pub mod signals;

// Re-export main items
pub use clock::{Clock, FixedClock, SystemClock};
pub use signals::shutdown_signal;
