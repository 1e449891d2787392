//! State management module
//!
//! Shared application state and the ticker's published output.

pub mod app_state;
pub mod tick_state;

// Re-export main types
pub use app_state::{AppState, Evaluation, StateError};
pub use tick_state::TickState;
