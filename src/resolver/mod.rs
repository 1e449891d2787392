//! Semester resolver
//!
//! Pure functions turning a calendar and an instant into a status snapshot
//! and a countdown. Nothing in here touches the clock or the filesystem.

pub mod countdown;
pub mod progress;
pub mod resolve;
pub mod snapshot;

// Re-export main types
pub use countdown::{
    countdown, select_countdown_target, CountdownParts, CountdownTarget, TargetKind,
};
pub use progress::ProgressPolicy;
pub use resolve::{resolve, GapPolicy, ResolveOptions};
pub use snapshot::{Phase, SemesterSnapshot};
