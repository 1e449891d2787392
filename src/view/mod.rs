//! Presentation-ready views of the resolver output

pub mod dashboard;

pub use dashboard::{format_long_date, format_short_date, DashboardView};
