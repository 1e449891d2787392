//! Display preferences
//!
//! The presentation layer receives a [`PreferenceStore`] rather than
//! reaching for global storage.

pub mod store;
pub mod theme;

// Re-export main types
pub use store::{JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use theme::{load_theme, toggle_theme, Theme, THEME_KEY};
