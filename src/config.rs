//! Configuration and CLI argument handling

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Parser;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "semester-status")]
#[command(about = "Academic calendar dashboard: phase, teaching week, progress and countdown")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Calendar file (TOML)
    #[arg(short, long, default_value = "calendar.toml")]
    pub calendar: PathBuf,

    /// File holding display preferences
    #[arg(long, default_value = "preferences.json")]
    pub prefs: PathBuf,

    /// Keep preferences in memory only
    #[arg(long)]
    pub no_persist: bool,

    /// Freeze the clock at this local time (YYYY-MM-DDTHH:MM:SS)
    #[arg(long)]
    pub at: Option<NaiveDateTime>,

    /// Print the dashboard once as JSON and exit
    #[arg(long)]
    pub once: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
