//! Configuration types and CLI options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DB_PATH, FREE_PLAN_DAILY_LIMIT, FREE_PLAN_HISTORY_LIMIT};

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured line-JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Application configuration.
///
/// Doubles as the CLI surface of the `indexflow` binary and as the
/// programmatic configuration of the library.
///
/// # Examples
///
/// ```no_run
/// use indexflow::Config;
///
/// let config = Config {
///     url: Some("https://example.com".into()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "indexflow", about = "Run a simulated on-page SEO audit for a URL")]
pub struct Config {
    /// URL to analyze
    pub url: Option<String>,

    /// Application address to open instead of a URL, e.g. "#/analyze?url=..."
    /// (simulates following a shared link)
    #[arg(long, conflicts_with = "url")]
    pub open: Option<String>,

    /// Database path (SQLite file backing durable local storage)
    #[arg(long, default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Daily ceiling on Free-plan analyses
    #[arg(long, default_value_t = FREE_PLAN_DAILY_LIMIT)]
    pub daily_limit: u32,

    /// Number of history entries kept for Free-plan users
    #[arg(long, default_value_t = FREE_PLAN_HISTORY_LIMIT)]
    pub history_limit: usize,

    /// Sign in as this e-mail address before running (simulated login)
    #[arg(long)]
    pub email: Option<String>,

    /// Print the generated XML sitemap after the audit
    #[arg(long)]
    pub show_sitemap: bool,

    /// Print the audit history for the signed-in user and exit
    #[arg(long)]
    pub show_history: bool,

    /// Clear the stored audit history and exit
    #[arg(long)]
    pub clear_history: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            open: None,
            db_path: PathBuf::from(DB_PATH),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            daily_limit: FREE_PLAN_DAILY_LIMIT,
            history_limit: FREE_PLAN_HISTORY_LIMIT,
            email: None,
            show_sitemap: false,
            show_history: false,
            clear_history: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.daily_limit, 3);
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.db_path, PathBuf::from("./indexflow.db"));
        assert!(config.url.is_none());
        assert!(!config.show_sitemap);
    }

    #[test]
    fn test_cli_parses_positional_url() {
        let config = Config::parse_from(["indexflow", "https://example.com"]);
        assert_eq!(config.url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_cli_parses_limits() {
        let config = Config::parse_from([
            "indexflow",
            "--daily-limit",
            "1",
            "--history-limit",
            "10",
        ]);
        assert_eq!(config.daily_limit, 1);
        assert_eq!(config.history_limit, 10);
    }
}
