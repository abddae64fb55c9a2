//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the SlotBook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 5000)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `RATE_LIMIT_PER_SECOND`: Requests allowed per client per second (default: 5)
//! - `RATE_LIMIT_CLEANUP_SECONDS`: Interval for evicting stale limiter windows (default: 60)
//! - `SLOT_TIME_PATTERN`: Regular expression for time-of-day values
//! - `SLOT_DATE_FORMAT`: chrono format string for dates (default: "%Y-%m-%d")
//! - `SLOTS_SEED_PATH`: Optional JSON file with the initial slot list

use eyre::{Result, WrapErr, ensure};
use slotbook_core::validation::{DEFAULT_DATE_FORMAT, DEFAULT_TIME_PATTERN};
use std::{env, path::PathBuf};
use tracing::Level;

/// Configuration for the SlotBook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Requests admitted per client address in each one-second window
    pub rate_limit_per_second: u32,

    /// How often expired rate limiter windows are evicted, in seconds
    pub rate_limit_cleanup_interval: u64,

    /// Time-of-day pattern handed to the validator
    pub time_pattern: String,

    /// Date format handed to the validator
    pub date_format: String,

    /// Seed file for the slot registry; the built-in list is used when unset
    pub seed_path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            log_level: Level::INFO,
            cors_origins: None,
            request_timeout: 30,
            rate_limit_per_second: 5,
            rate_limit_cleanup_interval: 60,
            time_pattern: DEFAULT_TIME_PATTERN.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            seed_path: None,
        }
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - RATE_LIMIT_PER_SECOND or RATE_LIMIT_CLEANUP_SECONDS is not a positive integer
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        // Network settings
        let host = env::var("API_HOST").unwrap_or(defaults.host);
        let port = match env::var("API_PORT") {
            Ok(port) => port.parse().wrap_err("Invalid API_PORT value")?,
            Err(_) => defaults.port,
        };

        // Logging settings
        let log_level = env::var("LOG_LEVEL")
            .map(|level| parse_log_level(&level))
            .unwrap_or(defaults.log_level);

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| parse_origins(&origins));

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|timeout| timeout.parse().ok())
            .unwrap_or(defaults.request_timeout);

        // Rate limiting
        let rate_limit_per_second = match env::var("RATE_LIMIT_PER_SECOND") {
            Ok(limit) => limit.parse().wrap_err("Invalid RATE_LIMIT_PER_SECOND value")?,
            Err(_) => defaults.rate_limit_per_second,
        };
        ensure!(rate_limit_per_second > 0, "RATE_LIMIT_PER_SECOND must be positive");

        let rate_limit_cleanup_interval = match env::var("RATE_LIMIT_CLEANUP_SECONDS") {
            Ok(interval) => interval
                .parse()
                .wrap_err("Invalid RATE_LIMIT_CLEANUP_SECONDS value")?,
            Err(_) => defaults.rate_limit_cleanup_interval,
        };
        ensure!(
            rate_limit_cleanup_interval > 0,
            "RATE_LIMIT_CLEANUP_SECONDS must be positive"
        );

        // Slot formats and seed
        let time_pattern = env::var("SLOT_TIME_PATTERN").unwrap_or(defaults.time_pattern);
        let date_format = env::var("SLOT_DATE_FORMAT").unwrap_or(defaults.date_format);
        let seed_path = env::var("SLOTS_SEED_PATH").ok().map(PathBuf::from);

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            rate_limit_per_second,
            rate_limit_cleanup_interval,
            time_pattern,
            date_format,
            seed_path,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_log_level(level: &str) -> Level {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
