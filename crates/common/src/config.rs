//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{Error, Result};

/// Zone used for timestamps typed without an explicit UTC offset
pub const DEFAULT_INPUT_TIMEZONE: &str = "Asia/Jerusalem";

/// Default tracing filter for the binaries
pub const DEFAULT_LOG_FILTER: &str = "critnotify=info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// IANA zone naive form timestamps are entered in
    pub input_timezone: String,

    /// Runtime configuration
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_timezone: DEFAULT_INPUT_TIMEZONE.to_string(),
            rust_log: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let input_timezone = env::var("CRITNOTIFY_INPUT_TIMEZONE")
            .unwrap_or_else(|_| DEFAULT_INPUT_TIMEZONE.to_string());
        if input_timezone.trim().is_empty() {
            return Err(Error::Configuration(
                "CRITNOTIFY_INPUT_TIMEZONE must not be blank".to_string(),
            ));
        }

        let config = Self {
            input_timezone: input_timezone.trim().to_string(),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        };

        tracing::debug!(input_timezone = %config.input_timezone, "Configuration loaded");

        Ok(config)
    }
}
