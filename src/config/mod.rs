use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod user_prompts;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use user_prompts::prompt_for_backend_url;
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing client settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the stream directory backend. Should include a scheme.
    pub backend_url: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Maximum age of a cached snapshot before a query refreshes it.
    #[serde(default = "default_freshness_window")]
    pub freshness_window_seconds: u64,
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    #[serde(default = "default_detail_cache_capacity")]
    pub detail_cache_capacity: usize,
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_freshness_window() -> u64 {
    constants::cache::FRESHNESS_WINDOW_SECONDS
}

fn default_retry_max_attempts() -> u32 {
    constants::retry::MAX_ATTEMPTS
}

fn default_retry_backoff_ms() -> u64 {
    constants::retry::BACKOFF_DELAY_MS
}

fn default_detail_cache_capacity() -> usize {
    constants::cache::DETAIL_CACHE_CAPACITY
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: String::new(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            freshness_window_seconds: default_freshness_window(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            detail_cache_capacity: default_detail_cache_capacity(),
        }
    }
}

/// Adds `https://` when no scheme is given and drops trailing slashes.
pub fn normalize_backend_url(backend_url: &str) -> String {
    let trimmed = backend_url.trim().trim_end_matches('/');
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// If no config file exists, prompts user for the backend URL and creates one.
    ///
    /// # Environment Variables
    /// - `STREAMS_BACKEND_URL` - Override backend URL
    /// - `STREAMS_LOG_FILE` - Override log file path
    /// - `STREAMS_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    ///
    /// Environment variables take precedence over the config file.
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else if std::env::var(env_vars::BACKEND_URL).is_ok() {
            // Filled in by the override below
            Config::default()
        } else {
            let config = Config {
                backend_url: prompt_for_backend_url().await?,
                ..Config::default()
            };
            config.save().await?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `STREAMS_*` environment overrides on top of the current values
    pub fn apply_env_overrides(&mut self) {
        if let Ok(backend_url) = std::env::var(env_vars::BACKEND_URL) {
            self.backend_url = backend_url;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if Path::new(&config_path).exists() {
            let config = Config::load().await?;
            println!("\nCurrent Configuration");
            println!("────────────────────────────────────");
            println!("Config Location:");
            println!("{config_path}");
            println!("────────────────────────────────────");
            println!("Backend URL:");
            println!("{}", config.backend_url);
            println!("────────────────────────────────────");
            println!("HTTP Timeout:");
            println!("{} seconds", config.http_timeout_seconds);
            println!("────────────────────────────────────");
            println!("Cache Freshness Window:");
            println!("{} seconds", config.freshness_window_seconds);
            println!("────────────────────────────────────");
            println!("Retry Policy:");
            println!(
                "{} attempts, {} ms between attempts",
                config.retry_max_attempts, config.retry_backoff_ms
            );
            println!("────────────────────────────────────");
            println!("Log File Location:");
            if let Some(custom_path) = &config.log_file_path {
                println!("{custom_path}");
            } else {
                println!("{log_dir}/{}", constants::LOG_FILE_NAME);
                println!("(Default location)");
            }
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and normalizes the
    /// backend URL before writing.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(&Config {
            backend_url: normalize_backend_url(&self.backend_url),
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without env overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
