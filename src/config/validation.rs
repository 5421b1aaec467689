use super::{Config, normalize_backend_url};
use crate::data_fetcher::api::parse_backend_url;
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Backend URL cannot be empty and must parse once normalized
/// - At least one fetch attempt, a non-zero freshness window, and a non-zero cache capacity
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    if config.backend_url.trim().is_empty() {
        return Err(AppError::config_error("Backend URL cannot be empty"));
    }
    parse_backend_url(&normalize_backend_url(&config.backend_url))?;

    if config.retry_max_attempts == 0 {
        return Err(AppError::config_error(
            "retry_max_attempts must be at least 1",
        ));
    }

    if config.freshness_window_seconds == 0 {
        return Err(AppError::config_error(
            "freshness_window_seconds must be greater than zero",
        ));
    }

    if config.detail_cache_capacity == 0 {
        return Err(AppError::config_error(
            "detail_cache_capacity must be greater than zero",
        ));
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
