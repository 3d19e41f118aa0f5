//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `RIDGELINE_API_URL` - Base URL of the Ridgeline backend (http or https)
//!
//! ## Optional
//! - `RIDGELINE_API_TIMEOUT_SECS` - Per-request timeout in seconds (default: 15)
//! - `RIDGELINE_SESSION_FILE` - Durable session token location
//!   (default: .ridgeline-session.json)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default per-request timeout, matching what the backend expects of
/// well-behaved clients.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash
    pub api_url: String,
    /// Timeout applied to every request
    pub timeout: Duration,
    /// Where the session token is persisted between runs
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `RIDGELINE_API_URL` is missing or not an
    /// http(s) URL, or if the timeout is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = validate_api_url("RIDGELINE_API_URL", &get_required_env("RIDGELINE_API_URL")?)?;
        let timeout = parse_timeout_secs(
            "RIDGELINE_API_TIMEOUT_SECS",
            &get_env_or_default("RIDGELINE_API_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string()),
        )?;
        let session_file = PathBuf::from(get_env_or_default(
            "RIDGELINE_SESSION_FILE",
            ".ridgeline-session.json",
        ));

        Ok(Self {
            api_url,
            timeout,
            session_file,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a value is an http(s) URL and normalize it for joining
/// (no trailing slash).
fn validate_api_url(key: &str, value: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be an http(s) URL, got scheme '{}'", parsed.scheme()),
        ));
    }

    Ok(value.trim_end_matches('/').to_string())
}

/// Parse a timeout value in seconds. Zero is rejected; a zero timeout would
/// fail every request.
fn parse_timeout_secs(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let secs = value
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }

    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_url_accepts_http_and_https() {
        assert_eq!(
            validate_api_url("TEST_VAR", "http://localhost:8080").unwrap(),
            "http://localhost:8080"
        );
        assert_eq!(
            validate_api_url("TEST_VAR", "https://api.example.com").unwrap(),
            "https://api.example.com"
        );
    }

    #[test]
    fn test_validate_api_url_trims_trailing_slash() {
        assert_eq!(
            validate_api_url("TEST_VAR", "http://localhost:8080/").unwrap(),
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_validate_api_url_rejects_other_schemes() {
        let result = validate_api_url("TEST_VAR", "ftp://example.com");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_validate_api_url_rejects_garbage() {
        let result = validate_api_url("TEST_VAR", "not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(
            parse_timeout_secs("TEST_VAR", "15").unwrap(),
            Duration::from_secs(15)
        );
    }

    #[test]
    fn test_parse_timeout_secs_rejects_zero() {
        assert!(matches!(
            parse_timeout_secs("TEST_VAR", "0"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_parse_timeout_secs_rejects_non_numeric() {
        assert!(matches!(
            parse_timeout_secs("TEST_VAR", "fifteen"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }
}
