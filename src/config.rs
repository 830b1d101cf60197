//! Centralized configuration management for backoffice

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context};

/// Address of the back-office API when nothing overrides it
pub const DEFAULT_BASE_URL: &str = "http://localhost:10000";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Log file written by both the TUI and the CLI
    pub log_file: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout_seconds: Option<u64>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_file: PathBuf::from("backoffice.log"),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("BACKOFFICE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let log_file = std::env::var("BACKOFFICE_LOG_FILE")
            .unwrap_or_else(|_| "backoffice.log".to_string())
            .into();

        let http = HttpConfig {
            timeout_seconds: parse_env_var("BACKOFFICE_HTTP_TIMEOUT_SECONDS")?,
            user_agent: std::env::var("BACKOFFICE_USER_AGENT")
                .unwrap_or_else(|_| default_user_agent()),
        };

        Ok(Config {
            base_url,
            log_file,
            http,
        })
    }

    /// Get HTTP timeout as Duration, if one is configured
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http.timeout_seconds.map(Duration::from_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base URL: {}", self.base_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "Base URL must use http or https: {}",
                self.base_url
            ));
        }

        Ok(())
    }
}

fn default_user_agent() -> String {
    format!("backoffice/{}", env!("CARGO_PKG_VERSION"))
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:10000");
        assert_eq!(config.log_file, PathBuf::from("backoffice.log"));
        assert!(config.http_timeout().is_none());
        assert!(config.http.user_agent.starts_with("backoffice/"));
    }

    #[test]
    fn test_config_validation() {
        Config::default().validate().unwrap();

        let mut config = Config::default();
        config.base_url = "ftp://localhost:10000".to_string();
        assert!(config.validate().is_err());

        config.base_url = "localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_conversion() {
        let mut config = Config::default();
        config.http.timeout_seconds = Some(5);
        assert_eq!(config.http_timeout(), Some(Duration::from_secs(5)));
    }
}
