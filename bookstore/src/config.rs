//! Suite configuration from the environment.

use contract_common::{
    ConfigError, DEFAULT_USER_AGENT, HttpConfig, TracingConfig, load_dotenv, parse_env,
    parse_flag_env, parse_url_env, require_env,
};
use std::time::Duration;
use url::Url;

/// Public instance of the book ordering API.
pub const DEFAULT_BASE_URL: &str = "https://simple-books-api.glitch.me";

/// Suite configuration with validation.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// API base URL
    pub base_url: Url,
    /// Pre-shared client name used for registration
    pub client_name: String,
    /// HTTP request timeout
    pub http_timeout: Duration,
    /// HTTP connect timeout, never longer than the request timeout
    pub connect_timeout: Duration,
    /// `User-Agent` sent with every request
    pub user_agent: String,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON logs
    pub json_logs: bool,
}

impl SuiteConfig {
    /// Load configuration from the process environment and an optional `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a value is missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through a lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a value is missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs: u64 = parse_env(&lookup, "BOOKSTORE_HTTP_TIMEOUT_SECS", 30)?;
        let connect_secs: u64 = parse_env(&lookup, "BOOKSTORE_CONNECT_TIMEOUT_SECS", 10)?;
        let config = Self {
            base_url: parse_url_env(&lookup, "BOOKSTORE_BASE_URL", DEFAULT_BASE_URL)?,
            client_name: require_env(&lookup, "BOOKSTORE_CLIENT_NAME")?,
            http_timeout: Duration::from_secs(timeout_secs),
            connect_timeout: Duration::from_secs(connect_secs.min(timeout_secs)),
            user_agent: lookup("BOOKSTORE_USER_AGENT")
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            json_logs: parse_flag_env(&lookup, "LOG_FORMAT", "json"),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http_timeout.is_zero() {
            return Err(ConfigError::parse(
                "BOOKSTORE_HTTP_TIMEOUT_SECS",
                "timeout must be greater than 0",
            ));
        }
        if self.connect_timeout.is_zero() {
            return Err(ConfigError::parse(
                "BOOKSTORE_CONNECT_TIMEOUT_SECS",
                "timeout must be greater than 0",
            ));
        }
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                field: "BOOKSTORE_BASE_URL".to_string(),
                reason: format!("unsupported scheme {}", self.base_url.scheme()),
            });
        }
        Ok(())
    }

    /// HTTP client settings for the run.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig::default()
            .with_timeout(self.http_timeout)
            .with_connect_timeout(self.connect_timeout)
            .with_user_agent(&self.user_agent)
    }

    /// Tracing settings for the run.
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        let config = TracingConfig::default()
            .with_service_name("bookstore-contract")
            .with_log_level(&self.log_level);
        if self.json_logs {
            config.with_json_output()
        } else {
            config
        }
    }
}
