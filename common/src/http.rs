//! The HTTP client used to talk to the API under test.
//!
//! A run sends its requests one after another to a single host, so one
//! client with a tiny idle pool is built up front and lent to every step.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// `User-Agent` sent unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = concat!("bookstore-contract/", env!("CARGO_PKG_VERSION"));

/// Idle connections kept per host; requests never overlap.
const IDLE_CONNECTIONS: usize = 1;

/// Client settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Deadline for a whole request, response body included
    pub timeout: Duration,
    /// Deadline for establishing the connection
    pub connect_timeout: Duration,
    /// Sent as `User-Agent`
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    /// Override the request deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the connect deadline.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the `User-Agent`.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Build the client for a run.
///
/// Every request it sends carries `Accept: application/json`.
///
/// # Errors
///
/// Returns an error if TLS cannot be initialised or the user agent is not a
/// valid header value.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    ClientBuilder::new()
        .default_headers(headers)
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .pool_max_idle_per_host(IDLE_CONNECTIONS)
        .use_rustls_tls()
        .build()
}
