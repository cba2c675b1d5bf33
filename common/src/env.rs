//! Typed environment parsing.
//!
//! All helpers take a lookup function instead of reading `std::env`
//! directly, so callers can feed a fixed map in tests.

use crate::ConfigError;
use url::Url;

/// Load a `.env` file from the working directory if one exists.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Parse a variable with a default value.
///
/// # Errors
///
/// Returns [`ConfigError::ParseError`] if the variable is set but does not parse.
pub fn parse_env<T, F>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(val) => val
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::parse(name, e.to_string())),
        None => Ok(default),
    }
}

/// Parse a URL variable with a default value.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUrl`] if the resulting value is not an absolute URL.
pub fn parse_url_env<F>(lookup: &F, name: &str, default: &str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let url_str = lookup(name).unwrap_or_else(|| default.to_string());
    Url::parse(url_str.trim()).map_err(|e| ConfigError::InvalidUrl {
        field: name.to_string(),
        reason: e.to_string(),
    })
}

/// Read a variable that must be present and non-blank.
///
/// # Errors
///
/// Returns [`ConfigError::MissingRequired`] if the variable is unset or blank.
pub fn require_env<F>(lookup: &F, name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::missing(name))
}

/// Check whether a variable equals the given value, ignoring case.
pub fn parse_flag_env<F>(lookup: &F, name: &str, expected: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).is_some_and(|v| v.trim().eq_ignore_ascii_case(expected))
}
