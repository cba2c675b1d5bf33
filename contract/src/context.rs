//! Session context shared between the steps of one run.

use crate::error::ContextError;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use url::form_urlencoded;
use uuid::Uuid;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\{([A-Za-z][A-Za-z0-9]*)\}").unwrap()
});

/// Names of the values a run carries from one step to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContextKey {
    /// Email the test client registers with
    ClientEmail,
    /// Bearer token issued at registration
    AccessToken,
    /// Identifier of the order created by the run
    OrderId,
}

impl ContextKey {
    /// Placeholder name as written in templates.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClientEmail => "clientEmail",
            Self::AccessToken => "accessToken",
            Self::OrderId => "orderId",
        }
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextKey {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clientEmail" => Ok(Self::ClientEmail),
            "accessToken" => Ok(Self::AccessToken),
            "orderId" => Ok(Self::OrderId),
            other => Err(ContextError::UnknownPlaceholder(other.to_string())),
        }
    }
}

/// Values produced by earlier steps for later ones.
///
/// Every field starts empty (apart from the client email) and can be written
/// once. The access token is kept as a [`SecretString`] so it never shows up
/// in `Debug` output.
#[derive(Debug)]
pub struct SessionContext {
    client_email: String,
    access_token: Option<SecretString>,
    order_id: Option<String>,
}

impl SessionContext {
    /// Create a context for a client registering with `client_email`.
    #[must_use]
    pub fn new(client_email: impl Into<String>) -> Self {
        Self {
            client_email: client_email.into(),
            access_token: None,
            order_id: None,
        }
    }

    /// Create a context with a fresh, unique client email.
    #[must_use]
    pub fn with_generated_email() -> Self {
        Self::new(generate_client_email())
    }

    /// Email the client registers with.
    #[must_use]
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Bearer token, once registration has succeeded.
    #[must_use]
    pub const fn access_token(&self) -> Option<&SecretString> {
        self.access_token.as_ref()
    }

    /// Order identifier, once an order has been created.
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: ContextKey) -> Option<&str> {
        match key {
            ContextKey::ClientEmail => Some(&self.client_email),
            ContextKey::AccessToken => self.access_token.as_ref().map(|t| t.expose_secret()),
            ContextKey::OrderId => self.order_id.as_deref(),
        }
    }

    /// Check whether a key holds a value.
    #[must_use]
    pub fn contains(&self, key: ContextKey) -> bool {
        self.get(key).is_some()
    }

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::AlreadySet`] if the key already holds a value.
    pub fn record(&mut self, key: ContextKey, value: impl Into<String>) -> Result<(), ContextError> {
        // The client email is fixed at construction.
        if self.contains(key) {
            return Err(ContextError::AlreadySet(key));
        }
        match key {
            ContextKey::ClientEmail => {}
            ContextKey::AccessToken => self.access_token = Some(SecretString::from(value.into())),
            ContextKey::OrderId => self.order_id = Some(value.into()),
        }
        Ok(())
    }

    /// Substitute `{key}` placeholders in a template string.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::UnknownPlaceholder`] for a name that is not a
    /// [`ContextKey`], and [`ContextError::Missing`] for a key with no value yet.
    pub fn render(&self, template: &str) -> Result<String, ContextError> {
        self.substitute(template, |_, value| Ok(value.to_owned()))
    }

    /// Substitute `{key}` placeholders in a path template.
    ///
    /// Each value is percent-encoded as a single path segment, so reserved
    /// characters such as `/`, `?` and `#` cannot change the target resource.
    ///
    /// # Errors
    ///
    /// Same as [`SessionContext::render`], plus
    /// [`ContextError::UnsafePathSegment`] for a value that is empty, `.` or `..`.
    pub fn render_path(&self, template: &str) -> Result<String, ContextError> {
        self.substitute(template, encode_path_segment)
    }

    fn substitute<F>(&self, template: &str, encode: F) -> Result<String, ContextError>
    where
        F: Fn(ContextKey, &str) -> Result<String, ContextError>,
    {
        let mut out = String::with_capacity(template.len());
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let key: ContextKey = name.as_str().parse()?;
            let value = self.get(key).ok_or(ContextError::Missing(key))?;
            out.push_str(&template[last..whole.start()]);
            out.push_str(&encode(key, value)?);
            last = whole.end();
        }
        out.push_str(&template[last..]);
        Ok(out)
    }

    /// Substitute placeholders in every string leaf of a JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`SessionContext::render`].
    pub fn render_value(&self, value: &Value) -> Result<Value, ContextError> {
        Ok(match value {
            Value::String(s) => Value::String(self.render(s)?),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|v| self.render_value(v))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), self.render_value(v)?)))
                    .collect::<Result<_, ContextError>>()?,
            ),
            other => other.clone(),
        })
    }
}

/// Keys referenced by `{key}` placeholders in a template.
///
/// # Errors
///
/// Returns [`ContextError::UnknownPlaceholder`] for a name that is not a [`ContextKey`].
pub fn placeholders(template: &str) -> Result<Vec<ContextKey>, ContextError> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().parse())
        .collect()
}

/// Keys referenced anywhere in the string leaves of a JSON value.
///
/// # Errors
///
/// Same as [`placeholders`].
pub fn value_placeholders(value: &Value) -> Result<Vec<ContextKey>, ContextError> {
    match value {
        Value::String(s) => placeholders(s),
        Value::Array(items) => items.iter().try_fold(Vec::new(), |mut acc, v| {
            acc.extend(value_placeholders(v)?);
            Ok(acc)
        }),
        Value::Object(map) => map.values().try_fold(Vec::new(), |mut acc, v| {
            acc.extend(value_placeholders(v)?);
            Ok(acc)
        }),
        _ => Ok(Vec::new()),
    }
}

/// Percent-encode `value` so it stays one path segment.
fn encode_path_segment(key: ContextKey, value: &str) -> Result<String, ContextError> {
    if matches!(value, "" | "." | "..") {
        return Err(ContextError::UnsafePathSegment(key));
    }
    // The form encoder writes spaces as `+`; a literal `+` comes out as `%2B`.
    Ok(form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20"))
}

/// Generate a client email that is unique per call.
#[must_use]
pub fn generate_client_email() -> String {
    format!("contract-{}@example.com", Uuid::new_v4().simple())
}
