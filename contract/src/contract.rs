//! Step and suite descriptors.
//!
//! A [`Suite`] is an ordered list of [`Step`]s. Steps are plain data: they
//! serialize to JSON and only reference session values through `{key}`
//! placeholders, so the runner can check every dependency before sending
//! anything.

use crate::assertion::{FieldAssertion, StatusExpectation};
use crate::context::{ContextKey, placeholders, value_placeholders};
use crate::error::{ContractError, ContractResult};
use crate::schema::SchemaValidator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// HTTP method of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// How a step authenticates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Auth {
    /// No Authorization header
    #[default]
    None,
    /// `Authorization: Bearer <accessToken>`
    Bearer,
}

/// Request half of a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestTemplate {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the base URL; may contain `{key}` placeholders
    pub path: String,
    /// Extra request headers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// JSON body; string leaves may contain `{key}` placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// Response half of a step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    /// Expected status
    #[serde(default)]
    pub status: StatusExpectation,
    /// Literal field checks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldAssertion>,
    /// Named schema the body must conform to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Whether the body must be empty
    #[serde(default)]
    pub empty_body: bool,
}

/// Copy a response field into the session context once a step passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// JSON pointer into the response body
    pub pointer: String,
    /// Destination key
    pub into: ContextKey,
}

/// One declared request plus its expected response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Step name, used in reports
    pub name: String,
    /// Request to send
    pub request: RequestTemplate,
    /// Authentication mode
    #[serde(default)]
    pub auth: Auth,
    /// Assertions on the response
    #[serde(default)]
    pub expect: Expectation,
    /// Values captured for later steps
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extract: Vec<Extraction>,
}

impl Step {
    /// Create a step expecting any 2xx response.
    #[must_use]
    pub fn new(name: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            request: RequestTemplate {
                method,
                path: path.into(),
                headers: BTreeMap::new(),
                body: None,
            },
            auth: Auth::None,
            expect: Expectation::default(),
            extract: Vec::new(),
        }
    }

    /// Send the access token as a bearer credential.
    #[must_use]
    pub const fn bearer(mut self) -> Self {
        self.auth = Auth::Bearer;
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.request.body = Some(body);
        self
    }

    /// Add a request header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.insert(name.into(), value.into());
        self
    }

    /// Expect an exact status code.
    #[must_use]
    pub const fn expect_status(mut self, status: u16) -> Self {
        self.expect.status = StatusExpectation::Exact(status);
        self
    }

    /// Expect any status outside 2xx.
    #[must_use]
    pub const fn expect_failure(mut self) -> Self {
        self.expect.status = StatusExpectation::Failure;
        self
    }

    /// Expect a field to equal a literal.
    #[must_use]
    pub fn expect_field(mut self, pointer: impl Into<String>, expected: impl Into<Value>) -> Self {
        self.expect.fields.push(FieldAssertion::equals(pointer, expected));
        self
    }

    /// Expect a field to be a non-empty string.
    #[must_use]
    pub fn expect_non_empty(mut self, pointer: impl Into<String>) -> Self {
        self.expect.fields.push(FieldAssertion::non_empty_string(pointer));
        self
    }

    /// Expect the body to conform to a named schema.
    #[must_use]
    pub fn expect_schema(mut self, schema: impl Into<String>) -> Self {
        self.expect.schema = Some(schema.into());
        self
    }

    /// Expect an empty body.
    #[must_use]
    pub const fn expect_empty_body(mut self) -> Self {
        self.expect.empty_body = true;
        self
    }

    /// Store a response field into the session context when the step passes.
    #[must_use]
    pub fn extract(mut self, pointer: impl Into<String>, into: ContextKey) -> Self {
        self.extract.push(Extraction {
            pointer: pointer.into(),
            into,
        });
        self
    }

    /// Session values the step cannot run without.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Context`] if a template names an unknown key.
    pub fn dependencies(&self) -> ContractResult<BTreeSet<ContextKey>> {
        let mut deps: BTreeSet<ContextKey> = placeholders(&self.request.path)?.into_iter().collect();
        if let Some(body) = &self.request.body {
            deps.extend(value_placeholders(body)?);
        }
        for value in self.request.headers.values() {
            deps.extend(placeholders(value)?);
        }
        if self.auth == Auth::Bearer {
            deps.insert(ContextKey::AccessToken);
        }
        Ok(deps)
    }

    /// Whether the body has to be parsed as JSON for this step.
    #[must_use]
    pub fn inspects_body(&self) -> bool {
        !self.expect.fields.is_empty() || self.expect.schema.is_some() || !self.extract.is_empty()
    }
}

/// Client registration performed before the first step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Pre-shared client name
    pub client_name: String,
}

/// An ordered list of dependent steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    /// Suite name, used in reports
    pub name: String,
    /// Registration run before the steps, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<Registration>,
    /// Steps, in execution order
    pub steps: Vec<Step>,
}

impl Suite {
    /// Create an empty suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registration: None,
            steps: Vec::new(),
        }
    }

    /// Register a client named `client_name` before the first step.
    #[must_use]
    pub fn with_registration(mut self, client_name: impl Into<String>) -> Self {
        self.registration = Some(Registration {
            client_name: client_name.into(),
        });
        self
    }

    /// Append a step.
    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Check that the suite can run as declared.
    ///
    /// Step names must be unique, every dependency must be produced by
    /// registration or an earlier step, and every schema must be known.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidSuite`] describing the first problem found.
    pub fn validate(&self, schemas: &impl SchemaValidator) -> ContractResult<()> {
        let mut available = BTreeSet::from([ContextKey::ClientEmail]);
        if self.registration.is_some() {
            available.insert(ContextKey::AccessToken);
        }

        let mut names = BTreeSet::new();
        for step in &self.steps {
            if !names.insert(step.name.as_str()) {
                return Err(ContractError::invalid_suite(format!(
                    "duplicate step name '{}'",
                    step.name
                )));
            }
            if let Some(missing) = step.dependencies()?.difference(&available).next() {
                return Err(ContractError::invalid_suite(format!(
                    "step '{}' needs {missing}, which nothing before it produces",
                    step.name
                )));
            }
            if let Some(schema) = step.expect.schema.as_deref().filter(|s| !schemas.knows(s)) {
                return Err(ContractError::invalid_suite(format!(
                    "step '{}' references unknown schema '{schema}'",
                    step.name
                )));
            }
            for extraction in &step.extract {
                if extraction.into == ContextKey::ClientEmail {
                    return Err(ContractError::invalid_suite(format!(
                        "step '{}' cannot overwrite {}",
                        step.name, extraction.into
                    )));
                }
                available.insert(extraction.into);
            }
        }
        Ok(())
    }
}
