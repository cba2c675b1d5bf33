//! Named JSON schemas and the validation capability used by the runner.

use crate::error::{ContractError, ContractResult};
use jsonschema::{Draft, Validator};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Schema validation capability injected into the runner.
pub trait SchemaValidator {
    /// Check whether a schema with this name is known.
    fn knows(&self, schema: &str) -> bool;

    /// Validate `instance` against the named schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaCheckError`] if the schema is unknown or the instance does not conform.
    fn validate(&self, schema: &str, instance: &Value) -> Result<(), SchemaCheckError>;
}

/// Why an instance did not pass a schema check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaCheckError {
    /// No schema registered under this name
    Unknown(String),
    /// The instance violates the schema
    Violations(Vec<String>),
}

impl SchemaCheckError {
    /// Flatten into human-readable messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        match self {
            Self::Unknown(name) => vec![format!("unknown schema {name}")],
            Self::Violations(messages) => messages,
        }
    }
}

/// Registry of compiled schemas keyed by name.
#[derive(Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Validator>,
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("schemas", &self.schemas.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SchemaRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and register a schema under `name`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidSchema`] if the schema does not compile.
    pub fn register(&mut self, name: impl Into<String>, schema: &Value) -> ContractResult<()> {
        let name = name.into();
        let validator = jsonschema::options()
            .with_draft(Draft::Draft7)
            .build(schema)
            .map_err(|err| ContractError::invalid_schema(&name, err.to_string()))?;
        self.schemas.insert(name, validator);
        Ok(())
    }

    /// Builder form of [`SchemaRegistry::register`].
    ///
    /// # Errors
    ///
    /// Same as [`SchemaRegistry::register`].
    pub fn with_schema(mut self, name: impl Into<String>, schema: &Value) -> ContractResult<Self> {
        self.register(name, schema)?;
        Ok(self)
    }

    /// Registered schema names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }
}

impl SchemaValidator for SchemaRegistry {
    fn knows(&self, schema: &str) -> bool {
        self.schemas.contains_key(schema)
    }

    fn validate(&self, schema: &str, instance: &Value) -> Result<(), SchemaCheckError> {
        let validator = self
            .schemas
            .get(schema)
            .ok_or_else(|| SchemaCheckError::Unknown(schema.to_string()))?;
        let messages: Vec<String> = validator
            .iter_errors(instance)
            .map(|err| err.to_string())
            .collect();
        if messages.is_empty() {
            Ok(())
        } else {
            Err(SchemaCheckError::Violations(messages))
        }
    }
}
