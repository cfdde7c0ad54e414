// crates/user-directory-schema/src/validator.rs
// ============================================================================
// Module: Schema Validation Adapter
// Description: Narrow validation interface over a swappable schema engine.
// Purpose: Report conformance of decoded payloads as a single error kind.
// Dependencies: jsonschema, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`SchemaValidator`] is the only validation surface callers see:
//! `validate(instance, schema)` returns `Ok(())` or a [`SchemaError`]. The
//! default engine, [`JsonSchemaValidator`], compiles schemas with the
//! `jsonschema` crate under Draft 2020-12 and collects every violation.
//! Invariants:
//! - Engine errors (compile or validation) are always mapped to [`SchemaError`].
//! - Violations are reported in engine iteration order, all at once.

// ============================================================================
// SECTION: Imports
// ============================================================================

use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use crate::schema::Schema;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Schema validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The schema document could not be compiled.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// The instance does not conform to the schema.
    #[error("schema validation failed: {}", .0.join("; "))]
    Violations(Vec<String>),
}

impl SchemaError {
    /// Returns the individual violation messages (empty for compile failures).
    #[must_use]
    pub fn violations(&self) -> &[String] {
        match self {
            Self::Violations(messages) => messages,
            Self::InvalidSchema(_) => &[],
        }
    }
}

// ============================================================================
// SECTION: Validator Interface
// ============================================================================

/// Validation engine interface.
pub trait SchemaValidator: Send + Sync {
    /// Checks `instance` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the schema is unusable or the instance
    /// violates it.
    fn validate(&self, instance: &Value, schema: &Schema) -> Result<(), SchemaError>;
}

/// Validator backed by the `jsonschema` crate (Draft 2020-12).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl JsonSchemaValidator {
    /// Compiles `schema` once for repeated validation.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidSchema`] when the document is not a valid schema.
    pub fn compile(self, schema: &Schema) -> Result<CompiledSchema, SchemaError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(schema.as_json())
            .map_err(|err| SchemaError::InvalidSchema(err.to_string()))?;
        Ok(CompiledSchema {
            validator,
        })
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, instance: &Value, schema: &Schema) -> Result<(), SchemaError> {
        self.compile(schema)?.validate(instance)
    }
}

/// A schema compiled by [`JsonSchemaValidator`], reusable across instances.
pub struct CompiledSchema {
    /// Compiled engine validator.
    validator: Validator,
}

impl CompiledSchema {
    /// Checks `instance` against the compiled schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Violations`] listing every violation found.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaError> {
        let messages: Vec<String> =
            self.validator.iter_errors(instance).map(|err| err.to_string()).collect();
        if messages.is_empty() { Ok(()) } else { Err(SchemaError::Violations(messages)) }
    }

    /// Returns true when `instance` conforms.
    #[must_use]
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }
}

/// Validates `instance` against `schema` with the default engine.
///
/// # Errors
///
/// Returns [`SchemaError`] when the schema is unusable or the instance violates it.
pub fn validate(instance: &Value, schema: &Schema) -> Result<(), SchemaError> {
    JsonSchemaValidator.validate(instance, schema)
}
