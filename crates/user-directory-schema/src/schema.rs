// crates/user-directory-schema/src/schema.rs
// ============================================================================
// Module: Declarative Schemas
// Description: Field-level description of expected payload shapes.
// Purpose: Build immutable schemas and render them as JSON Schema documents.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! A schema maps field names to expected types and required-ness. Object
//! fields nest recursively. Schemas are assembled once with the
//! [`ObjectSchema`] builder (or supplied as a raw JSON Schema document) and are
//! immutable afterwards.
//!
//! Rendering targets JSON Schema Draft 2020-12.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::validator::CompiledSchema;
use crate::validator::JsonSchemaValidator;
use crate::validator::SchemaError;

// ============================================================================
// SECTION: Field Model
// ============================================================================

/// Expected type of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// UTF-8 string.
    String,
    /// Integer of any sign.
    Integer,
    /// Integer >= 1.
    PositiveInteger,
    /// Any JSON number.
    Number,
    /// Boolean.
    Boolean,
    /// Nested object with its own field rules.
    Object(ObjectSchema),
    /// Array whose items all share one type.
    Array(Box<Self>),
    /// Any JSON value, including null.
    Any,
}

impl FieldType {
    /// Renders the type as a JSON Schema fragment.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        match self {
            Self::String => json!({ "type": "string" }),
            Self::Integer => json!({ "type": "integer" }),
            Self::PositiveInteger => json!({ "type": "integer", "minimum": 1 }),
            Self::Number => json!({ "type": "number" }),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::Object(object) => object.to_json_schema(),
            Self::Array(items) => json!({ "type": "array", "items": items.to_json_schema() }),
            Self::Any => json!({}),
        }
    }
}

/// A named field with its expected type and required-ness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as it appears on the wire.
    pub name: String,
    /// Expected type.
    pub field_type: FieldType,
    /// Whether the field must be present.
    pub required: bool,
}

// ============================================================================
// SECTION: Object Schemas
// ============================================================================

/// Ordered set of field rules for a JSON object.
///
/// # Invariants
/// - Field names are unique; redeclaring a name replaces the earlier rule in place.
/// - Unknown fields are accepted unless [`ObjectSchema::deny_unknown`] is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectSchema {
    /// Declared fields in declaration order.
    fields: Vec<FieldSpec>,
    /// Whether undeclared fields are rejected.
    deny_unknown: bool,
}

impl ObjectSchema {
    /// Creates an empty object schema that accepts any object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a required field.
    #[must_use]
    pub fn required(self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.field(name.into(), field_type, true)
    }

    /// Declares an optional field; when present it must match `field_type`.
    #[must_use]
    pub fn optional(self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.field(name.into(), field_type, false)
    }

    /// Rejects fields that were not declared.
    #[must_use]
    pub const fn deny_unknown(mut self) -> Self {
        self.deny_unknown = true;
        self
    }

    /// Returns the declared fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the rule for `name`, if declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Renders the object rules as a JSON Schema fragment.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in &self.fields {
            properties.insert(field.name.clone(), field.field_type.to_json_schema());
            if field.required {
                required.push(Value::String(field.name.clone()));
            }
        }
        let mut document = Map::new();
        document.insert("type".to_string(), Value::String("object".to_string()));
        document.insert("properties".to_string(), Value::Object(properties));
        document.insert("required".to_string(), Value::Array(required));
        document.insert("additionalProperties".to_string(), Value::Bool(!self.deny_unknown));
        Value::Object(document)
    }

    /// Inserts or replaces a field rule.
    fn field(mut self, name: String, field_type: FieldType, required: bool) -> Self {
        let spec = FieldSpec {
            name,
            field_type,
            required,
        };
        if let Some(existing) = self.fields.iter_mut().find(|field| field.name == spec.name) {
            *existing = spec;
        } else {
            self.fields.push(spec);
        }
        self
    }
}

// ============================================================================
// SECTION: Schema Documents
// ============================================================================

/// Immutable schema document handed to a [`crate::SchemaValidator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Rendered JSON Schema document.
    document: Value,
}

impl Schema {
    /// Builds a schema from declarative object rules.
    #[must_use]
    pub fn object(object: &ObjectSchema) -> Self {
        Self {
            document: object.to_json_schema(),
        }
    }

    /// Wraps a raw JSON Schema document.
    ///
    /// The document is not checked here; an invalid document surfaces as
    /// [`SchemaError::InvalidSchema`] when it is compiled.
    #[must_use]
    pub const fn from_json(document: Value) -> Self {
        Self {
            document,
        }
    }

    /// Returns the JSON Schema document.
    #[must_use]
    pub const fn as_json(&self) -> &Value {
        &self.document
    }

    /// Compiles the schema with the default engine for repeated validation.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidSchema`] when the document is not a valid schema.
    pub fn compile(&self) -> Result<CompiledSchema, SchemaError> {
        JsonSchemaValidator.compile(self)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(object: ObjectSchema) -> Self {
        Self::object(&object)
    }
}
