// crates/user-directory-schema/src/lib.rs
// ============================================================================
// Module: User Directory Schema Library
// Description: Declarative record schemas and a narrow validation adapter.
// Purpose: Check decoded directory payloads against a fixed shape.
// Dependencies: jsonschema, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `user-directory-schema` describes the expected shape of directory payloads
//! (field names, leaf types, required-ness, nesting) and checks decoded JSON
//! against it. The validation engine sits behind [`SchemaValidator`]; the
//! default [`JsonSchemaValidator`] delegates to the `jsonschema` crate and
//! folds every engine failure into a single [`SchemaError`].
//! Invariants:
//! - Validation is a pure function of the instance and the schema.
//! - No engine-specific error type crosses the crate boundary.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod schema;
pub mod users;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use schema::FieldSpec;
pub use schema::FieldType;
pub use schema::ObjectSchema;
pub use schema::Schema;
pub use users::new_user_schema;
pub use users::user_schema;
pub use validator::CompiledSchema;
pub use validator::JsonSchemaValidator;
pub use validator::SchemaError;
pub use validator::SchemaValidator;
pub use validator::validate;
