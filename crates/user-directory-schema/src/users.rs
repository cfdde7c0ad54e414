// crates/user-directory-schema/src/users.rs
// ============================================================================
// Module: Directory Record Schemas
// Description: Built-in schemas for user records and create payloads.
// Purpose: Provide the fixed shapes directory responses are checked against.
// Dependencies: crate::schema
// ============================================================================

//! ## Overview
//! [`user_schema`] describes a user record as served by the directory;
//! [`new_user_schema`] describes a well-formed create payload. Both are built
//! once per process and shared.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::OnceLock;

use crate::schema::FieldType;
use crate::schema::ObjectSchema;
use crate::schema::Schema;

// ============================================================================
// SECTION: Schemas
// ============================================================================

/// Returns the user record schema.
///
/// Required: positive integer `id`; string `name`, `username`, `email`; an
/// `address` object with a string `city`. Other reference fields are typed when
/// present. Unknown fields are allowed.
#[must_use]
pub fn user_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| Schema::from(user_object()))
}

/// Returns the create-user payload schema (`name`, `username`, `email` strings).
///
/// The directory client never applies this schema; callers that want to
/// reject malformed payloads before submission validate against it first.
#[must_use]
pub fn new_user_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::from(
            ObjectSchema::new()
                .required("name", FieldType::String)
                .required("username", FieldType::String)
                .required("email", FieldType::String),
        )
    })
}

/// Builds the declarative user record rules.
fn user_object() -> ObjectSchema {
    let geo =
        ObjectSchema::new().required("lat", FieldType::String).required("lng", FieldType::String);
    let address = ObjectSchema::new()
        .optional("street", FieldType::String)
        .optional("suite", FieldType::String)
        .required("city", FieldType::String)
        .optional("zipcode", FieldType::String)
        .optional("geo", FieldType::Object(geo));
    let company = ObjectSchema::new()
        .required("name", FieldType::String)
        .optional("catchPhrase", FieldType::String)
        .optional("bs", FieldType::String);
    ObjectSchema::new()
        .required("id", FieldType::PositiveInteger)
        .required("name", FieldType::String)
        .required("username", FieldType::String)
        .required("email", FieldType::String)
        .required("address", FieldType::Object(address))
        .optional("phone", FieldType::String)
        .optional("website", FieldType::String)
        .optional("company", FieldType::Object(company))
}
