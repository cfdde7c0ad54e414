// crates/user-directory-config/src/lib.rs
// ============================================================================
// Module: User Directory Config Library
// Description: TOML configuration for the directory client.
// Purpose: Load, validate, and apply client and audit settings.
// Dependencies: user-directory-client, serde, toml
// ============================================================================

//! ## Overview
//! [`DirectoryConfig`] is read from `user-directory.toml` (or the path in
//! `USER_DIRECTORY_CONFIG`) and validated fail-closed before it can build a
//! client configuration or an audit sink.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::AuditConfig;
pub use config::AuditSinkKind;
pub use config::ConfigError;
pub use config::DirectoryConfig;
pub use config::ServiceConfig;
