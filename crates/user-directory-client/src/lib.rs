// crates/user-directory-client/src/lib.rs
// ============================================================================
// Module: User Directory Client Library
// Description: Blocking HTTP client for the remote user directory service.
// Purpose: Map list/get/filter/create operations onto single HTTP calls.
// Dependencies: user-directory-core, reqwest, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`DirectoryClient`] translates four logical operations into HTTP calls
//! against an explicitly configured base URL and returns decoded results.
//! Every non-2xx status is surfaced as [`DirectoryError::Remote`]; the client
//! never retries, caches, or corrects what the service returns.
//! Invariants:
//! - Each operation performs exactly one network call.
//! - Response bodies are capped at the configured byte limit.
//! - Every request emits one [`DirectoryAuditEvent`] to the configured sink.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod client;
pub mod error;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::DirectoryAuditEvent;
pub use audit::DirectoryAuditEventParams;
pub use audit::DirectoryAuditSink;
pub use audit::DirectoryFileAuditSink;
pub use audit::DirectoryNoopAuditSink;
pub use audit::DirectoryOperation;
pub use audit::DirectoryStderrAuditSink;
pub use audit::RequestOutcome;
pub use client::DEFAULT_BASE_URL;
pub use client::DEFAULT_MAX_RESPONSE_BYTES;
pub use client::DEFAULT_TIMEOUT_MS;
pub use client::DEFAULT_USER_AGENT;
pub use client::DirectoryClient;
pub use client::DirectoryClientConfig;
pub use client::DirectoryResponse;
pub use client::parse_base_url;
pub use error::DirectoryError;
