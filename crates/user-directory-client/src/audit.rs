// crates/user-directory-client/src/audit.rs
// ============================================================================
// Module: Directory Audit Logging
// Description: Structured audit events for directory requests.
// Purpose: Emit one JSON-lines record per request without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every directory request produces a [`DirectoryAuditEvent`] describing the
//! operation, target path, status, outcome, and latency. Sinks decide where
//! the event goes: stderr, an append-only file, or nowhere.
//! Request and response bodies are never logged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Labels
// ============================================================================

/// Logical directory operation behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryOperation {
    /// List every user.
    ListUsers,
    /// Fetch a single user by reference.
    GetUser,
    /// Submit a new user.
    CreateUser,
}

/// Request outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// 2xx with a decodable body.
    Ok,
    /// Any failure.
    Error,
}

// ============================================================================
// SECTION: Types
// ============================================================================

/// Directory request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Logical operation.
    pub operation: DirectoryOperation,
    /// HTTP method.
    pub method: String,
    /// Request path (no query, no host).
    pub path: String,
    /// HTTP status when a response was received.
    pub status: Option<u16>,
    /// Request outcome.
    pub outcome: RequestOutcome,
    /// Error kind label when the request failed.
    pub error_kind: Option<&'static str>,
    /// Response body size in bytes.
    pub response_bytes: usize,
    /// Wall-clock latency in milliseconds.
    pub latency_ms: u64,
}

/// Inputs required to construct a directory audit event.
pub struct DirectoryAuditEventParams {
    /// Logical operation.
    pub operation: DirectoryOperation,
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// HTTP status when a response was received.
    pub status: Option<u16>,
    /// Request outcome.
    pub outcome: RequestOutcome,
    /// Error kind label when the request failed.
    pub error_kind: Option<&'static str>,
    /// Response body size in bytes.
    pub response_bytes: usize,
    /// Wall-clock latency in milliseconds.
    pub latency_ms: u64,
}

impl DirectoryAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: DirectoryAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "directory_request",
            timestamp_ms,
            operation: params.operation,
            method: params.method,
            path: params.path,
            status: params.status,
            outcome: params.outcome,
            error_kind: params.error_kind,
            response_bytes: params.response_bytes,
            latency_ms: params.latency_ms,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for directory request events.
pub trait DirectoryAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &DirectoryAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct DirectoryStderrAuditSink;

impl DirectoryAuditSink for DirectoryStderrAuditSink {
    fn record(&self, event: &DirectoryAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct DirectoryFileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl DirectoryFileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl DirectoryAuditSink for DirectoryFileAuditSink {
    fn record(&self, event: &DirectoryAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct DirectoryNoopAuditSink;

impl DirectoryAuditSink for DirectoryNoopAuditSink {
    fn record(&self, _event: &DirectoryAuditEvent) {}
}
