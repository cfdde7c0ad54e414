// crates/user-directory-client/src/error.rs
// ============================================================================
// Module: Directory Client Errors
// Description: Error taxonomy for directory client operations.
// Purpose: Normalize transport, HTTP, and decode failures into one enum.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The client performs no local recovery. Each failure is surfaced unchanged
//! in meaning and normalized in kind; whether a 404 is a bug or an expected
//! answer is the caller's call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted by directory client operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// The service answered with a non-2xx status.
    #[error("directory returned status {status}: {body}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Raw response body (lossy UTF-8).
        body: String,
    },
    /// Connection, DNS, timeout, or body read failure.
    #[error("directory transport failure: {0}")]
    Transport(String),
    /// A 2xx body did not decode to the expected shape.
    #[error("directory response decode failure: {0}")]
    Decode(String),
    /// The client configuration is unusable.
    #[error("invalid directory client config: {0}")]
    Config(String),
}

impl DirectoryError {
    /// Returns the HTTP status for [`DirectoryError::Remote`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Remote {
                status, ..
            } => Some(*status),
            Self::Transport(_) | Self::Decode(_) | Self::Config(_) => None,
        }
    }

    /// Returns true for a 4xx remote status.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }

    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Remote {
                ..
            } => "remote",
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
            Self::Config(_) => "config",
        }
    }
}
