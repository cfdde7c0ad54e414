// crates/user-directory-core/src/identifiers.rs
// ============================================================================
// Module: User Directory Identifiers
// Description: Caller-supplied references used to look up a single user.
// Purpose: Carry any id value, valid or not, to the directory unchanged.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The directory assigns user ids, but callers may ask for anything: negative
//! numbers, zero, ids past the end of the directory, non-numeric strings, or
//! nothing at all. [`UserRef`] captures each of those shapes so the client can
//! forward them verbatim and leave the verdict to the remote service.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Path segment rendered for [`UserRef::Absent`].
pub const ABSENT_SEGMENT: &str = "null";

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Reference to a single directory user as supplied by the caller.
///
/// # Invariants
/// - No normalization or range checking is applied; `Id(-1)` stays `-1`.
/// - Rendering always yields exactly one (unencoded) path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserRef {
    /// Numeric identifier of any sign or magnitude.
    Id(i64),
    /// Raw string identifier, forwarded as-is.
    Raw(String),
    /// No identifier was supplied.
    Absent,
}

impl UserRef {
    /// Returns the unencoded path segment used for the lookup.
    #[must_use]
    pub fn path_segment(&self) -> Cow<'_, str> {
        match self {
            Self::Id(id) => Cow::Owned(id.to_string()),
            Self::Raw(raw) => Cow::Borrowed(raw.as_str()),
            Self::Absent => Cow::Borrowed(ABSENT_SEGMENT),
        }
    }

    /// Returns the numeric id when the reference is numeric.
    #[must_use]
    pub const fn as_id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Raw(_) | Self::Absent => None,
        }
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_segment())
    }
}

impl From<i64> for UserRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<i32> for UserRef {
    fn from(id: i32) -> Self {
        Self::Id(i64::from(id))
    }
}

impl From<u32> for UserRef {
    fn from(id: u32) -> Self {
        Self::Id(i64::from(id))
    }
}

impl From<u64> for UserRef {
    fn from(id: u64) -> Self {
        i64::try_from(id).map_or_else(|_| Self::Raw(id.to_string()), Self::Id)
    }
}

impl From<&str> for UserRef {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl From<String> for UserRef {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl<T> From<Option<T>> for UserRef
where
    T: Into<Self>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}
