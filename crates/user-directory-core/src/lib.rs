// crates/user-directory-core/src/lib.rs
// ============================================================================
// Module: User Directory Core Library
// Description: Domain model for the remote user directory.
// Purpose: Expose user records, lookup references, and client-side filters.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! User Directory core defines the records returned by the remote directory
//! service and the identifiers callers use to look them up. It performs no
//! I/O; the HTTP client and schema validator build on these types.
//! Invariants:
//! - Records are read-only snapshots of what the remote service returned.
//! - [`UserRef`] values are passed through unvalidated.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod identifiers;
pub mod user;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::UserRef;
pub use user::Address;
pub use user::Company;
pub use user::Geo;
pub use user::User;
pub use user::filter_by_city;
