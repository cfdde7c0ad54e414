// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for directory system-tests.
// Purpose: Provide client construction and artifact utilities.
// Dependencies: system-tests, user-directory-client
// ============================================================================

//! ## Overview
//! Shared helpers for directory system-tests.
//! Invariants:
//! - Clients are built only from validated system-test configuration.
//! - Artifacts are written under a per-test run root.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
pub mod harness;
