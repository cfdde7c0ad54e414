// system-tests/src/lib.rs
// ============================================================================
// Module: User Directory System Tests Library
// Description: Shared configuration for live directory conformance runs.
// Purpose: Provide common utilities for the system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the live conformance suite in
//! `system-tests/tests`. The suite talks to a real directory service and is
//! only built with the `system-tests` feature.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
