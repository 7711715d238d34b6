//! # Common Test Infrastructure
//!
//! Shared helpers for the unit test suite.
