//! Shared test utilities for charsheet
//!
//! - Fixed timestamps for reproducible date assertions
//! - Temporary store fixtures and sample characters

pub mod determinism;
