//! Integration tests for charsheet
//!
//! These tests drive the public store API and the compiled binary against
//! isolated temporary data directories.

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli_commands;
