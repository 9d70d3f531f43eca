//! Fork Purger CLI library exports for testing.
//!
//! The binary in `main.rs` is a thin wrapper around these modules.

pub mod args;
pub mod config;
pub mod errors;
pub mod output;
pub mod settings;
