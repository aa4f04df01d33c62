//! bundlemap CLI library components.
//!
//! The main binary is in `main.rs`; the modules are exposed here so the
//! commands can be driven from integration tests.

pub mod commands;
pub mod formatters;
pub mod logging;
pub mod manifest;
