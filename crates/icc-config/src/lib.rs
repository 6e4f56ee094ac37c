//! ICC stack configuration management
//!
//! This crate provides configuration loading and parsing for the ICC stack:
//! - TOML configuration file parsing
//! - Stack configuration structures
//! - Shared mutable runtime state (current card application, service table)

pub mod stack_config;
pub mod toml_config;

pub use stack_config::*;
pub use toml_config::*;
