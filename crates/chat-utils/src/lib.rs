//! Shared utilities for the chatbot workspace
//!
//! This crate provides common functionality used by every binary in the
//! workspace: tracing setup and the application-level configuration.

pub mod config;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing_with;
