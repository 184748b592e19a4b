//! Shared configuration and error handling for Critnotify
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration management following 12-factor principles
//! - The adapter-level error type

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};
