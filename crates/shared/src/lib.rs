//! Shared types, errors, and configuration for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Typed serial IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management and the key/value configuration source

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ConfigurationError, ConfigurationSource, Settings, StaticConfig};
pub use error::AppError;
