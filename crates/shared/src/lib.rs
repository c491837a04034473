//! Shared errors and configuration for the Tally report suite.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, DatabaseConfig, ReportConfig, ServerConfig};
pub use error::{AppError, AppResult};
