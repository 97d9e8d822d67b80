//! Shared types, errors, and configuration for Lendview.
//!
//! This crate provides common types used across all other crates:
//! - Display formatting helpers for currency, percent, and date values
//! - Date-range presets for dashboard queries
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
