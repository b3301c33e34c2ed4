//! Shared types, errors, and configuration for Campfin.
//!
//! This crate provides common types used across all other crates:
//! - Money type with decimal precision
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigLoadError, EngineConfig, OwnershipConfig, ReconciliationConfig};
pub use error::{AppError, AppResult};
