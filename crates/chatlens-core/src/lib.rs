//! Chatlens Core Library
//!
//! This crate provides the domain models, error taxonomy, and configuration
//! shared across all Chatlens components.

pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;

// Re-export commonly used types
pub use config::EngineConfig;
pub use error::{LifecycleError, LifecycleResult};
