//! Data models for the upload lifecycle engine
//!
//! This module contains all data structures used throughout the engine,
//! organized by domain.

mod message;
mod result;
mod summary;
mod upload;

// Re-export all models for convenient imports
pub use message::*;
pub use result::*;
pub use summary::*;
pub use upload::*;
