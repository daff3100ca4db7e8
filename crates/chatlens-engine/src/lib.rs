//! Chatlens Engine – the upload lifecycle engine.
//!
//! This crate ties the record store and the pluggable analyzers together:
//! the [`ProcessingEngine`] drives each upload's state machine in its own
//! background task, the [`LifecycleCoordinator`] is the public façade
//! enforcing tenant isolation, and the [`SummaryAggregator`] derives
//! per-tenant dashboard statistics.

mod coordinator;
mod engine;
mod summary;

pub use coordinator::LifecycleCoordinator;
pub use engine::ProcessingEngine;
pub use summary::SummaryAggregator;
