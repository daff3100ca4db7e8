//! Chatlens Store – concurrent in-memory storage for upload records,
//! decoded transcripts, and processing results.
//!
//! The store exclusively owns all records. Other components never hold
//! references into it across a suspension point; they always re-fetch
//! through its API.

mod store;

pub use store::RecordStore;
