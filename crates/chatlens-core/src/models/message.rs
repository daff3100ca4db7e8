use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One decoded chat message, produced by the transport layer's file decoder
/// and handed to the engine at intake. The analyzers consume these records;
/// the engine never sees the raw file bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
    pub sent_at: Option<DateTime<Utc>>,
}

impl ChatMessage {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            sent_at: None,
        }
    }
}
