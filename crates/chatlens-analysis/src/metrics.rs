use std::collections::BTreeSet;

use async_trait::async_trait;
use rand::prelude::*;
use serde_json::json;

use chatlens_core::models::{ChatMessage, UploadRecord};

use crate::ChatAnalyzer;

const WEEKDAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Message-level metrics computed directly from the decoded transcript:
/// message count, participant set, and average message length.
pub struct MessageMetricsAnalyzer;

#[async_trait]
impl ChatAnalyzer for MessageMetricsAnalyzer {
    fn result_type(&self) -> &'static str {
        "message_analysis"
    }

    async fn analyze(
        &self,
        _upload: &UploadRecord,
        messages: &[ChatMessage],
    ) -> anyhow::Result<serde_json::Value> {
        // BTreeSet keeps the participant list deterministically ordered.
        let participants: BTreeSet<&str> =
            messages.iter().map(|m| m.sender.as_str()).collect();
        let average_length = if messages.is_empty() {
            0
        } else {
            messages.iter().map(|m| m.text.chars().count()).sum::<usize>() / messages.len()
        };

        Ok(json!({
            "total_messages": messages.len(),
            "unique_participants": participants.len(),
            "participants": participants.iter().collect::<Vec<_>>(),
            "average_message_length": average_length,
        }))
    }
}

/// Simulated conversation-shape metrics (activity peaks, threading,
/// response latency). Representative output only.
pub struct ConversationMetricsAnalyzer;

#[async_trait]
impl ChatAnalyzer for ConversationMetricsAnalyzer {
    fn result_type(&self) -> &'static str {
        "conversation_metrics"
    }

    async fn analyze(
        &self,
        _upload: &UploadRecord,
        _messages: &[ChatMessage],
    ) -> anyhow::Result<serde_json::Value> {
        let mut rng = rand::rng();
        Ok(json!({
            "peak_activity_hour": rng.random_range(9..=17),
            "most_active_day": WEEKDAYS.choose(&mut rng).copied().unwrap_or("Monday"),
            "conversation_threads": rng.random_range(5..=20),
            "average_response_time_minutes": rng.random_range(2..=30),
        }))
    }
}
