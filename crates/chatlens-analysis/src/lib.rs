//! Chatlens Analysis – the pluggable analysis step.
//!
//! The engine invokes every configured [`ChatAnalyzer`] once an upload's
//! simulated processing reaches completion. The bundled analyzers produce
//! representative output only; a real implementation can be substituted
//! without touching the lifecycle engine.

mod metrics;
mod sentiment;

pub use metrics::{ConversationMetricsAnalyzer, MessageMetricsAnalyzer};
pub use sentiment::SentimentAnalyzer;

use async_trait::async_trait;

use chatlens_core::models::{ChatMessage, UploadRecord};

/// Capability interface for one kind of chat-transcript analysis.
///
/// Implementations receive the upload's decoded message records and return
/// the structured payload stored as a `ProcessingResult`. Errors are
/// captured by the engine and recorded as a terminal failure on the upload;
/// they never propagate to a caller.
#[async_trait]
pub trait ChatAnalyzer: Send + Sync {
    /// Tag identifying the kind of analysis, stored as `result_type`.
    fn result_type(&self) -> &'static str;

    async fn analyze(
        &self,
        upload: &UploadRecord,
        messages: &[ChatMessage],
    ) -> anyhow::Result<serde_json::Value>;
}

/// The default analyzer set: message metrics, sentiment, and conversation
/// metrics, mirroring what a production deployment would register.
pub fn default_analyzers() -> Vec<Box<dyn ChatAnalyzer>> {
    vec![
        Box::new(MessageMetricsAnalyzer),
        Box::new(SentimentAnalyzer),
        Box::new(ConversationMetricsAnalyzer),
    ]
}
