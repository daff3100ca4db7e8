use async_trait::async_trait;
use rand::prelude::*;
use serde_json::json;

use chatlens_core::models::{ChatMessage, UploadRecord};

use crate::ChatAnalyzer;

const SENTIMENTS: [&str; 3] = ["positive", "neutral", "negative"];

/// Simulated sentiment analysis. Produces a representative payload with a
/// random overall sentiment and score; the real model sits behind the same
/// trait in production.
pub struct SentimentAnalyzer;

#[async_trait]
impl ChatAnalyzer for SentimentAnalyzer {
    fn result_type(&self) -> &'static str {
        "sentiment_analysis"
    }

    async fn analyze(
        &self,
        _upload: &UploadRecord,
        messages: &[ChatMessage],
    ) -> anyhow::Result<serde_json::Value> {
        let count = messages.len();
        let mut rng = rand::rng();

        let overall = SENTIMENTS
            .choose(&mut rng)
            .copied()
            .unwrap_or("neutral");
        let score = (rng.random_range(-1.0..=1.0f64) * 100.0).round() / 100.0;

        Ok(json!({
            "overall_sentiment": overall,
            "sentiment_score": score,
            "positive_messages": rng.random_range(0..=count / 2),
            "negative_messages": rng.random_range(0..=count / 4),
            "neutral_messages": rng.random_range(0..=count / 2),
        }))
    }
}
