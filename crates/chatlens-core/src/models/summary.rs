use serde::Serialize;

/// Per-tenant dashboard statistics derived by scanning that tenant's
/// uploads. Pure read-side snapshot; a mix of terminal and in-flight
/// uploads at scan time is expected.
#[derive(Debug, Clone, Serialize)]
pub struct TenantSummary {
    pub total_uploads: usize,
    pub pending_uploads: usize,
    pub processing_uploads: usize,
    pub completed_uploads: usize,
    pub failed_uploads: usize,
    pub total_file_size: u64,
    pub uploads_today: usize,
    /// Mean `sentiment_score` over the tenant's available sentiment results,
    /// None when no completed upload carries one yet.
    pub average_sentiment_score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serializes_null_rollup() {
        let summary = TenantSummary {
            total_uploads: 0,
            pending_uploads: 0,
            processing_uploads: 0,
            completed_uploads: 0,
            failed_uploads: 0,
            total_file_size: 0,
            uploads_today: 0,
            average_sentiment_score: None,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_uploads"], 0);
        assert!(json["average_sentiment_score"].is_null());
    }
}
