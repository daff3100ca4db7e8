use chrono::Utc;

use chatlens_core::models::{TenantSummary, UploadListQuery, UploadStatus};
use chatlens_store::RecordStore;

/// Derives per-tenant dashboard statistics from the record store.
///
/// Pure read-side: scans the tenant's uploads without any global lock, so
/// the counts are an eventually-consistent snapshot while uploads are in
/// flight.
pub struct SummaryAggregator {
    store: RecordStore,
}

impl SummaryAggregator {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub async fn summarize(&self, tenant_id: &str) -> TenantSummary {
        let uploads = self
            .store
            .list(
                tenant_id,
                &UploadListQuery {
                    status: None,
                    skip: Some(0),
                    limit: Some(usize::MAX),
                },
            )
            .await;

        let today = Utc::now().date_naive();
        let mut summary = TenantSummary {
            total_uploads: uploads.len(),
            pending_uploads: 0,
            processing_uploads: 0,
            completed_uploads: 0,
            failed_uploads: 0,
            total_file_size: 0,
            uploads_today: 0,
            average_sentiment_score: None,
        };

        let mut score_sum = 0.0;
        let mut score_count = 0usize;
        for upload in &uploads {
            match upload.status {
                UploadStatus::Pending => summary.pending_uploads += 1,
                UploadStatus::Processing => summary.processing_uploads += 1,
                UploadStatus::Completed => summary.completed_uploads += 1,
                UploadStatus::Failed => summary.failed_uploads += 1,
            }
            summary.total_file_size += upload.file_size;
            if upload.created_at.date_naive() == today {
                summary.uploads_today += 1;
            }
            if upload.status != UploadStatus::Completed {
                continue;
            }
            // Rollup: mean sentiment score across available results.
            if let Ok(results) = self.store.results(upload.id, tenant_id).await {
                for result in results {
                    if result.result_type != "sentiment_analysis" {
                        continue;
                    }
                    if let Some(score) = result.data.get("sentiment_score").and_then(|v| v.as_f64())
                    {
                        score_sum += score;
                        score_count += 1;
                    }
                }
            }
        }
        if score_count > 0 {
            summary.average_sentiment_score = Some(score_sum / score_count as f64);
        }
        summary
    }
}
