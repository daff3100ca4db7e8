use std::sync::Arc;

use tokio::time::sleep;
use uuid::Uuid;

use chatlens_analysis::ChatAnalyzer;
use chatlens_core::models::ProcessingResult;
use chatlens_core::{EngineConfig, LifecycleError};
use chatlens_store::RecordStore;

/// Advances an upload's state machine in a background task of its own.
///
/// Dispatch is fire-and-forget: every upload gets an independently scheduled
/// task coordinated with the rest of the system only through the record
/// store, so different uploads never block each other. Cancellation is
/// cooperative: the task re-fetches through the store before every
/// mutation and stops silently once the record is gone.
#[derive(Clone)]
pub struct ProcessingEngine {
    store: RecordStore,
    analyzers: Arc<Vec<Box<dyn ChatAnalyzer>>>,
    config: EngineConfig,
}

impl ProcessingEngine {
    pub fn new(
        store: RecordStore,
        analyzers: Vec<Box<dyn ChatAnalyzer>>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            analyzers: Arc::new(analyzers),
            config,
        }
    }

    /// Spawn the background processing task for one upload and return
    /// immediately.
    pub fn dispatch(&self, upload_id: Uuid) {
        let engine = self.clone();
        tokio::spawn(async move {
            engine.run(upload_id).await;
        });
    }

    #[tracing::instrument(skip(self), fields(upload.id = %upload_id))]
    async fn run(&self, upload_id: Uuid) {
        match self.store.update(upload_id, |r| r.begin_processing()).await {
            Ok(_) => {}
            Err(LifecycleError::NotFound) => {
                // Cancelled or deleted before the task got scheduled.
                tracing::debug!("Upload gone before processing started");
                return;
            }
            Err(e) => {
                // Already running or terminal; a second dispatch must not
                // touch the record.
                tracing::warn!(error = %e, "Skipping dispatch for non-pending upload");
                return;
            }
        }
        tracing::info!("Started processing upload");

        if !self.advance_in_steps(upload_id).await {
            return;
        }

        if let Err(message) = self.run_analyzers(upload_id).await {
            self.mark_failed(upload_id, &message).await;
            return;
        }

        match self.store.update(upload_id, |r| r.complete()).await {
            Ok(_) => tracing::info!("Upload completed"),
            Err(LifecycleError::NotFound) => {
                tracing::debug!("Upload removed before completion could be recorded");
            }
            Err(e) => tracing::error!(error = %e, "Failed to mark upload completed"),
        }
    }

    /// Simulate work by walking progress towards 100 in configured steps,
    /// sleeping between steps. Returns false when the upload disappeared and
    /// the task should stop without any further store mutation.
    async fn advance_in_steps(&self, upload_id: Uuid) -> bool {
        let step = self.config.progress_step_percent;
        let mut progress = step;
        while progress < 100 {
            sleep(self.config.step_delay).await;
            match self
                .store
                .update(upload_id, move |r| r.advance_progress(progress))
                .await
            {
                Ok(record) => {
                    tracing::debug!(progress = record.progress, "Advanced upload progress");
                }
                Err(LifecycleError::NotFound) => {
                    tracing::debug!("Upload cancelled during processing");
                    return false;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Progress update rejected");
                    return false;
                }
            }
            progress = progress.saturating_add(step);
        }
        true
    }

    /// Run every configured analyzer over the upload's decoded transcript
    /// and append the outputs as results. Returns the captured error message
    /// on analysis failure.
    async fn run_analyzers(&self, upload_id: Uuid) -> Result<(), String> {
        let messages = match self.store.messages(upload_id).await {
            Ok(messages) => messages,
            Err(_) => {
                // Record deleted; nothing left to analyze or fail.
                tracing::debug!("Transcript gone before analysis, stopping");
                return Ok(());
            }
        };
        let upload = match self.store.get_unchecked(upload_id).await {
            Ok(upload) => upload,
            Err(_) => return Ok(()),
        };

        for analyzer in self.analyzers.iter() {
            let data = analyzer
                .analyze(&upload, &messages)
                .await
                .map_err(|e| format!("{}: {}", analyzer.result_type(), e))?;
            let result = ProcessingResult::new(upload_id, analyzer.result_type(), data);
            if self.store.append_result(result).await.is_err() {
                tracing::debug!("Upload removed while appending results, stopping");
                return Ok(());
            }
        }
        Ok(())
    }

    async fn mark_failed(&self, upload_id: Uuid, message: &str) {
        tracing::error!(error = message, "Upload processing failed");
        match self
            .store
            .update(upload_id, |r| r.fail(message.to_string()))
            .await
        {
            Ok(_) | Err(LifecycleError::NotFound) => {}
            Err(e) => tracing::error!(error = %e, "Failed to record upload failure"),
        }
    }
}
