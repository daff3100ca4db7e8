use uuid::Uuid;
use validator::Validate;

use chatlens_analysis::{default_analyzers, ChatAnalyzer};
use chatlens_core::models::{
    NewUpload, ProcessingResult, TenantSummary, UploadListQuery, UploadRecord, UploadStatus,
    UploadStatusView,
};
use chatlens_core::{EngineConfig, LifecycleError, LifecycleResult};
use chatlens_store::RecordStore;

use crate::engine::ProcessingEngine;
use crate::summary::SummaryAggregator;

/// Public façade of the upload lifecycle engine.
///
/// Every operation is tenant-scoped: an id belonging to another tenant is
/// indistinguishable from a missing one. Submission is fire-and-forget:
/// the call returns with the freshly created Pending records while
/// processing continues in the background.
pub struct LifecycleCoordinator {
    store: RecordStore,
    engine: ProcessingEngine,
    aggregator: SummaryAggregator,
    config: EngineConfig,
}

impl LifecycleCoordinator {
    /// Coordinator with the default analyzer set.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_analyzers(config, default_analyzers())
    }

    /// Coordinator with a custom analyzer set, e.g. a real sentiment model
    /// or test doubles.
    pub fn with_analyzers(config: EngineConfig, analyzers: Vec<Box<dyn ChatAnalyzer>>) -> Self {
        let store = RecordStore::new();
        let engine = ProcessingEngine::new(store.clone(), analyzers, config.clone());
        let aggregator = SummaryAggregator::new(store.clone());
        Self {
            store,
            engine,
            aggregator,
            config,
        }
    }

    /// Validate and register a batch of uploads, then dispatch each to the
    /// processing engine. Validation covers the whole batch before any
    /// record is created, so a rejected submission leaves no trace.
    #[tracing::instrument(skip(self, files), fields(tenant.id = %tenant_id, files = files.len()))]
    pub async fn submit(
        &self,
        tenant_id: &str,
        files: Vec<NewUpload>,
    ) -> LifecycleResult<Vec<UploadRecord>> {
        if tenant_id.trim().is_empty() {
            return Err(LifecycleError::Validation(
                "tenant_id must not be empty".to_string(),
            ));
        }
        if files.is_empty() {
            return Err(LifecycleError::Validation(
                "at least one file is required".to_string(),
            ));
        }
        for file in &files {
            file.validate()?;
            if file.file_size > self.config.max_file_size_bytes {
                return Err(LifecycleError::Validation(format!(
                    "File {} exceeds maximum size of {} bytes",
                    file.filename, self.config.max_file_size_bytes
                )));
            }
        }

        let mut created = Vec::with_capacity(files.len());
        for file in files {
            let record = UploadRecord::new(tenant_id, &file);
            self.store.insert(record.clone(), file.messages).await?;
            tracing::info!(upload_id = %record.id, filename = %record.filename, "Upload accepted");
            self.engine.dispatch(record.id);
            created.push(record);
        }
        Ok(created)
    }

    /// Current status and progress of one upload.
    pub async fn status(&self, id: Uuid, tenant_id: &str) -> LifecycleResult<UploadStatusView> {
        let record = self.store.get(id, tenant_id).await?;
        Ok(UploadStatusView::from(&record))
    }

    /// Analysis results produced for one upload so far.
    pub async fn results(
        &self,
        id: Uuid,
        tenant_id: &str,
    ) -> LifecycleResult<Vec<ProcessingResult>> {
        self.store.results(id, tenant_id).await
    }

    /// A tenant's uploads, created_at-ascending, with optional status
    /// filter and pagination.
    pub async fn list(&self, tenant_id: &str, mut query: UploadListQuery) -> Vec<UploadRecord> {
        if query.limit.is_none() {
            query.limit = Some(self.config.list_default_limit);
        }
        self.store.list(tenant_id, &query).await
    }

    /// Re-dispatch an upload that is still Pending (e.g. after an engine
    /// restart). In-flight or terminal uploads are left alone.
    pub async fn trigger_processing(&self, id: Uuid, tenant_id: &str) -> LifecycleResult<()> {
        let record = self.store.get(id, tenant_id).await?;
        if record.status == UploadStatus::Pending {
            self.engine.dispatch(id);
        }
        Ok(())
    }

    /// Cancel an in-flight upload and delete its record and results.
    ///
    /// Removal is the cancellation signal: the processing task re-fetches
    /// before each mutation, observes the record is gone, and stops without
    /// writing anything further.
    #[tracing::instrument(skip(self), fields(tenant.id = %tenant_id))]
    pub async fn cancel_or_delete(&self, id: Uuid, tenant_id: &str) -> LifecycleResult<()> {
        self.store.remove(id, tenant_id).await?;
        tracing::info!(upload_id = %id, "Upload cancelled and removed");
        Ok(())
    }

    /// Dashboard statistics for one tenant.
    pub async fn summary(&self, tenant_id: &str) -> TenantSummary {
        self.aggregator.summarize(tenant_id).await
    }
}
