use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use chatlens_core::models::{ChatMessage, ProcessingResult, UploadListQuery, UploadRecord};
use chatlens_core::{LifecycleError, LifecycleResult};

const DEFAULT_SHARD_COUNT: usize = 16;
const DEFAULT_LIST_LIMIT: usize = 100;

/// One shard of the store: every map is keyed by upload id, plus a tenant
/// index for list scans. All entries for a given upload live in the same
/// shard, so a single shard lock covers any per-id operation atomically.
#[derive(Default)]
struct Shard {
    uploads: HashMap<Uuid, UploadRecord>,
    messages: HashMap<Uuid, Arc<Vec<ChatMessage>>>,
    results: HashMap<Uuid, Vec<ProcessingResult>>,
    by_tenant: HashMap<String, HashSet<Uuid>>,
}

/// Sharded in-memory store for upload records and their results.
///
/// Concurrent operations on the same upload id serialize on that id's shard
/// mutex; operations on different ids land on different shards with high
/// probability and proceed independently. `list` visits shards one at a
/// time without a global lock, so it observes an eventually-consistent
/// snapshot while uploads are in flight.
#[derive(Clone)]
pub struct RecordStore {
    shards: Vec<Arc<Mutex<Shard>>>,
    shard_count: usize,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARD_COUNT)
    }

    /// Create a store with a custom shard count (should be a power of two
    /// for best distribution).
    pub fn with_shards(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        let shards = (0..shard_count)
            .map(|_| Arc::new(Mutex::new(Shard::default())))
            .collect();
        Self {
            shards,
            shard_count,
        }
    }

    fn shard_index(&self, id: Uuid) -> usize {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        id.hash(&mut hasher);
        (hasher.finish() as usize) % self.shard_count
    }

    fn shard(&self, id: Uuid) -> &Arc<Mutex<Shard>> {
        &self.shards[self.shard_index(id)]
    }

    /// Insert a freshly created record together with its decoded transcript.
    #[tracing::instrument(skip(self, record, messages), fields(upload_id = %record.id))]
    pub async fn insert(
        &self,
        record: UploadRecord,
        messages: Vec<ChatMessage>,
    ) -> LifecycleResult<()> {
        let mut shard = self.shard(record.id).lock().await;
        if shard.uploads.contains_key(&record.id) {
            return Err(LifecycleError::DuplicateId(record.id));
        }
        shard
            .by_tenant
            .entry(record.tenant_id.clone())
            .or_default()
            .insert(record.id);
        shard.messages.insert(record.id, Arc::new(messages));
        shard.results.insert(record.id, Vec::new());
        shard.uploads.insert(record.id, record);
        Ok(())
    }

    /// Fetch a record, tenant-scoped. A tenant mismatch is reported as
    /// NotFound so cross-tenant existence never leaks.
    pub async fn get(&self, id: Uuid, tenant_id: &str) -> LifecycleResult<UploadRecord> {
        let shard = self.shard(id).lock().await;
        shard
            .uploads
            .get(&id)
            .filter(|record| record.tenant_id == tenant_id)
            .cloned()
            .ok_or(LifecycleError::NotFound)
    }

    /// Atomically apply a transition to the stored record. The mutator runs
    /// under the shard lock, so concurrent updates to the same id serialize;
    /// state-machine violations surface as `InvalidTransition` and leave the
    /// record untouched.
    pub async fn update<F>(&self, id: Uuid, mutator: F) -> LifecycleResult<UploadRecord>
    where
        F: FnOnce(&mut UploadRecord) -> LifecycleResult<()>,
    {
        let mut shard = self.shard(id).lock().await;
        let record = shard.uploads.get_mut(&id).ok_or(LifecycleError::NotFound)?;
        mutator(record)?;
        Ok(record.clone())
    }

    /// Append one analysis result to an existing upload.
    pub async fn append_result(&self, result: ProcessingResult) -> LifecycleResult<()> {
        let mut shard = self.shard(result.upload_id).lock().await;
        let entries = shard
            .results
            .get_mut(&result.upload_id)
            .ok_or(LifecycleError::NotFound)?;
        entries.push(result);
        Ok(())
    }

    /// Fetch an upload's results, tenant-scoped.
    pub async fn results(&self, id: Uuid, tenant_id: &str) -> LifecycleResult<Vec<ProcessingResult>> {
        let shard = self.shard(id).lock().await;
        let owned = shard
            .uploads
            .get(&id)
            .map(|record| record.tenant_id == tenant_id)
            .unwrap_or(false);
        if !owned {
            return Err(LifecycleError::NotFound);
        }
        Ok(shard.results.get(&id).cloned().unwrap_or_default())
    }

    /// Fetch the decoded transcript for an upload. Engine-side lookup keyed
    /// by id only; the engine holds ids it created itself.
    pub async fn messages(&self, id: Uuid) -> LifecycleResult<Arc<Vec<ChatMessage>>> {
        let shard = self.shard(id).lock().await;
        shard
            .messages
            .get(&id)
            .cloned()
            .ok_or(LifecycleError::NotFound)
    }

    /// List a tenant's uploads in stable created_at-ascending order, with
    /// optional status filter and skip/limit pagination.
    pub async fn list(&self, tenant_id: &str, query: &UploadListQuery) -> Vec<UploadRecord> {
        let mut matches: Vec<UploadRecord> = Vec::new();
        for shard in &self.shards {
            let shard = shard.lock().await;
            if let Some(ids) = shard.by_tenant.get(tenant_id) {
                for id in ids {
                    if let Some(record) = shard.uploads.get(id) {
                        if query.status.map_or(true, |s| record.status == s) {
                            matches.push(record.clone());
                        }
                    }
                }
            }
        }
        // Ties on created_at are broken by id so pagination stays stable.
        matches.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        let skip = query.skip.unwrap_or(0);
        let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
        matches.into_iter().skip(skip).take(limit).collect()
    }

    /// Remove a record and cascade to its transcript and results.
    /// Tenant-scoped; missing-or-foreign ids report NotFound.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: Uuid, tenant_id: &str) -> LifecycleResult<()> {
        let mut shard = self.shard(id).lock().await;
        let owned = shard
            .uploads
            .get(&id)
            .map(|record| record.tenant_id == tenant_id)
            .unwrap_or(false);
        if !owned {
            return Err(LifecycleError::NotFound);
        }
        shard.uploads.remove(&id);
        shard.messages.remove(&id);
        shard.results.remove(&id);
        if let Some(ids) = shard.by_tenant.get_mut(tenant_id) {
            ids.remove(&id);
            if ids.is_empty() {
                shard.by_tenant.remove(tenant_id);
            }
        }
        tracing::debug!(upload_id = %id, "Removed upload and cascaded results");
        Ok(())
    }

    /// Fetch a record without a tenant check. Engine-side only; the engine
    /// operates on ids it created itself, never on caller-supplied ids.
    pub async fn get_unchecked(&self, id: Uuid) -> LifecycleResult<UploadRecord> {
        let shard = self.shard(id).lock().await;
        shard.uploads.get(&id).cloned().ok_or(LifecycleError::NotFound)
    }

    /// Whether the record still exists, regardless of tenant. Used by the
    /// engine's cooperative cancellation check.
    pub async fn exists(&self, id: Uuid) -> bool {
        self.shard(id).lock().await.uploads.contains_key(&id)
    }
}
