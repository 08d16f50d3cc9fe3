//! Batch apply executor with bounded concurrency and per-write timeouts.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use stockwise_core::ProductId;
use stockwise_products::ProductPatch;
use stockwise_reconcile::{ApplyError, ApplyOutcome, ApplyReport, PreviewItem, Proposal};

use crate::config::ApplyConfig;
use crate::product_store::ProductStore;

/// Applies approved preview items to a product store.
///
/// The only component that writes to the store. Each item is patched on its
/// own; there is no cross-item transaction and no early abort.
#[derive(Debug)]
pub struct BatchApplier<S> {
    store: Arc<S>,
    config: ApplyConfig,
}

impl<S> Clone for BatchApplier<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: ProductStore + 'static> BatchApplier<S> {
    pub fn new(store: Arc<S>, config: ApplyConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ApplyConfig {
        &self.config
    }

    /// Write every changed item and report per-item outcomes.
    ///
    /// Items with `has_changes() == false` are skipped, so passing a whole
    /// preview or a pre-filtered subset gives the same result. Never fails:
    /// errors end up in the report.
    pub async fn apply<T: Proposal>(&self, items: &[PreviewItem<T>]) -> ApplyReport {
        let writes: Vec<(ProductId, ProductPatch)> = items
            .iter()
            .filter(|i| i.has_changes())
            .map(|i| (i.entity_id(), i.proposed().to_patch()))
            .collect();

        if writes.is_empty() {
            debug!(items = items.len(), "nothing to apply");
            return ApplyReport::empty();
        }

        let started_at = Utc::now();
        info!(
            writes = writes.len(),
            skipped = items.len() - writes.len(),
            max_concurrent = self.config.max_concurrent,
            "applying batch"
        );

        let ids: Vec<ProductId> = writes.iter().map(|(id, _)| *id).collect();
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent.max(1)));
        let mut tasks = JoinSet::new();

        for (index, (id, patch)) in writes.into_iter().enumerate() {
            let store = Arc::clone(&self.store);
            let semaphore = Arc::clone(&semaphore);
            let write_timeout = self.config.write_timeout;

            tasks.spawn(async move {
                // The semaphore is never closed, so acquire only fails if it were.
                let _permit = semaphore.acquire_owned().await.ok();
                let result = write_one(store.as_ref(), id, patch, write_timeout).await;
                (index, result)
            });
        }

        let mut slots: Vec<Option<ApplyOutcome>> = vec![None; ids.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, result) = match joined {
                Ok(done) => done,
                Err(e) => {
                    error!(error = %e, "write task did not complete");
                    continue;
                }
            };
            let id = ids[index];
            slots[index] = Some(match result {
                Ok(()) => {
                    debug!(product_id = %id, "write applied");
                    ApplyOutcome::succeeded(id)
                }
                Err(e) => {
                    warn!(product_id = %id, error = %e, "write failed");
                    ApplyOutcome::failed(id, &e)
                }
            });
        }

        // A task that panicked leaves its slot empty; it still counts as a failure.
        let outcomes: Vec<ApplyOutcome> = slots
            .into_iter()
            .zip(&ids)
            .map(|(slot, id)| {
                slot.unwrap_or_else(|| {
                    ApplyOutcome::failed(
                        *id,
                        &ApplyError::WriteFailed("write task aborted".to_string()),
                    )
                })
            })
            .collect();

        let report = ApplyReport::from_outcomes(outcomes, started_at, Utc::now());
        info!(
            success_count = report.success_count,
            error_count = report.error_count,
            "batch applied"
        );
        report
    }
}

async fn write_one<S: ProductStore + ?Sized>(
    store: &S,
    id: ProductId,
    patch: ProductPatch,
    write_timeout: Duration,
) -> Result<(), ApplyError> {
    match tokio::time::timeout(write_timeout, store.patch_by_id(id, patch)).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(e.into()),
        Err(_) => Err(ApplyError::Timeout(write_timeout)),
    }
}
