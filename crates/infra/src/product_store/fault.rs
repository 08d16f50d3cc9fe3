//! Fault injection wrapper for exercising partial-failure handling.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use stockwise_core::ProductId;
use stockwise_products::{Product, ProductPatch};

use super::r#trait::{ProductStore, StoreError};

/// Wraps a store and makes writes for chosen products fail or stall.
///
/// Reads pass straight through. Every `patch_by_id` call is counted, whether
/// or not it reaches the inner store.
#[derive(Debug)]
pub struct FaultInjectingStore<S> {
    inner: S,
    failures: Mutex<HashMap<ProductId, String>>,
    delays: Mutex<HashMap<ProductId, Duration>>,
    attempts: Mutex<HashMap<ProductId, usize>>,
}

impl<S> FaultInjectingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            failures: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            attempts: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Reject every write for `id` with `message` until [`Self::heal`] is called.
    pub fn fail_writes_for(&self, id: ProductId, message: impl Into<String>) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.insert(id, message.into());
        }
    }

    /// Sleep for `delay` before forwarding writes for `id`.
    pub fn delay_writes_for(&self, id: ProductId, delay: Duration) {
        if let Ok(mut delays) = self.delays.lock() {
            delays.insert(id, delay);
        }
    }

    /// Remove any injected failure or delay for `id`.
    pub fn heal(&self, id: ProductId) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.remove(&id);
        }
        if let Ok(mut delays) = self.delays.lock() {
            delays.remove(&id);
        }
    }

    pub fn write_attempts(&self, id: ProductId) -> usize {
        self.attempts
            .lock()
            .map(|a| a.get(&id).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn injected_failure(&self, id: ProductId) -> Option<String> {
        self.failures.lock().ok()?.get(&id).cloned()
    }

    fn injected_delay(&self, id: ProductId) -> Option<Duration> {
        self.delays.lock().ok()?.get(&id).copied()
    }

    fn record_attempt(&self, id: ProductId) {
        if let Ok(mut attempts) = self.attempts.lock() {
            *attempts.entry(id).or_insert(0) += 1;
        }
    }
}

#[async_trait::async_trait]
impl<S: ProductStore> ProductStore for FaultInjectingStore<S> {
    async fn get_all(&self) -> Result<Vec<Product>, StoreError> {
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, StoreError> {
        self.inner.get_by_id(id).await
    }

    async fn patch_by_id(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        self.record_attempt(id);

        if let Some(delay) = self.injected_delay(id) {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.injected_failure(id) {
            return Err(StoreError::Rejected(message));
        }
        self.inner.patch_by_id(id, patch).await
    }
}
