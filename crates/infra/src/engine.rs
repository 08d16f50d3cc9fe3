//! Reconciliation engine: the three operations the admin layer calls.
//!
//! - `classify`: single-title classification ("classify as I type")
//! - `generate_*_preview`: read products, compute proposals, diff
//! - `apply_changes`: write the approved changed subset, report per item
//!
//! The engine holds no batch state between calls. Preview batches and stock
//! sessions are values owned by the caller.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use stockwise_classifier::{ClassificationResult, Classifier};
use stockwise_core::ProductId;
use stockwise_inventory::StockWorkingSet;
use stockwise_products::{Product, TagSet};
use stockwise_reconcile::{
    preview_classification, preview_stock, ApplyReport, ClassificationState, PreviewBatch,
    PreviewItem, Proposal, StockLevel,
};

use crate::apply::BatchApplier;
use crate::config::ApplyConfig;
use crate::product_store::{ProductStore, StoreError};

pub struct ReconcileEngine<S> {
    store: Arc<S>,
    classifier: Classifier,
    applier: BatchApplier<S>,
}

impl<S: ProductStore + 'static> ReconcileEngine<S> {
    /// Engine with the built-in rule table and default apply settings.
    pub fn new(store: Arc<S>) -> Self {
        let applier = BatchApplier::new(Arc::clone(&store), ApplyConfig::default());
        Self {
            store,
            classifier: Classifier::default(),
            applier,
        }
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_apply_config(mut self, config: ApplyConfig) -> Self {
        self.applier = BatchApplier::new(Arc::clone(&self.store), config);
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn classify(&self, title: &str, existing_tags: &TagSet) -> ClassificationResult {
        self.classifier.classify(title, existing_tags)
    }

    /// Auto-organize preview for all products, or only `ids`.
    pub async fn generate_classification_preview(
        &self,
        ids: Option<&[ProductId]>,
    ) -> Result<PreviewBatch<ClassificationState>, StoreError> {
        let products = self.load(ids).await?;
        let batch = preview_classification(&self.classifier, &products);
        info!(
            batch_id = %batch.id(),
            items = batch.len(),
            changes = batch.change_count(),
            "classification preview generated"
        );
        Ok(batch)
    }

    /// Start a manage-stock session seeded with current quantities.
    pub async fn open_stock_session(
        &self,
        ids: Option<&[ProductId]>,
    ) -> Result<StockWorkingSet, StoreError> {
        let products = self.load(ids).await?;
        Ok(StockWorkingSet::from_products(&products))
    }

    /// Diff a session's proposed quantities against what the store holds now.
    pub async fn generate_stock_preview(
        &self,
        session: &StockWorkingSet,
    ) -> Result<PreviewBatch<StockLevel>, StoreError> {
        let ids: Vec<ProductId> = session.lines().map(|l| l.product_id).collect();
        let products = self.load(Some(ids.as_slice())).await?;
        let batch = preview_stock(session, &products);
        info!(
            batch_id = %batch.id(),
            items = batch.len(),
            changes = batch.change_count(),
            "stock preview generated"
        );
        Ok(batch)
    }

    /// Apply approved items. Unchanged items are skipped; never fails as a whole.
    pub async fn apply_changes<T: Proposal>(&self, items: &[PreviewItem<T>]) -> ApplyReport {
        self.applier.apply(items).await
    }

    // Explicit ids that no longer exist are skipped, other read errors abort.
    // Repeated ids are read once, in first-seen order.
    async fn load(&self, ids: Option<&[ProductId]>) -> Result<Vec<Product>, StoreError> {
        let Some(ids) = ids else {
            return self.store.get_all().await;
        };

        let mut seen = HashSet::with_capacity(ids.len());
        let mut products = Vec::with_capacity(ids.len());
        for &id in ids {
            if !seen.insert(id) {
                continue;
            }
            match self.store.get_by_id(id).await {
                Ok(product) => products.push(product),
                Err(StoreError::NotFound(_)) => {
                    warn!(product_id = %id, "product not found, skipped from preview");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(products)
    }
}
