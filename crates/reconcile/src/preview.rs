//! Preview batches: the transient review area between diff and apply.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockwise_classifier::Classifier;
use stockwise_core::{BatchId, ProductId};
use stockwise_inventory::StockWorkingSet;
use stockwise_products::Product;

use crate::diff::{diff, PreviewItem};
use crate::proposal::{ClassificationState, Proposal, StockLevel};

/// One preview request's worth of diffs.
///
/// Includes unchanged items (informational). Never persisted; dropping the
/// batch (or [`PreviewBatch::discard`]) cancels with no side effects.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewBatch<T> {
    id: BatchId,
    generated_at: DateTime<Utc>,
    items: Vec<PreviewItem<T>>,
}

impl<T: Proposal> PreviewBatch<T> {
    pub fn new(items: Vec<PreviewItem<T>>) -> Self {
        Self {
            id: BatchId::new(),
            generated_at: Utc::now(),
            items,
        }
    }

    pub fn id(&self) -> BatchId {
        self.id
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn items(&self) -> &[PreviewItem<T>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn changed(&self) -> impl Iterator<Item = &PreviewItem<T>> {
        self.items.iter().filter(|i| i.has_changes())
    }

    pub fn change_count(&self) -> usize {
        self.changed().count()
    }

    /// Operator approved everything: all changed items.
    pub fn approve_all(&self) -> Vec<PreviewItem<T>> {
        self.changed().cloned().collect()
    }

    /// Operator approved a subset. Unchanged or unknown ids are ignored.
    pub fn select(&self, ids: &[ProductId]) -> Vec<PreviewItem<T>> {
        self.changed()
            .filter(|i| ids.contains(&i.entity_id()))
            .cloned()
            .collect()
    }

    /// Cancel the review. Consumes the batch; nothing is written.
    pub fn discard(self) {}
}

/// Classify every product and diff the suggestion against its current state.
pub fn preview_classification<'a>(
    classifier: &Classifier,
    products: impl IntoIterator<Item = &'a Product>,
) -> PreviewBatch<ClassificationState> {
    let items = products
        .into_iter()
        .map(|product| {
            let current = ClassificationState::from_product(product);
            let proposed = classifier.classify(product.title(), product.tags()).into();
            diff(product.id_typed(), product.title(), current, proposed)
        })
        .collect();
    PreviewBatch::new(items)
}

/// Diff a stock session's proposed quantities against fresh product snapshots.
///
/// Products not tracked by `working_set` are skipped; items follow `products` order.
pub fn preview_stock<'a>(
    working_set: &StockWorkingSet,
    products: impl IntoIterator<Item = &'a Product>,
) -> PreviewBatch<StockLevel> {
    let items = products
        .into_iter()
        .filter_map(|product| {
            let proposed = working_set.proposed(product.id_typed())?;
            Some(diff(
                product.id_typed(),
                product.title(),
                StockLevel::new(product.inventory_quantity()),
                StockLevel::new(proposed),
            ))
        })
        .collect();
    PreviewBatch::new(items)
}
