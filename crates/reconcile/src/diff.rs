//! Per-entity diff.

use serde::Serialize;

use stockwise_core::ProductId;

use crate::proposal::Proposal;

/// Current vs proposed state for one product.
///
/// `has_changes` is computed once, in [`diff`]; items are never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewItem<T> {
    entity_id: ProductId,
    title: String,
    current: T,
    proposed: T,
    has_changes: bool,
}

impl<T> PreviewItem<T> {
    pub fn entity_id(&self) -> ProductId {
        self.entity_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn proposed(&self) -> &T {
        &self.proposed
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }
}

/// Compare `proposed` against `current` for one product.
///
/// Pure: no storage access, inputs are taken by value and kept as-is.
pub fn diff<T: Proposal>(
    entity_id: ProductId,
    title: impl Into<String>,
    current: T,
    proposed: T,
) -> PreviewItem<T> {
    let has_changes = proposed.differs_from(&current);
    PreviewItem {
        entity_id,
        title: title.into(),
        current,
        proposed,
        has_changes,
    }
}
