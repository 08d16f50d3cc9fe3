//! Proposed-state types and their change comparators.

use serde::{Deserialize, Serialize};

use stockwise_classifier::{ClassificationResult, OTHER};
use stockwise_core::ValueObject;
use stockwise_products::{Product, ProductPatch, TagSet};

/// A state that can be compared against the current one and written back.
pub trait Proposal: ValueObject + Send + Sync + 'static {
    /// Whether writing `self` over `current` would change the product.
    fn differs_from(&self, current: &Self) -> bool;

    /// The exact fields to patch for this proposal.
    fn to_patch(&self) -> ProductPatch;
}

/// Product type + tags, as read from a product or suggested by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationState {
    pub product_type: Option<String>,
    pub tags: TagSet,
}

impl ClassificationState {
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_type: product.product_type().map(str::to_string),
            tags: product.tags().clone(),
        }
    }

    /// Tags `self` would add on top of `current`.
    pub fn added_tags(&self, current: &ClassificationState) -> TagSet {
        self.tags.difference(&current.tags)
    }

    // An unset type reads as OTHER.
    fn effective_type(&self) -> &str {
        self.product_type.as_deref().unwrap_or(OTHER)
    }
}

impl From<ClassificationResult> for ClassificationState {
    fn from(value: ClassificationResult) -> Self {
        Self {
            product_type: Some(value.product_type),
            tags: value.tags,
        }
    }
}

impl ValueObject for ClassificationState {}

impl Proposal for ClassificationState {
    /// Type changed, or at least one tag would be added. Tags are never
    /// removed by classification, so a subset check is enough.
    fn differs_from(&self, current: &Self) -> bool {
        self.effective_type() != current.effective_type() || !self.tags.is_subset(&current.tags)
    }

    /// Tags are merged into whatever the store holds at write time, so tags
    /// added after the preview was generated are kept.
    fn to_patch(&self) -> ProductPatch {
        let patch = ProductPatch::new().add_tags(self.tags.clone());
        match &self.product_type {
            Some(product_type) => patch.product_type(product_type.clone()),
            None => patch,
        }
    }
}

/// Inventory quantity for the manage-stock flow.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub quantity: u64,
}

impl StockLevel {
    pub fn new(quantity: u64) -> Self {
        Self { quantity }
    }

    /// Signed change from `current` to `self`.
    pub fn delta_from(&self, current: &StockLevel) -> i128 {
        i128::from(self.quantity) - i128::from(current.quantity)
    }
}

impl ValueObject for StockLevel {}

impl Proposal for StockLevel {
    fn differs_from(&self, current: &Self) -> bool {
        self.quantity != current.quantity
    }

    fn to_patch(&self) -> ProductPatch {
        ProductPatch::new().inventory_quantity(self.quantity)
    }
}
