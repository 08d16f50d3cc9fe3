use serde::{Deserialize, Serialize};

use stockwise_core::ProductId;

use crate::tags::TagSet;

/// Product snapshot as held by the external product store.
///
/// The reconciliation engine reads these by value and never keeps references
/// into the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    title: String,
    product_type: Option<String>,
    tags: TagSet,
    inventory_quantity: u64,
}

impl Product {
    pub fn new(id: ProductId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            product_type: None,
            tags: TagSet::new(),
            inventory_quantity: 0,
        }
    }

    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_inventory_quantity(mut self, quantity: u64) -> Self {
        self.inventory_quantity = quantity;
        self
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn product_type(&self) -> Option<&str> {
        self.product_type.as_deref()
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn inventory_quantity(&self) -> u64 {
        self.inventory_quantity
    }

    /// Overwrite exactly the fields present in `patch`, then merge `add_tags`.
    pub fn apply_patch(&mut self, patch: &ProductPatch) {
        if let Some(product_type) = &patch.product_type {
            self.product_type = Some(product_type.clone());
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        if let Some(added) = &patch.add_tags {
            self.tags = self.tags.union(added);
        }
        if let Some(quantity) = patch.inventory_quantity {
            self.inventory_quantity = quantity;
        }
    }
}

/// Partial product update ("patch fields by ID").
///
/// `None` means "leave as is"; there is no way to clear a field.
/// `tags` replaces the stored set, `add_tags` only ever grows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_tags: Option<TagSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_quantity: Option<u64>,
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn tags(mut self, tags: TagSet) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn add_tags(mut self, tags: TagSet) -> Self {
        self.add_tags = Some(tags);
        self
    }

    pub fn inventory_quantity(mut self, quantity: u64) -> Self {
        self.inventory_quantity = Some(quantity);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.product_type.is_none()
            && self.tags.is_none()
            && self.add_tags.is_none()
            && self.inventory_quantity.is_none()
    }

    /// `true` if applying this patch to `product` would not change it.
    pub fn is_noop_for(&self, product: &Product) -> bool {
        let mut patched = product.clone();
        patched.apply_patch(self);
        patched == *product
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle() -> Product {
        Product::new(ProductId::new(), "Vanilla Bean Soy Candle")
            .with_tags(["handmade"].into_iter().collect())
            .with_inventory_quantity(12)
    }

    #[test]
    fn new_product_has_no_type_and_no_stock() {
        let product = Product::new(ProductId::new(), "Reed Diffuser");
        assert_eq!(product.product_type(), None);
        assert!(product.tags().is_empty());
        assert_eq!(product.inventory_quantity(), 0);
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let mut product = candle();
        let patch = ProductPatch::new().product_type("SOY_CANDLE");
        product.apply_patch(&patch);

        assert_eq!(product.product_type(), Some("SOY_CANDLE"));
        assert!(product.tags().contains("handmade"));
        assert_eq!(product.inventory_quantity(), 12);
    }

    #[test]
    fn patch_replaces_tag_set_wholesale() {
        let mut product = candle();
        let tags: TagSet = ["candle", "sweet"].into_iter().collect();
        product.apply_patch(&ProductPatch::new().tags(tags.clone()));
        assert_eq!(product.tags(), &tags);
    }

    #[test]
    fn added_tags_merge_into_existing_set() {
        let mut product = candle();
        let added: TagSet = ["candle", "sweet"].into_iter().collect();
        product.apply_patch(&ProductPatch::new().add_tags(added));

        let expected: TagSet = ["candle", "handmade", "sweet"].into_iter().collect();
        assert_eq!(product.tags(), &expected);
    }

    #[test]
    fn reapplying_added_tags_is_noop() {
        let mut product = candle();
        let patch = ProductPatch::new().add_tags(["sweet"].into_iter().collect());
        product.apply_patch(&patch);
        assert!(patch.is_noop_for(&product));
    }

    #[test]
    fn empty_patch_is_noop() {
        let product = candle();
        let patch = ProductPatch::new();
        assert!(patch.is_empty());
        assert!(patch.is_noop_for(&product));
    }

    #[test]
    fn reapplying_a_patch_is_noop() {
        let mut product = candle();
        let patch = ProductPatch::new().inventory_quantity(3).product_type("CANDLE");
        assert!(!patch.is_noop_for(&product));
        product.apply_patch(&patch);
        assert!(patch.is_noop_for(&product));
    }

    #[test]
    fn empty_patch_fields_are_omitted_from_json() {
        let json = serde_json::to_value(ProductPatch::new().inventory_quantity(4)).unwrap();
        assert_eq!(json, serde_json::json!({ "inventory_quantity": 4 }));
    }
}
