//! Session-scoped working set of proposed stock quantities.

use std::collections::BTreeMap;

use serde::Serialize;

use stockwise_core::{DomainError, DomainResult, ProductId};
use stockwise_products::Product;

use crate::quantity::{clamp_absolute, clamp_adjust};

/// One product's line in the working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockLine {
    pub product_id: ProductId,
    pub title: String,
    /// Quantity the product had when it was added to the session.
    pub current: u64,
    /// Quantity the operator wants after apply.
    pub proposed: u64,
}

impl StockLine {
    pub fn is_dirty(&self) -> bool {
        self.proposed != self.current
    }
}

/// Proposed quantities for one stock-editing session.
///
/// Nothing here touches the product store: edits stay in memory until the
/// caller turns the set into a preview and applies it. Dropping the set (or
/// calling [`StockWorkingSet::discard`]) cancels the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockWorkingSet {
    lines: BTreeMap<ProductId, StockLine>,
}

impl StockWorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut set = Self::new();
        for product in products {
            set.track(product);
        }
        set
    }

    /// Add (or re-seed) a product, with its proposed quantity equal to its current one.
    pub fn track(&mut self, product: &Product) {
        let quantity = product.inventory_quantity();
        self.lines.insert(
            product.id_typed(),
            StockLine {
                product_id: product.id_typed(),
                title: product.title().to_string(),
                current: quantity,
                proposed: quantity,
            },
        );
    }

    /// Add a signed delta to the working quantity, clamping at zero.
    pub fn adjust(&mut self, id: ProductId, delta: i64) -> DomainResult<u64> {
        let line = self.line_mut(id)?;
        line.proposed = clamp_adjust(line.proposed, delta);
        Ok(line.proposed)
    }

    pub fn increment(&mut self, id: ProductId, by: u64) -> DomainResult<u64> {
        let line = self.line_mut(id)?;
        line.proposed = line.proposed.saturating_add(by);
        Ok(line.proposed)
    }

    pub fn decrement(&mut self, id: ProductId, by: u64) -> DomainResult<u64> {
        let line = self.line_mut(id)?;
        line.proposed = line.proposed.saturating_sub(by);
        Ok(line.proposed)
    }

    /// Replace the working quantity with an operator-entered value (clamped at zero).
    pub fn set_absolute(&mut self, id: ProductId, value: i64) -> DomainResult<u64> {
        let line = self.line_mut(id)?;
        line.proposed = clamp_absolute(value);
        Ok(line.proposed)
    }

    /// Drop any edit for `id`, back to the quantity the session started with.
    pub fn reset(&mut self, id: ProductId) -> DomainResult<()> {
        let line = self.line_mut(id)?;
        line.proposed = line.current;
        Ok(())
    }

    pub fn proposed(&self, id: ProductId) -> Option<u64> {
        self.lines.get(&id).map(|l| l.proposed)
    }

    pub fn line(&self, id: ProductId) -> Option<&StockLine> {
        self.lines.get(&id)
    }

    /// Lines ordered by product id.
    pub fn lines(&self) -> impl Iterator<Item = &StockLine> {
        self.lines.values()
    }

    pub fn is_dirty(&self) -> bool {
        self.lines.values().any(StockLine::is_dirty)
    }

    pub fn dirty_count(&self) -> usize {
        self.lines.values().filter(|l| l.is_dirty()).count()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cancel the session. Consumes the set; no store is contacted.
    pub fn discard(self) {}

    fn line_mut(&mut self, id: ProductId) -> DomainResult<&mut StockLine> {
        self.lines
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("product {id} is not in this stock session")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str, qty: u64) -> Product {
        Product::new(ProductId::new(), title).with_inventory_quantity(qty)
    }

    #[test]
    fn fresh_set_is_clean() {
        let a = product("Cedar Wick Candle", 4);
        let b = product("Room Spray", 0);
        let set = StockWorkingSet::from_products([&a, &b]);
        assert_eq!(set.len(), 2);
        assert!(!set.is_dirty());
        assert_eq!(set.proposed(a.id_typed()), Some(4));
    }

    #[test]
    fn decrement_clamps_at_computation_time() {
        let a = product("Cedar Wick Candle", 3);
        let mut set = StockWorkingSet::from_products([&a]);

        assert_eq!(set.decrement(a.id_typed(), 8).unwrap(), 0);
        // A later increment starts from the clamped value, not from -5.
        assert_eq!(set.increment(a.id_typed(), 2).unwrap(), 2);
        assert_eq!(set.adjust(a.id_typed(), -10).unwrap(), 0);
    }

    #[test]
    fn set_absolute_clamps_negative_input() {
        let a = product("Tealight Pack", 10);
        let mut set = StockWorkingSet::from_products([&a]);
        assert_eq!(set.set_absolute(a.id_typed(), -7).unwrap(), 0);
        assert!(set.is_dirty());
        assert_eq!(set.dirty_count(), 1);
    }

    #[test]
    fn editing_back_to_current_is_not_dirty() {
        let a = product("Tealight Pack", 10);
        let mut set = StockWorkingSet::from_products([&a]);
        set.increment(a.id_typed(), 5).unwrap();
        set.decrement(a.id_typed(), 5).unwrap();
        assert!(!set.is_dirty());

        set.set_absolute(a.id_typed(), 1).unwrap();
        set.reset(a.id_typed()).unwrap();
        assert_eq!(set.proposed(a.id_typed()), Some(10));
    }

    #[test]
    fn unknown_product_is_not_found() {
        let mut set = StockWorkingSet::new();
        let err = set.adjust(ProductId::new(), 1).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn retracking_reseeds_the_line() {
        let a = product("Gift Set", 2);
        let mut set = StockWorkingSet::from_products([&a]);
        set.increment(a.id_typed(), 3).unwrap();

        let refreshed = a.clone().with_inventory_quantity(9);
        set.track(&refreshed);
        let line = set.line(a.id_typed()).unwrap();
        assert_eq!((line.current, line.proposed), (9, 9));
    }
}
