use std::collections::HashMap;
use std::sync::RwLock;

use stockwise_core::ProductId;
use stockwise_products::{Product, ProductPatch};

use super::r#trait::{ProductStore, StoreError};

/// In-memory product store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let inner = products.into_iter().map(|p| (p.id_typed(), p)).collect();
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Insert or replace a product.
    pub fn upsert(&self, product: Product) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(product.id_typed(), product);
        Ok(())
    }

    pub fn remove(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        Ok(map.remove(&id))
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("product store lock poisoned".to_string())
}

#[async_trait::async_trait]
impl ProductStore for InMemoryProductStore {
    /// Ordered by product id.
    async fn get_all(&self) -> Result<Vec<Product>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        let mut products: Vec<Product> = map.values().cloned().collect();
        products.sort_by_key(Product::id_typed);
        Ok(products)
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        map.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn patch_by_id(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let product = map.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        product.apply_patch(&patch);
        Ok(product.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(qty: u64) -> Product {
        Product::new(ProductId::new(), "Honey Beeswax Candle").with_inventory_quantity(qty)
    }

    #[tokio::test]
    async fn get_by_id_returns_snapshot() {
        let product = candle(4);
        let store = InMemoryProductStore::with_products([product.clone()]);
        assert_eq!(store.get_by_id(product.id_typed()).await.unwrap(), product);
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let store = InMemoryProductStore::new();
        let id = ProductId::new();
        assert_eq!(store.get_by_id(id).await.unwrap_err(), StoreError::NotFound(id));
        assert_eq!(
            store.patch_by_id(id, ProductPatch::new()).await.unwrap_err(),
            StoreError::NotFound(id)
        );
    }

    #[tokio::test]
    async fn patch_updates_only_given_fields() {
        let product = candle(4).with_product_type("CANDLE");
        let store = InMemoryProductStore::with_products([product.clone()]);

        let updated = store
            .patch_by_id(product.id_typed(), ProductPatch::new().inventory_quantity(9))
            .await
            .unwrap();
        assert_eq!(updated.inventory_quantity(), 9);
        assert_eq!(updated.product_type(), Some("CANDLE"));
        assert_eq!(store.get_by_id(product.id_typed()).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn get_all_is_ordered_by_id() {
        let products: Vec<Product> = (0..5).map(candle).collect();
        let store = InMemoryProductStore::with_products(products.clone().into_iter().rev());

        let mut expected = products;
        expected.sort_by_key(Product::id_typed);
        assert_eq!(store.get_all().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn removed_product_vanishes() {
        let product = candle(1);
        let store = InMemoryProductStore::with_products([product.clone()]);
        store.remove(product.id_typed()).unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }
}
