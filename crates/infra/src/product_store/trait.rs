use std::sync::Arc;

use thiserror::Error;

use stockwise_core::ProductId;
use stockwise_products::{Product, ProductPatch};
use stockwise_reconcile::ApplyError;

/// Product store operation error.
///
/// These are **infrastructure errors** (missing records, rejected writes,
/// unavailable backend) as opposed to domain errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("product not found: {0}")]
    NotFound(ProductId),

    #[error("write rejected: {0}")]
    Rejected(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for ApplyError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => ApplyError::NotFound(id),
            other => ApplyError::WriteFailed(other.to_string()),
        }
    }
}

/// Persistent product storage, keyed by product id.
///
/// Writes for different ids are independent: implementations must not require
/// callers to serialize patches across products.
#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product in the store.
    async fn get_all(&self) -> Result<Vec<Product>, StoreError>;

    /// A single product, or `StoreError::NotFound`.
    async fn get_by_id(&self, id: ProductId) -> Result<Product, StoreError>;

    /// Overwrite the fields present in `patch` and return the updated product.
    async fn patch_by_id(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError>;
}

#[async_trait::async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn get_all(&self) -> Result<Vec<Product>, StoreError> {
        (**self).get_all().await
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, StoreError> {
        (**self).get_by_id(id).await
    }

    async fn patch_by_id(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        (**self).patch_by_id(id, patch).await
    }
}
