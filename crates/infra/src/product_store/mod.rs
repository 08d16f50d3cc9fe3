//! Product store boundary.
//!
//! The reconciliation engine only needs three operations from the store that
//! owns products: list all, read by id, and patch fields by id. This module
//! defines that contract plus in-memory adapters for tests/dev.

pub mod fault;
pub mod in_memory;
pub mod r#trait;

pub use fault::FaultInjectingStore;
pub use in_memory::InMemoryProductStore;
pub use r#trait::{ProductStore, StoreError};
