//! Infrastructure layer: product store adapters, batch apply, config.

pub mod apply;
pub mod config;
pub mod engine;
pub mod product_store;

pub use apply::BatchApplier;
pub use config::ApplyConfig;
pub use engine::ReconcileEngine;
pub use product_store::{FaultInjectingStore, InMemoryProductStore, ProductStore, StoreError};
