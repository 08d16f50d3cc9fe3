//! Products module.
//!
//! Snapshot types for products read from (and patched into) the external
//! product store. Pure data and deterministic logic only (no IO, no storage).

pub mod product;
pub mod tags;

pub use product::{Product, ProductPatch};
pub use tags::TagSet;
