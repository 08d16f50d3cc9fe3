//! Inventory module.
//!
//! Stock-quantity editing for the "manage stock" flow: clamped quantity
//! arithmetic and the per-session working set of proposed quantities.
//! Deterministic domain logic only (no IO, no storage).

pub mod quantity;
pub mod working_set;

pub use quantity::{clamp_absolute, clamp_adjust};
pub use working_set::{StockLine, StockWorkingSet};
