//! Batch apply: fan out one independent write per changed preview item.
//!
//! ## Design
//!
//! - Only `has_changes` items are written
//! - Bounded concurrency (semaphore), one deadline per write
//! - A failed, missing or timed-out write is recorded and never stops the batch
//! - The report always covers every attempted item, in input order

pub mod executor;

pub use executor::BatchApplier;
