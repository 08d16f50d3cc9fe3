//! Preview -> apply reconciliation, pure half.
//!
//! This crate computes what *would* change for a batch of products and holds
//! the operator-facing preview and apply report types. It never talks to the
//! product store; the apply executor lives in `stockwise-infra`.

pub mod diff;
pub mod preview;
pub mod proposal;
pub mod report;

pub use diff::{diff, PreviewItem};
pub use preview::{preview_classification, preview_stock, PreviewBatch};
pub use proposal::{ClassificationState, Proposal, StockLevel};
pub use report::{ApplyError, ApplyOutcome, ApplyReport};
