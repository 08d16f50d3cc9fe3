//! Apply outcomes and the aggregated report.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use stockwise_core::ProductId;

/// Why a single product's write failed.
///
/// Recorded in the report; never aborts the rest of the batch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplyError {
    /// The product disappeared between preview and apply.
    #[error("product {0} no longer exists")]
    NotFound(ProductId),

    /// The product store rejected the patch.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// The write did not finish within its deadline.
    #[error("write timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

/// Result of one attempted write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    pub entity_id: ProductId,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApplyOutcome {
    pub fn succeeded(entity_id: ProductId) -> Self {
        Self {
            entity_id,
            success: true,
            error: None,
        }
    }

    pub fn failed(entity_id: ProductId, error: &ApplyError) -> Self {
        Self {
            entity_id,
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// Aggregated result of a batch apply.
///
/// All-success and all-failure are both normal results; callers read the counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub success_count: usize,
    pub error_count: usize,
    pub outcomes: Vec<ApplyOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ApplyReport {
    pub fn from_outcomes(
        outcomes: Vec<ApplyOutcome>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let success_count = outcomes.iter().filter(|o| o.success).count();
        Self {
            success_count,
            error_count: outcomes.len() - success_count,
            outcomes,
            started_at,
            finished_at,
        }
    }

    /// Report for a batch with nothing to write.
    pub fn empty() -> Self {
        let now = Utc::now();
        Self::from_outcomes(Vec::new(), now, now)
    }

    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.error_count == 0
    }

    /// Failed outcomes, for listing and retry.
    pub fn failures(&self) -> impl Iterator<Item = &ApplyOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }
}
