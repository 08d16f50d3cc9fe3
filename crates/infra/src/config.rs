//! Configuration loading and representation.

use std::time::Duration;

use anyhow::Context;

/// Environment variable: maximum concurrent writes during apply.
pub const ENV_MAX_CONCURRENT: &str = "STOCKWISE_APPLY_MAX_CONCURRENT";
/// Environment variable: per-write deadline in milliseconds.
pub const ENV_WRITE_TIMEOUT_MS: &str = "STOCKWISE_APPLY_WRITE_TIMEOUT_MS";

/// Batch apply configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyConfig {
    /// Maximum writes in flight at once (>= 1; 1 means sequential).
    pub max_concurrent: usize,
    /// Deadline for each individual write.
    pub write_timeout: Duration,
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            write_timeout: Duration::from_secs(5),
        }
    }
}

impl ApplyConfig {
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max.max(1);
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Defaults overridden by `STOCKWISE_APPLY_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ApplyConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MAX_CONCURRENT) {
            let max: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_MAX_CONCURRENT} must be a positive integer, got '{raw}'"))?;
            config = config.with_max_concurrent(max);
        }

        if let Some(raw) = lookup(ENV_WRITE_TIMEOUT_MS) {
            let ms: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_WRITE_TIMEOUT_MS} must be milliseconds, got '{raw}'"))?;
            config = config.with_write_timeout(Duration::from_millis(ms));
        }

        Ok(config)
    }
}
