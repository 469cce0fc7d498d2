//! Batch configuration and outcomes

use crate::constants::{DEFAULT_BATCH_DELAY_MS, DEFAULT_BATCH_SIZE};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a list of work items is split and paced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Items run concurrently per batch; must be positive
    pub batch_size: usize,

    /// Pause between two consecutive batches in milliseconds
    pub delay_ms: u64,
}

impl BatchConfig {
    /// Create a batch configuration
    pub fn new(batch_size: usize, delay_ms: u64) -> Self {
        Self {
            batch_size,
            delay_ms,
        }
    }

    /// Inter-batch pause as a `Duration`
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Number of batches needed for `len` items
    pub fn batch_count(&self, len: usize) -> usize {
        if self.batch_size == 0 {
            return 0;
        }
        len.div_ceil(self.batch_size)
    }

    /// Reject configurations that cannot make progress
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::invalid_argument(
                "batch_size must be a positive integer",
            ));
        }
        Ok(())
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, DEFAULT_BATCH_DELAY_MS)
    }
}

/// Per-item results of a batch run, in input order
///
/// A failed item never hides the others: callers get the partial result set
/// plus [`is_partial`](Self::is_partial) as the error indicator.
#[derive(Debug)]
pub struct BatchOutcome<R> {
    results: Vec<Result<R>>,
    batches: usize,
}

impl<R> BatchOutcome<R> {
    /// Assemble an outcome from ordered results
    pub fn new(results: Vec<Result<R>>, batches: usize) -> Self {
        Self { results, batches }
    }

    /// Outcome of an empty input
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    /// Ordered per-item results
    pub fn results(&self) -> &[Result<R>] {
        &self.results
    }

    /// Number of batches that ran
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether there were no items at all
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Successful values paired with their input index
    pub fn successes(&self) -> impl Iterator<Item = (usize, &R)> {
        self.results
            .iter()
            .enumerate()
            .filter_map(|(index, result)| result.as_ref().ok().map(|value| (index, value)))
    }

    /// Failures paired with their input index
    pub fn failures(&self) -> impl Iterator<Item = (usize, &Error)> {
        self.results
            .iter()
            .enumerate()
            .filter_map(|(index, result)| result.as_ref().err().map(|error| (index, error)))
    }

    /// Number of failed items
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|result| result.is_err()).count()
    }

    /// At least one item failed and at least one succeeded
    pub fn is_partial(&self) -> bool {
        let failed = self.failure_count();
        failed > 0 && failed < self.results.len()
    }

    /// Every item failed (false for an empty outcome)
    pub fn is_complete_failure(&self) -> bool {
        !self.results.is_empty() && self.failure_count() == self.results.len()
    }

    /// Take the ordered results
    pub fn into_results(self) -> Vec<Result<R>> {
        self.results
    }
}
