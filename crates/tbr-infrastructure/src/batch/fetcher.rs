//! Batch fetcher
//!
//! Splits a list of items into contiguous batches of at most `batch_size`.
//! Items of one batch run concurrently on the calling task; the next batch
//! starts only after every item of the current one has settled and the
//! configured delay has elapsed. Results come back in input order, one per
//! item, and a failed item never affects its neighbours.

use crate::cache::CacheAside;
use crate::concurrency::ConcurrencyGate;
use futures::future::join_all;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tbr_domain::error::Result;
use tbr_domain::value_objects::{BatchConfig, BatchOutcome, CacheCategory};
use tracing::{debug, info, warn};

/// Progress hook: `(processed_so_far, total)`
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Paced batch runner
#[derive(Clone)]
pub struct BatchFetcher {
    config: BatchConfig,
    gate: Option<ConcurrencyGate>,
    on_progress: Option<ProgressCallback>,
}

impl BatchFetcher {
    /// Create a fetcher; a zero `batch_size` is rejected
    pub fn new(config: BatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            gate: None,
            on_progress: None,
        })
    }

    /// Run every item's work inside `gate`
    ///
    /// The gate cap holds across batches and across other users of the same
    /// gate, whatever the batch size.
    pub fn with_gate(mut self, gate: ConcurrencyGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Call `callback(processed, total)` after each batch settles
    pub fn on_progress<P>(mut self, callback: P) -> Self
    where
        P: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    /// Batch configuration in use
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Gate applied to each item, if any
    pub fn gate(&self) -> Option<&ConcurrencyGate> {
        self.gate.as_ref()
    }

    /// Run `compute` over `items`
    ///
    /// Returns one result per item in input order. Item errors are collected
    /// in the outcome, never returned from this call.
    pub async fn run<I, R, F, Fut>(
        &self,
        items: impl IntoIterator<Item = I>,
        compute: F,
    ) -> Result<BatchOutcome<R>>
    where
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        let items: Vec<I> = items.into_iter().collect();
        let total = items.len();
        if total == 0 {
            debug!("Batch run with no items");
            return Ok(BatchOutcome::empty());
        }

        let batch_size = self.config.batch_size;
        let batch_count = self.config.batch_count(total);
        let delay = self.config.delay();
        let started = Instant::now();

        info!(
            items = total,
            batches = batch_count,
            batch_size,
            delay_ms = self.config.delay_ms,
            "Starting batch run"
        );

        let mut results = Vec::with_capacity(total);
        let mut pending = items.into_iter();

        for batch_index in 0..batch_count {
            if batch_index > 0 {
                debug!(delay_ms = self.config.delay_ms, "Pausing between batches");
                tokio::time::sleep(delay).await;
            }

            let batch: Vec<_> = pending
                .by_ref()
                .take(batch_size)
                .map(|item| self.execute(&compute, item))
                .collect();
            let batch_len = batch.len();

            let batch_results = join_all(batch).await;
            let failed = batch_results.iter().filter(|r| r.is_err()).count();
            results.extend(batch_results);

            if failed > 0 {
                warn!(
                    batch = batch_index + 1,
                    batches = batch_count,
                    failed,
                    size = batch_len,
                    "Batch completed with failures"
                );
            } else {
                debug!(
                    batch = batch_index + 1,
                    batches = batch_count,
                    size = batch_len,
                    "Batch completed"
                );
            }

            if let Some(callback) = &self.on_progress {
                callback(results.len(), total);
            }
        }

        let outcome = BatchOutcome::new(results, batch_count);
        info!(
            items = total,
            failed = outcome.failure_count(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Batch run finished"
        );
        Ok(outcome)
    }

    /// Run `compute` over `items` behind `cache`
    ///
    /// Each item's key comes from `key_fn`; a live entry is returned without
    /// calling `compute`, and successful computations are written with the
    /// TTL of `category`.
    pub async fn run_cached<I, R, K, F, Fut>(
        &self,
        items: impl IntoIterator<Item = I>,
        cache: &CacheAside,
        category: CacheCategory,
        key_fn: K,
        compute: F,
    ) -> Result<BatchOutcome<R>>
    where
        K: Fn(&I) -> String,
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<R>>,
        R: Serialize + DeserializeOwned + Send + Sync,
    {
        let key_fn = &key_fn;
        let compute = &compute;

        self.run(items, move |item: I| {
            let key = key_fn(&item);
            async move {
                cache
                    .get_or_compute(&key, category, move || compute(item))
                    .await
                    .map(|result| result.value)
            }
        })
        .await
    }

    async fn execute<I, R, F, Fut>(&self, compute: &F, item: I) -> Result<R>
    where
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<R>>,
    {
        match &self.gate {
            Some(gate) => gate.run(move || compute(item)).await,
            None => compute(item).await,
        }
    }
}

impl fmt::Debug for BatchFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchFetcher")
            .field("config", &self.config)
            .field("gate", &self.gate.as_ref().map(ConcurrencyGate::name))
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}
