//! Concurrency gate
//!
//! Caps the number of operations in flight against one upstream. Callers
//! beyond the cap wait in strict arrival order; a released slot is handed to
//! the longest-waiting caller before any newcomer can take it, so the number
//! of outstanding permits never exceeds the capacity.
//!
//! The gate is a cheap handle: clone it to share one limit between callers.
//!
//! ```ignore
//! use tbr_infrastructure::concurrency::ConcurrencyGate;
//!
//! let reddit = ConcurrencyGate::new("reddit", 2)?;
//! let posts = reddit.run(|| fetch_subreddit("travelphotography")).await?;
//! ```

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tbr_domain::error::{Error, Result};
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};
use tracing::{debug, trace};

struct GateInner {
    name: String,
    capacity: usize,
    semaphore: Arc<Semaphore>,
    waiting: AtomicUsize,
}

/// Bounded-concurrency limiter with FIFO admission
#[derive(Clone)]
pub struct ConcurrencyGate {
    inner: Arc<GateInner>,
}

impl ConcurrencyGate {
    /// Create a gate admitting at most `capacity` concurrent holders
    pub fn new<S: Into<String>>(name: S, capacity: usize) -> Result<Self> {
        let name = name.into();
        if capacity == 0 {
            return Err(Error::invalid_argument(format!(
                "Gate '{name}' needs a capacity of at least 1"
            )));
        }

        Ok(Self {
            inner: Arc::new(GateInner {
                name,
                capacity,
                // tokio's semaphore queues waiters FIFO and hands released
                // permits straight to the queue head
                semaphore: Arc::new(Semaphore::new(capacity)),
                waiting: AtomicUsize::new(0),
            }),
        })
    }

    /// Gate name used in logs
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Maximum number of concurrent holders
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Slots currently held
    pub fn active(&self) -> usize {
        self.inner.capacity - self.inner.semaphore.available_permits().min(self.inner.capacity)
    }

    /// Callers currently suspended in `acquire`
    pub fn waiting(&self) -> usize {
        self.inner.waiting.load(Ordering::SeqCst)
    }

    /// Whether the gate has been closed
    pub fn is_closed(&self) -> bool {
        self.inner.semaphore.is_closed()
    }

    /// Take a slot if one is free right now
    ///
    /// Returns `None` when the gate is saturated (or closed). Never jumps
    /// ahead of queued waiters.
    pub fn try_acquire(&self) -> Option<GatePermit> {
        match Arc::clone(&self.inner.semaphore).try_acquire_owned() {
            Ok(permit) => Some(self.permit(permit)),
            Err(TryAcquireError::NoPermits | TryAcquireError::Closed) => None,
        }
    }

    /// Wait for a slot
    ///
    /// Resolves immediately while fewer than `capacity` slots are held,
    /// otherwise suspends until a release hands a slot over. Dropping the
    /// returned future while it waits removes the caller from the queue.
    /// Fails only once the gate is closed.
    pub async fn acquire(&self) -> Result<GatePermit> {
        if let Some(permit) = self.try_acquire() {
            return Ok(permit);
        }

        let _waiting = WaitingGuard::enter(&self.inner.waiting);
        debug!(
            gate = %self.inner.name,
            waiting = self.waiting(),
            capacity = self.inner.capacity,
            "Gate saturated, queuing caller"
        );

        let permit = Arc::clone(&self.inner.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| Error::internal(format!("Gate '{}' is closed", self.inner.name)))?;
        Ok(self.permit(permit))
    }

    /// Run `op` while holding a slot
    ///
    /// The slot is given back on every exit path (success, error, panic or
    /// cancellation of the returned future) before the outcome reaches the
    /// caller. Errors from `op` pass through unchanged; nothing is retried.
    pub async fn run<F, Fut, T>(&self, op: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let permit = self.acquire().await?;
        let outcome = op().await;
        permit.release();
        outcome
    }

    /// Stop admitting callers; queued and future `acquire` calls fail
    ///
    /// Slots already held stay valid until released.
    pub fn close(&self) {
        debug!(gate = %self.inner.name, "Closing gate");
        self.inner.semaphore.close();
    }

    fn permit(&self, permit: OwnedSemaphorePermit) -> GatePermit {
        trace!(gate = %self.inner.name, active = self.active(), "Slot acquired");
        GatePermit {
            gate: self.clone(),
            _permit: permit,
        }
    }
}

impl std::fmt::Debug for ConcurrencyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcurrencyGate")
            .field("name", &self.inner.name)
            .field("capacity", &self.inner.capacity)
            .field("active", &self.active())
            .field("waiting", &self.waiting())
            .finish()
    }
}

/// A held gate slot; dropping it releases the slot
#[must_use = "the slot is released as soon as the permit is dropped"]
pub struct GatePermit {
    gate: ConcurrencyGate,
    _permit: OwnedSemaphorePermit,
}

impl GatePermit {
    /// Give the slot back explicitly
    pub fn release(self) {
        drop(self);
    }

    /// Gate this permit belongs to
    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        trace!(gate = %self.gate.name(), "Slot released");
    }
}

impl std::fmt::Debug for GatePermit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatePermit")
            .field("gate", &self.gate.name())
            .finish()
    }
}

/// Counts a caller as waiting until it gets a slot or is cancelled
struct WaitingGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> WaitingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for WaitingGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
