use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;

/// Bounds the number of concurrently executing fetch tasks system-wide.
///
/// Callers beyond the limit wait in arrival order; the underlying tokio
/// semaphore is fair, so queued callers are admitted one-for-one as running
/// tasks complete. Queued tasks are never cancelled or reordered.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
}

impl ConcurrencyLimiter {
    /// Create a limiter admitting at most `max_parallel` tasks at once
    pub fn new(max_parallel: usize) -> Self {
        Self { semaphore: Arc::new(Semaphore::new(max_parallel.max(1))) }
    }

    /// Run `task` once a slot is free, holding the slot until it completes
    pub async fn run<F, T>(&self, task: F) -> T
    where
        F: Future<Output = T>,
    {
        // The semaphore is never closed, so acquire cannot fail.
        let _permit = self.semaphore.acquire().await.expect("limiter semaphore closed");
        task.await
    }

    /// Number of currently free slots
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
