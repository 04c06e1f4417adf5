//! Execution driver: a tick loop dispatching due tasks to handlers.
//!
//! The driver treats the scheduler purely as a queue: it polls, dispatches by
//! kind, and on failure resubmits a derived task with an advanced due time.
//! All retry logic lives here, outside the core.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::{AppResult, Task};
use crate::runtime::api::SchedulerHandle;
use crate::util::clock::now_ms;

/// Business logic for one task kind.
#[async_trait]
pub trait TaskHandler<P>: Send + Sync {
    /// Execute a due task. An `Err` triggers the driver's retry path.
    async fn handle(&self, task: &Task<P>) -> AppResult<()>;
}

/// Kind-keyed handler lookup.
pub struct HandlerRegistry<P> {
    handlers: HashMap<String, Box<dyn TaskHandler<P>>>,
}

impl<P> HandlerRegistry<P> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` for tasks of `kind`, replacing any previous one.
    #[must_use]
    pub fn with_handler(
        mut self,
        kind: impl Into<String>,
        handler: impl TaskHandler<P> + 'static,
    ) -> Self {
        self.handlers.insert(kind.into(), Box::new(handler));
        self
    }

    /// Look up the handler for `kind`.
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&dyn TaskHandler<P>> {
        self.handlers.get(kind).map(Box::as_ref)
    }
}

impl<P> Default for HandlerRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Periodic executor for due tasks.
///
/// Each tick polls the scheduler at the current wall clock and dispatches the
/// released tasks sequentially. Handler failures consume one unit of the
/// task's retry budget and resubmit the task due `backoff_ms` later; tasks
/// without budget, and tasks of unknown kind, are dropped with a log line.
pub struct Driver<P> {
    handle: SchedulerHandle<P>,
    registry: HandlerRegistry<P>,
    tick_interval: Duration,
    backoff_ms: u64,
    shutdown: Arc<AtomicBool>,
}

impl<P: Clone + Send + 'static> Driver<P> {
    /// Assemble a driver from its parts.
    pub fn new(
        handle: SchedulerHandle<P>,
        registry: HandlerRegistry<P>,
        tick_interval: Duration,
        backoff_ms: u64,
    ) -> Self {
        Self {
            handle,
            registry,
            tick_interval,
            backoff_ms,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The scheduler handle this driver polls.
    #[must_use]
    pub const fn handle(&self) -> &SchedulerHandle<P> {
        &self.handle
    }

    /// Request the run loop to stop after the current tick.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    /// Run until [`Driver::shutdown`] is called.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.tick_interval);
        tracing::info!(tick_ms = self.tick_interval.as_millis(), "driver started");
        loop {
            ticker.tick().await;
            if self.shutdown.load(Ordering::Acquire) {
                break;
            }
            self.run_tick(now_ms()).await;
        }
        tracing::info!("driver shut down");
    }

    /// Poll and dispatch one tick at an explicit instant.
    ///
    /// Exposed so hosts and tests can drive ticks deterministically without
    /// the interval timer.
    pub async fn run_tick(&self, now_ms: u128) {
        for task in self.handle.poll_due(now_ms) {
            self.dispatch(task, now_ms).await;
        }
    }

    async fn dispatch(&self, task: Task<P>, now_ms: u128) {
        let Some(handler) = self.registry.get(&task.kind) else {
            tracing::warn!(id = %task.id, kind = %task.kind, "no handler registered, dropping task");
            return;
        };
        match handler.handle(&task).await {
            Ok(()) => {
                tracing::info!(id = %task.id, kind = %task.kind, "task completed");
            }
            Err(error) => {
                tracing::warn!(id = %task.id, kind = %task.kind, %error, "task failed");
                match task.retry_after(now_ms + u128::from(self.backoff_ms)) {
                    Some(retry) => {
                        tracing::info!(
                            id = %retry.id,
                            due_at_ms = retry.due_at_ms,
                            remaining = retry.retries_remaining,
                            "task rescheduled after failure"
                        );
                        self.handle.schedule(retry);
                    }
                    None => {
                        tracing::error!(id = %task.id, "retry budget exhausted, dropping task");
                    }
                }
            }
        }
    }
}
