//! Task submission surface.
//!
//! Required-field validation happens here, before a task reaches the core;
//! the core assumes well-formed input and performs no defensive checks of its
//! own.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::{AnyScheduler, SchedulerError, Task, TaskId};
use crate::infra::store::SnapshotStore;
use crate::util::clock::now_ms;

/// Caller-provided submission payload.
///
/// `id` and `created_at_ms` are assigned at submission time when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "P: Serialize"))]
#[serde(bound(deserialize = "P: serde::de::DeserializeOwned"))]
pub struct TaskRequest<P> {
    /// Task identifier; generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    /// Earliest instant the task may run, ms since epoch.
    pub due_at_ms: u128,
    /// Static priority; higher is more urgent.
    pub priority: f64,
    /// Handler discriminator; must be non-empty.
    pub kind: String,
    /// Opaque payload.
    pub payload: P,
    /// Aging rate for the starvation-aware policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aging_factor: Option<f64>,
    /// Submission instant override; assigned when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at_ms: Option<u128>,
    /// Retry budget override; the handle's default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
}

impl<P> TaskRequest<P> {
    /// Validate and convert into a schedulable task.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::InvalidTask`] when `kind` is empty, `priority` is
    /// not finite, or `aging_factor` is negative or not finite.
    pub fn into_task(self, default_retries: u32) -> Result<Task<P>, SchedulerError> {
        if self.kind.is_empty() {
            return Err(SchedulerError::InvalidTask("kind must not be empty".into()));
        }
        if !self.priority.is_finite() {
            return Err(SchedulerError::InvalidTask(format!(
                "priority must be finite, got {}",
                self.priority
            )));
        }
        if let Some(factor) = self.aging_factor {
            if !factor.is_finite() || factor < 0.0 {
                return Err(SchedulerError::InvalidTask(format!(
                    "aging_factor must be finite and non-negative, got {factor}"
                )));
            }
        }
        Ok(Task {
            id: self.id.unwrap_or_else(TaskId::random),
            due_at_ms: self.due_at_ms,
            created_at_ms: self.created_at_ms.unwrap_or_else(now_ms),
            priority: self.priority,
            aging_factor: self.aging_factor,
            kind: self.kind,
            payload: self.payload,
            retries_remaining: self.retries.unwrap_or(default_retries),
        })
    }
}

/// Thread-safe handle around one scheduler instance.
///
/// The heap invariant is not safe under concurrent mutation, so multi-task
/// hosts go through this single mutex; no finer-grained locking is warranted
/// at this data size.
#[derive(Debug)]
pub struct SchedulerHandle<P> {
    inner: Arc<Mutex<AnyScheduler<P>>>,
    default_retries: u32,
}

impl<P> Clone for SchedulerHandle<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            default_retries: self.default_retries,
        }
    }
}

impl<P> SchedulerHandle<P> {
    /// Wrap a scheduler variant.
    pub fn new(scheduler: AnyScheduler<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(scheduler)),
            default_retries: 0,
        }
    }

    /// Set the retry budget granted to requests that do not bring their own.
    #[must_use]
    pub const fn with_default_retries(mut self, retries: u32) -> Self {
        self.default_retries = retries;
        self
    }

    /// Validate a request and schedule the resulting task.
    ///
    /// # Errors
    ///
    /// Propagates [`TaskRequest::into_task`] validation failures.
    pub fn submit(&self, request: TaskRequest<P>) -> Result<TaskId, SchedulerError> {
        let task = request.into_task(self.default_retries)?;
        let id = task.id.clone();
        tracing::info!(id = %id, kind = %task.kind, due_at_ms = task.due_at_ms, "task submitted");
        self.inner.lock().schedule(task);
        Ok(id)
    }

    /// Schedule an already-validated task (e.g. a retry resubmission).
    pub fn schedule(&self, task: Task<P>) {
        self.inner.lock().schedule(task);
    }

    /// Drain every task whose due time has arrived.
    pub fn poll_due(&self, now_ms: u128) -> Vec<Task<P>> {
        self.inner.lock().poll_due(now_ms)
    }

    /// Due time of the next task, or `None` when empty.
    #[must_use]
    pub fn next_eta(&self) -> Option<u128> {
        self.inner.lock().next_eta()
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether no tasks are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Defensive copy of the queue in raw heap order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task<P>>
    where
        P: Clone,
    {
        self.inner.lock().snapshot()
    }

    /// Copy of the queue sorted by the active policy anchored at `now_ms`.
    #[must_use]
    pub fn all_tasks(&self, now_ms: u128) -> Vec<Task<P>>
    where
        P: Clone,
    {
        self.inner.lock().all_tasks(now_ms)
    }

    /// Persist the current queue to a snapshot store.
    ///
    /// # Errors
    ///
    /// Propagates the store's failure; the queue itself is unaffected.
    pub fn persist_to(&self, store: &mut dyn SnapshotStore<P>) -> Result<(), SchedulerError>
    where
        P: Clone,
    {
        store.persist(&self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DueTimeScheduler;

    fn handle() -> SchedulerHandle<String> {
        SchedulerHandle::new(AnyScheduler::DueTime(DueTimeScheduler::new()))
    }

    fn request(kind: &str, priority: f64) -> TaskRequest<String> {
        TaskRequest {
            id: None,
            due_at_ms: 1_000,
            priority,
            kind: kind.to_owned(),
            payload: "p".to_owned(),
            aging_factor: None,
            created_at_ms: None,
            retries: None,
        }
    }

    #[test]
    fn test_submit_assigns_id_and_created_at() {
        let handle = handle();
        let id = handle.submit(request("email", 1.0)).expect("valid");
        assert!(!id.as_str().is_empty());

        let tasks = handle.snapshot();
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].created_at_ms > 0);
    }

    #[test]
    fn test_submit_rejects_empty_kind() {
        let err = handle().submit(request("", 1.0)).expect_err("invalid");
        assert!(matches!(err, SchedulerError::InvalidTask(_)));
    }

    #[test]
    fn test_submit_rejects_non_finite_priority() {
        let err = handle()
            .submit(request("email", f64::NAN))
            .expect_err("invalid");
        assert!(matches!(err, SchedulerError::InvalidTask(_)));
    }

    #[test]
    fn test_submit_rejects_negative_aging_factor() {
        let mut req = request("email", 1.0);
        req.aging_factor = Some(-0.5);
        let err = handle().submit(req).expect_err("invalid");
        assert!(matches!(err, SchedulerError::InvalidTask(_)));
    }

    #[test]
    fn test_default_retries_apply_when_absent() {
        let handle = handle().with_default_retries(4);
        handle.submit(request("email", 1.0)).expect("valid");

        let mut req = request("sync", 1.0);
        req.retries = Some(1);
        handle.submit(req).expect("valid");

        let budgets: Vec<u32> = handle
            .snapshot()
            .iter()
            .map(|t| t.retries_remaining)
            .collect();
        assert!(budgets.contains(&4));
        assert!(budgets.contains(&1));
    }

    #[test]
    fn test_handle_round_trip_poll() {
        let handle = handle();
        let mut req = request("email", 1.0);
        req.due_at_ms = 500;
        handle.submit(req).expect("valid");
        assert_eq!(handle.next_eta(), Some(500));
        assert_eq!(handle.poll_due(500).len(), 1);
        assert!(handle.is_empty());
    }
}
