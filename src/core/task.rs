//! Task model: the unit of schedulable work.

use serde::{Deserialize, Serialize};

use crate::util::clock::now_ms;

/// Opaque task identifier.
///
/// Caller-supplied; the core does not validate uniqueness. Duplicate ids are
/// scheduled independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Create an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a random v4 identifier for callers that do not bring their own.
    #[must_use]
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Marker trait for serializable task payloads.
///
/// Payloads must be `Send + Sync` for cross-thread dispatch and serializable
/// for snapshot persistence.
pub trait TaskPayload: Send + Sync + Serialize + for<'de> Deserialize<'de> + 'static {}

/// Blanket implementation: any type meeting the requirements is a `TaskPayload`.
impl<T> TaskPayload for T where T: Send + Sync + Serialize + for<'de> Deserialize<'de> + 'static {}

/// A unit of schedulable work.
///
/// The core never mutates a task in place. Rescheduling (e.g. retry after a
/// failed execution) derives a new value via [`Task::retry_after`] and
/// resubmits it, so a task still referenced elsewhere keeps its original
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "P: Serialize"))]
#[serde(bound(deserialize = "P: serde::de::DeserializeOwned"))]
pub struct Task<P> {
    /// Unique task identifier.
    pub id: TaskId,
    /// Earliest instant the task is eligible to run, ms since epoch.
    pub due_at_ms: u128,
    /// Submission instant, ms since epoch. Read only by the aging policy.
    pub created_at_ms: u128,
    /// Static priority; higher is more urgent.
    pub priority: f64,
    /// Aging rate in priority units per waited millisecond. `None` or zero
    /// means the task never gains effective priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aging_factor: Option<f64>,
    /// Caller-defined discriminator (e.g. "email", "retry", "sync"); opaque
    /// to the core, keys handler dispatch in the execution driver.
    pub kind: String,
    /// Opaque caller data, untouched by the core.
    pub payload: P,
    /// Remaining retry budget, consumed by the execution driver. The core
    /// never reads it.
    #[serde(default)]
    pub retries_remaining: u32,
}

impl<P> Task<P> {
    /// Create a task due at `due_at_ms`, created now, with no aging boost and
    /// no retry budget.
    pub fn new(
        id: impl Into<TaskId>,
        due_at_ms: u128,
        priority: f64,
        kind: impl Into<String>,
        payload: P,
    ) -> Self {
        Self {
            id: id.into(),
            due_at_ms,
            created_at_ms: now_ms(),
            priority,
            aging_factor: None,
            kind: kind.into(),
            payload,
            retries_remaining: 0,
        }
    }

    /// Override the submission instant.
    #[must_use]
    pub const fn with_created_at(mut self, created_at_ms: u128) -> Self {
        self.created_at_ms = created_at_ms;
        self
    }

    /// Attach an aging rate for the starvation-aware policy.
    #[must_use]
    pub const fn with_aging_factor(mut self, aging_factor: f64) -> Self {
        self.aging_factor = Some(aging_factor);
        self
    }

    /// Grant a retry budget for the execution driver.
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries_remaining = retries;
        self
    }

    /// Priority adjusted for waiting time: `priority + elapsed * aging_factor`.
    ///
    /// Elapsed time saturates at zero, so a task whose `created_at_ms` lies in
    /// the future ages as if it had just been created.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn effective_score(&self, now_ms: u128) -> f64 {
        let factor = self.aging_factor.unwrap_or(0.0);
        let elapsed = now_ms.saturating_sub(self.created_at_ms) as f64;
        self.priority + elapsed * factor
    }
}

impl<P: Clone> Task<P> {
    /// Derive a resubmittable copy with a new due time and one fewer retry,
    /// or `None` when the budget is exhausted.
    #[must_use]
    pub fn retry_after(&self, due_at_ms: u128) -> Option<Self> {
        let remaining = self.retries_remaining.checked_sub(1)?;
        let mut next = self.clone();
        next.due_at_ms = due_at_ms;
        next.retries_remaining = remaining;
        Some(next)
    }
}
