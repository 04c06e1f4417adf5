//! Task-centric scheduling API over the comparator heap.

use crate::core::compare::{AgingOrder, DueTimeOrder, TimeAnchored};
use crate::core::heap::{BinaryHeap, Compare};
use crate::core::task::Task;

/// A scheduler owning one heap of tasks with a fixed ordering policy.
///
/// The comparator is set at construction and never changes. The scheduler
/// does not own a task's lifecycle beyond queue membership: once extracted by
/// [`Scheduler::poll_due`], a task is the caller's responsibility, including
/// any resubmission.
#[derive(Debug)]
pub struct Scheduler<P, C> {
    heap: BinaryHeap<Task<P>, C>,
}

/// Scheduler ordered by due time with static priority tie-breaks.
pub type DueTimeScheduler<P> = Scheduler<P, DueTimeOrder>;

/// Scheduler whose equal-due ties age: long-waiting low-priority tasks gain
/// effective priority and eventually overtake static high-priority ones.
pub type StarvationAwareScheduler<P> = Scheduler<P, AgingOrder>;

impl<P, C> Scheduler<P, C>
where
    C: Compare<Task<P>> + TimeAnchored,
{
    /// Create an empty scheduler with an explicit ordering policy.
    pub const fn with_comparator(cmp: C) -> Self {
        Self {
            heap: BinaryHeap::new(cmp),
        }
    }

    /// Rebuild a scheduler from persisted tasks via one O(n) heapify pass.
    pub fn from_tasks(cmp: C, tasks: Vec<Task<P>>) -> Self {
        Self {
            heap: BinaryHeap::from_vec(cmp, tasks),
        }
    }

    /// Insert a task. A `due_at_ms` in the past is legal: the task becomes
    /// immediately pollable. Never fails.
    pub fn schedule(&mut self, task: Task<P>) {
        tracing::debug!(id = %task.id, due_at_ms = task.due_at_ms, "task scheduled");
        self.heap.insert(task);
    }

    /// Drain every task whose due time has arrived.
    ///
    /// Anchors the ordering policy at `now_ms`, then extracts while the heap
    /// root's `due_at_ms <= now_ms`. The result is in extraction order: due
    /// time ascending, priority (or effective score) descending on ties. An
    /// empty scheduler yields an empty vec, never an error.
    pub fn poll_due(&mut self, now_ms: u128) -> Vec<Task<P>> {
        self.heap.comparator().set_now(now_ms);
        let mut due = Vec::new();
        while self
            .heap
            .peek()
            .is_some_and(|task| task.due_at_ms <= now_ms)
        {
            if let Some(task) = self.heap.extract() {
                due.push(task);
            }
        }
        if !due.is_empty() {
            tracing::debug!(count = due.len(), now_ms, "released due tasks");
        }
        due
    }

    /// The next task to come due, without removal.
    #[must_use]
    pub fn peek(&self) -> Option<&Task<P>> {
        self.heap.peek()
    }

    /// Due time of the next task, or `None` when empty.
    #[must_use]
    pub fn next_eta(&self) -> Option<u128> {
        self.heap.peek().map(|task| task.due_at_ms)
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no tasks are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Defensive copy of the queue in raw heap order.
    ///
    /// Heap order is not a total order; use this for persistence snapshots
    /// and [`Scheduler::all_tasks`] for inspection.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task<P>>
    where
        P: Clone,
    {
        self.heap.to_vec()
    }

    /// Copy of the queue sorted by the active policy anchored at `now_ms`.
    ///
    /// Both scheduler variants sort here: heap order reflects the intended
    /// total order only at the root, so inspection callers get the comparator
    /// order instead.
    #[must_use]
    pub fn all_tasks(&self, now_ms: u128) -> Vec<Task<P>>
    where
        P: Clone,
    {
        let cmp = self.heap.comparator();
        cmp.set_now(now_ms);
        let mut tasks = self.heap.to_vec();
        tasks.sort_by(|a, b| cmp.compare(a, b));
        tasks
    }
}

impl<P> Scheduler<P, DueTimeOrder> {
    /// Create an empty due-time scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(DueTimeOrder)
    }

    /// Rebuild a due-time scheduler from persisted tasks.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task<P>>) -> Self {
        Self::from_tasks(DueTimeOrder, tasks)
    }
}

impl<P> Default for Scheduler<P, DueTimeOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Scheduler<P, AgingOrder> {
    /// Create an empty starvation-aware scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(AgingOrder::new())
    }

    /// Rebuild a starvation-aware scheduler from persisted tasks.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task<P>>) -> Self {
        Self::from_tasks(AgingOrder::new(), tasks)
    }
}

impl<P> Default for Scheduler<P, AgingOrder> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runtime-selected scheduler variant, for config-driven construction.
#[derive(Debug)]
pub enum AnyScheduler<P> {
    /// Plain due-time ordering.
    DueTime(DueTimeScheduler<P>),
    /// Starvation-aware aging ordering.
    StarvationAware(StarvationAwareScheduler<P>),
}

impl<P> AnyScheduler<P> {
    /// Insert a task into the active variant.
    pub fn schedule(&mut self, task: Task<P>) {
        match self {
            Self::DueTime(s) => s.schedule(task),
            Self::StarvationAware(s) => s.schedule(task),
        }
    }

    /// Drain every task whose due time has arrived.
    pub fn poll_due(&mut self, now_ms: u128) -> Vec<Task<P>> {
        match self {
            Self::DueTime(s) => s.poll_due(now_ms),
            Self::StarvationAware(s) => s.poll_due(now_ms),
        }
    }

    /// Due time of the next task, or `None` when empty.
    #[must_use]
    pub fn next_eta(&self) -> Option<u128> {
        match self {
            Self::DueTime(s) => s.next_eta(),
            Self::StarvationAware(s) => s.next_eta(),
        }
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::DueTime(s) => s.len(),
            Self::StarvationAware(s) => s.len(),
        }
    }

    /// Whether no tasks are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::DueTime(s) => s.is_empty(),
            Self::StarvationAware(s) => s.is_empty(),
        }
    }

    /// Defensive copy of the queue in raw heap order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task<P>>
    where
        P: Clone,
    {
        match self {
            Self::DueTime(s) => s.snapshot(),
            Self::StarvationAware(s) => s.snapshot(),
        }
    }

    /// Copy of the queue sorted by the active policy anchored at `now_ms`.
    #[must_use]
    pub fn all_tasks(&self, now_ms: u128) -> Vec<Task<P>>
    where
        P: Clone,
    {
        match self {
            Self::DueTime(s) => s.all_tasks(now_ms),
            Self::StarvationAware(s) => s.all_tasks(now_ms),
        }
    }
}
