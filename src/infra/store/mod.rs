//! Snapshot persistence for scheduler queues.
//!
//! Persistence is best-effort: hosts snapshot [`crate::core::Scheduler::snapshot`]
//! after mutations and rehydrate a new scheduler at startup by replaying the
//! stored tasks. The core itself has no awareness of any of this.

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::InMemoryStore;

use crate::core::{SchedulerError, Task};

/// Abstraction for snapshot backends.
pub trait SnapshotStore<P> {
    /// Replace the stored snapshot with `tasks`.
    fn persist(&mut self, tasks: &[Task<P>]) -> Result<(), SchedulerError>;
    /// Load the stored snapshot; an absent snapshot is an empty set.
    fn load(&self) -> Result<Vec<Task<P>>, SchedulerError>;
}
