//! In-memory snapshot store for development and testing.

use crate::core::{SchedulerError, Task};

use super::SnapshotStore;

/// Stores the latest snapshot in process memory.
#[derive(Debug)]
pub struct InMemoryStore<P> {
    tasks: Vec<Task<P>>,
}

impl<P> InMemoryStore<P> {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<P> Default for InMemoryStore<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone> SnapshotStore<P> for InMemoryStore<P> {
    fn persist(&mut self, tasks: &[Task<P>]) -> Result<(), SchedulerError> {
        self.tasks = tasks.to_vec();
        Ok(())
    }

    fn load(&self) -> Result<Vec<Task<P>>, SchedulerError> {
        Ok(self.tasks.clone())
    }
}
