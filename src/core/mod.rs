//! Core scheduling engine: heap, ordering policies, task model, schedulers.

pub mod compare;
pub mod error;
pub mod heap;
pub mod scheduler;
pub mod task;

pub use compare::{AgingOrder, DueTimeOrder, TimeAnchored};
pub use error::{AppResult, SchedulerError};
pub use heap::{BinaryHeap, Compare};
pub use scheduler::{AnyScheduler, DueTimeScheduler, Scheduler, StarvationAwareScheduler};
pub use task::{Task, TaskId, TaskPayload};
