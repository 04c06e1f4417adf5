//! Construct scheduler components from validated configuration.

use crate::config::{OrderingPolicyConfig, SchedulerConfig, SnapshotBackendConfig};
use crate::core::{
    AnyScheduler, DueTimeScheduler, SchedulerError, StarvationAwareScheduler, Task, TaskPayload,
};
use crate::infra::store::{InMemoryStore, JsonFileStore, SnapshotStore};
use crate::runtime::SchedulerHandle;

#[cfg(feature = "tokio-runtime")]
use std::time::Duration;

#[cfg(feature = "tokio-runtime")]
use crate::runtime::{Driver, HandlerRegistry};

/// Build an empty scheduler for the configured ordering policy.
///
/// # Errors
///
/// [`SchedulerError::InvalidConfig`] when validation fails.
pub fn build_scheduler<P>(cfg: &SchedulerConfig) -> Result<AnyScheduler<P>, SchedulerError> {
    cfg.validate().map_err(SchedulerError::InvalidConfig)?;
    Ok(scheduler_with_tasks(&cfg.policy, Vec::new()))
}

/// Build the configured snapshot store, if any.
///
/// # Errors
///
/// [`SchedulerError::InvalidConfig`] when validation fails.
pub fn build_store<P>(
    cfg: &SchedulerConfig,
) -> Result<Option<Box<dyn SnapshotStore<P>>>, SchedulerError>
where
    P: TaskPayload + Clone,
{
    cfg.validate().map_err(SchedulerError::InvalidConfig)?;
    Ok(match &cfg.snapshot {
        None => None,
        Some(SnapshotBackendConfig::InMemory) => Some(Box::new(InMemoryStore::new())),
        Some(SnapshotBackendConfig::JsonFile { path }) => {
            Some(Box::new(JsonFileStore::new(path.clone())))
        }
    })
}

/// Build a thread-safe handle, rehydrated from the configured snapshot store
/// when one is present.
///
/// Hosts that keep persisting snapshots should call [`build_store`] themselves
/// and pair it with this handle.
///
/// # Errors
///
/// [`SchedulerError::InvalidConfig`] on validation failure, or the store's
/// error when a configured snapshot cannot be loaded.
pub fn build_handle<P>(cfg: &SchedulerConfig) -> Result<SchedulerHandle<P>, SchedulerError>
where
    P: TaskPayload + Clone,
{
    let tasks = match build_store::<P>(cfg)? {
        Some(store) => {
            let tasks = store.load()?;
            if !tasks.is_empty() {
                tracing::info!(count = tasks.len(), "rehydrated scheduler from snapshot");
            }
            tasks
        }
        None => Vec::new(),
    };
    let scheduler = scheduler_with_tasks(&cfg.policy, tasks);
    Ok(SchedulerHandle::new(scheduler).with_default_retries(cfg.driver.retry.max_retries))
}

/// Build the execution driver: handle, registry, tick loop settings.
///
/// # Errors
///
/// Propagates [`build_handle`] failures.
#[cfg(feature = "tokio-runtime")]
pub fn build_driver<P>(
    cfg: &SchedulerConfig,
    registry: HandlerRegistry<P>,
) -> Result<Driver<P>, SchedulerError>
where
    P: TaskPayload + Clone,
{
    let handle = build_handle::<P>(cfg)?;
    Ok(Driver::new(
        handle,
        registry,
        Duration::from_millis(cfg.driver.tick_interval_ms),
        cfg.driver.retry.backoff_ms,
    ))
}

fn scheduler_with_tasks<P>(policy: &OrderingPolicyConfig, tasks: Vec<Task<P>>) -> AnyScheduler<P> {
    match policy {
        OrderingPolicyConfig::DueTime => AnyScheduler::DueTime(DueTimeScheduler::with_tasks(tasks)),
        OrderingPolicyConfig::StarvationAware => {
            AnyScheduler::StarvationAware(StarvationAwareScheduler::with_tasks(tasks))
        }
    }
}
