//! # Chronoqueue
//!
//! A priority-ordered, time-aware task scheduling engine.
//!
//! This library provides the queueing core for deferred work: tasks carry a
//! due time and a priority, wait in a binary heap, and are released by polling
//! once their due time has arrived. An alternate ordering policy raises the
//! effective priority of long-waiting low-priority tasks so that a steady
//! stream of urgent work can never starve the backlog.
//!
//! ## Core Problem Solved
//!
//! Deferred-work queues tend to fail in one of two ways:
//!
//! - **Starvation**: a low-priority task sits behind every freshly submitted
//!   high-priority task, forever
//! - **Ad-hoc ordering**: "sort on every poll" scales poorly and scatters the
//!   ordering contract across call sites instead of a single comparator
//!
//! Chronoqueue keeps the ordering contract in one place — a comparator
//! injected into a generic heap — and offers two policies out of the box:
//! plain due-time ordering and starvation-aware aging.
//!
//! ## Key Features
//!
//! - **Comparator-parameterized heap**: O(log n) insert/extract, O(1) peek,
//!   O(n) rehydration from a snapshot
//! - **Due-time polling**: `poll_due(now)` drains exactly the tasks whose due
//!   time has elapsed, in comparator order
//! - **Starvation avoidance**: effective priority grows with waiting time at
//!   a caller-chosen rate per task
//! - **Pluggable persistence**: snapshot/rehydrate through a store trait with
//!   in-memory and JSON file backends
//! - **Execution driver**: a tokio tick loop dispatching due tasks to
//!   kind-keyed handlers with bounded retry
//!
//! ## Scheduling
//!
//! ```rust,ignore
//! use chronoqueue::core::{DueTimeScheduler, Task};
//!
//! let mut scheduler: DueTimeScheduler<String> = DueTimeScheduler::new();
//! scheduler.schedule(Task::new("invoice-42", 1_000, 5.0, "email", "body".into()));
//!
//! // Nothing is due yet at t=500.
//! assert!(scheduler.poll_due(500).is_empty());
//!
//! // At t=1000 the task is released.
//! let due = scheduler.poll_due(1_000);
//! assert_eq!(due.len(), 1);
//! ```
//!
//! ## Driving execution
//!
//! ```rust,ignore
//! use chronoqueue::builders::build_driver;
//! use chronoqueue::config::SchedulerConfig;
//!
//! let cfg = SchedulerConfig::from_json_str(r#"{
//!     "policy": "starvation_aware",
//!     "driver": { "tick_interval_ms": 250, "retry": { "max_retries": 3, "backoff_ms": 5000 } },
//!     "snapshot": { "backend": "json_file", "path": "tasks.json" }
//! }"#)?;
//!
//! let driver = build_driver(&cfg, registry)?;
//! driver.run().await;
//! ```
//!
//! For complete examples, see:
//! - `tests/scheduling_test.rs` - Core scheduling scenarios
//! - `tests/driver_test.rs` - Execution driver with retry

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling engine: heap, ordering policies, task model, schedulers.
pub mod core;
/// Configuration models for ordering policy, driver, and snapshot backends.
pub mod config;
/// Builders to construct schedulers and drivers from configuration.
pub mod builders;
/// Infrastructure adapters for snapshot persistence backends.
pub mod infra;
/// Runtime surface: task submission API and the execution driver.
pub mod runtime;
/// Shared utilities.
pub mod util;
