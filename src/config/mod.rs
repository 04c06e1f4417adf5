//! Configuration models for ordering policy, driver, and snapshot backends.

pub mod scheduler;

pub use scheduler::{
    DriverConfig, OrderingPolicyConfig, RetryConfig, SchedulerConfig, SnapshotBackendConfig,
};
