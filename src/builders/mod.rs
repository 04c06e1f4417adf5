//! Builders to construct schedulers and drivers from configuration.

pub mod scheduler_builder;

pub use scheduler_builder::{build_handle, build_scheduler, build_store};

#[cfg(feature = "tokio-runtime")]
pub use scheduler_builder::build_driver;
