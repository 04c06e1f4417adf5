//! Runtime surface: task submission API and the execution driver.

pub mod api;
#[cfg(feature = "tokio-runtime")]
pub mod driver;

pub use api::{SchedulerHandle, TaskRequest};
#[cfg(feature = "tokio-runtime")]
pub use driver::{Driver, HandlerRegistry, TaskHandler};
