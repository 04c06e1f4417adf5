//! Scheduler, driver, and snapshot configuration structures.

use serde::{Deserialize, Serialize};

/// Ordering policy selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicyConfig {
    /// Due time ascending, static priority on ties.
    DueTime,
    /// Due time ascending, aged effective priority on ties.
    StarvationAware,
}

/// Snapshot backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "backend")]
pub enum SnapshotBackendConfig {
    /// In-memory snapshots for development/testing.
    InMemory,
    /// JSON file snapshots.
    JsonFile {
        /// Snapshot file location.
        path: String,
    },
}

/// Retry behavior for failed task executions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Default retry budget granted to submitted tasks.
    pub max_retries: u32,
    /// Fixed delay before a failed task comes due again.
    pub backoff_ms: u64,
}

/// Execution driver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Interval between due-task polls.
    pub tick_interval_ms: u64,
    /// Retry behavior.
    pub retry: RetryConfig,
}

/// Root scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Ordering policy for the task queue.
    pub policy: OrderingPolicyConfig,
    /// Execution driver settings.
    pub driver: DriverConfig,
    /// Snapshot backend; `None` disables persistence.
    #[serde(default)]
    pub snapshot: Option<SnapshotBackendConfig>,
}

impl RetryConfig {
    /// Validate retry values.
    pub fn validate(&self) -> Result<(), String> {
        if self.backoff_ms == 0 {
            return Err("backoff_ms must be greater than 0".into());
        }
        Ok(())
    }
}

impl DriverConfig {
    /// Validate driver values.
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be greater than 0".into());
        }
        self.retry.validate()
    }
}

impl SchedulerConfig {
    /// Validate the whole configuration tree.
    pub fn validate(&self) -> Result<(), String> {
        self.driver
            .validate()
            .map_err(|e| format!("driver invalid: {e}"))?;
        if let Some(SnapshotBackendConfig::JsonFile { path }) = &self.snapshot {
            if path.is_empty() {
                return Err("snapshot path must not be empty".into());
            }
        }
        Ok(())
    }

    /// Parse scheduler configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the file named by `CHRONOQUEUE_CONFIG`,
    /// consulting `.env` first.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        let path = std::env::var("CHRONOQUEUE_CONFIG")
            .map_err(|_| "CHRONOQUEUE_CONFIG is not set".to_owned())?;
        let input =
            std::fs::read_to_string(&path).map_err(|e| format!("read config {path}: {e}"))?;
        Self::from_json_str(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> SchedulerConfig {
        SchedulerConfig {
            policy: OrderingPolicyConfig::DueTime,
            driver: DriverConfig {
                tick_interval_ms: 250,
                retry: RetryConfig {
                    max_retries: 3,
                    backoff_ms: 5_000,
                },
            },
            snapshot: None,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        let mut cfg = valid();
        cfg.driver.tick_interval_ms = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_backoff_rejected() {
        let mut cfg = valid();
        cfg.driver.retry.backoff_ms = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_empty_snapshot_path_rejected() {
        let mut cfg = valid();
        cfg.snapshot = Some(SnapshotBackendConfig::JsonFile {
            path: String::new(),
        });
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_from_json_str() {
        let cfg = SchedulerConfig::from_json_str(
            r#"{
                "policy": "starvation_aware",
                "driver": { "tick_interval_ms": 250, "retry": { "max_retries": 3, "backoff_ms": 5000 } },
                "snapshot": { "backend": "json_file", "path": "tasks.json" }
            }"#,
        )
        .expect("valid config");
        assert!(matches!(cfg.policy, OrderingPolicyConfig::StarvationAware));
        assert!(matches!(
            cfg.snapshot,
            Some(SnapshotBackendConfig::JsonFile { .. })
        ));
    }

    #[test]
    fn test_unknown_policy_is_a_parse_error() {
        let err = SchedulerConfig::from_json_str(
            r#"{
                "policy": "round_robin",
                "driver": { "tick_interval_ms": 250, "retry": { "max_retries": 0, "backoff_ms": 1000 } }
            }"#,
        )
        .expect_err("unknown policy");
        assert!(err.contains("parse error"));
    }
}
