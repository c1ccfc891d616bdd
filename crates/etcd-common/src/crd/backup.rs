//! Backup policy embedded in an Etcd spec

use serde::{Deserialize, Serialize};

/// Backup policy parameters for an etcd cluster
///
/// A plain value type: cloning it field by field is already a full deep copy.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// Whether periodic backups are taken
    #[serde(default)]
    pub enabled: bool,

    /// Cron schedule for backups (e.g., "0 * * * *" for hourly)
    #[serde(default)]
    pub schedule: String,

    /// Number of backups to keep; 0 keeps all of them
    #[serde(default)]
    pub max_backups: u32,
}

impl Backup {
    /// Create an enabled backup policy on the given schedule
    pub fn scheduled(schedule: impl Into<String>) -> Self {
        Self {
            enabled: true,
            schedule: schedule.into(),
            max_backups: 0,
        }
    }
}
