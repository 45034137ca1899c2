//! Deployed code package descriptors.

use super::common::ServerTimeout;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A code package deployed on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeployedCodePackageInfo {
    pub name: String,
    #[serde(default)]
    pub code_package_version: Option<String>,
    #[serde(default)]
    pub service_manifest_name: Option<String>,
    #[serde(default)]
    pub service_package_activation_id: Option<String>,
    #[serde(default)]
    pub host_type: Option<String>,
    #[serde(default)]
    pub host_isolation_mode: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub run_frequency_interval: Option<String>,
    #[serde(default)]
    pub setup_entry_point: Option<Value>,
    #[serde(default)]
    pub main_entry_point: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployedCodePackageQuery {
    pub service_manifest_name: Option<String>,
    pub code_package_name: Option<String>,
    pub server_timeout: ServerTimeout,
}

/// Identifies the code package instance to restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RestartDeployedCodePackageDescription {
    pub service_manifest_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_package_activation_id: Option<String>,
    pub code_package_name: String,
    /// Instance id from the deployed code package info; "0" restarts
    /// whichever instance is running.
    pub code_package_instance_id: String,
}

/// Container log text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerLogs {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerLogsQuery {
    pub service_manifest_name: String,
    pub code_package_name: String,
    /// Number of lines from the end; `None` returns the whole log.
    pub tail: Option<u64>,
    /// Read logs of the previous container instance.
    pub previous: bool,
    pub server_timeout: ServerTimeout,
}

impl ContainerLogsQuery {
    pub fn new(
        service_manifest_name: impl Into<String>,
        code_package_name: impl Into<String>,
    ) -> Self {
        Self {
            service_manifest_name: service_manifest_name.into(),
            code_package_name: code_package_name.into(),
            tail: None,
            previous: false,
            server_timeout: ServerTimeout::default(),
        }
    }

    pub fn with_tail(mut self, lines: u64) -> Self {
        self.tail = Some(lines);
        self
    }
}
