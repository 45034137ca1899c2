//! Compose deployment descriptors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Container registry credentials for a compose deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegistryCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_encrypted: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateComposeDeploymentDescription {
    pub deployment_name: String,
    pub compose_file_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_credential: Option<RegistryCredential>,
}

/// Status of a compose deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComposeDeploymentStatusInfo {
    pub name: String,
    #[serde(default)]
    pub application_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComposeDeploymentUpgradeDescription {
    pub deployment_name: String,
    pub compose_file_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_credential: Option<RegistryCredential>,
    pub upgrade_kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolling_upgrade_mode: Option<String>,
    #[serde(
        default,
        rename = "UpgradeReplicaSetCheckTimeoutInSeconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub upgrade_replica_set_check_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_restart: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitoring_policy: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_health_policy: Option<Value>,
}

impl ComposeDeploymentUpgradeDescription {
    pub fn rolling(
        deployment_name: impl Into<String>,
        compose_file_content: impl Into<String>,
    ) -> Self {
        Self {
            deployment_name: deployment_name.into(),
            compose_file_content: compose_file_content.into(),
            registry_credential: None,
            upgrade_kind: "Rolling".to_string(),
            rolling_upgrade_mode: Some("UnmonitoredAuto".to_string()),
            upgrade_replica_set_check_timeout_secs: None,
            force_restart: None,
            monitoring_policy: None,
            application_health_policy: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComposeDeploymentUpgradeProgressInfo {
    pub deployment_name: String,
    #[serde(default)]
    pub application_name: Option<String>,
    #[serde(default)]
    pub upgrade_state: Option<String>,
    #[serde(default)]
    pub upgrade_status_details: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}
