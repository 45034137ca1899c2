//! Application and application upgrade descriptors.

use super::common::{
    ApplicationParameter, HealthState, HealthStateFilter, PagingOptions, ServerTimeout,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Description used to create an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationDescription {
    /// Full name, e.g. `fabric:/Shop`.
    pub name: String,
    pub type_name: String,
    pub type_version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter_list: Vec<ApplicationParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_capacity: Option<Value>,
}

impl ApplicationDescription {
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        type_version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            type_version: type_version.into(),
            parameter_list: Vec::new(),
            application_capacity: None,
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameter_list.push(ApplicationParameter::new(key, value));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ApplicationStatus {
    Invalid,
    Ready,
    Upgrading,
    Creating,
    Deleting,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

/// An application as reported by the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationInfo {
    pub id: String,
    pub name: String,
    pub type_name: String,
    pub type_version: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub parameters: Vec<ApplicationParameter>,
    #[serde(default)]
    pub health_state: HealthState,
    #[serde(default)]
    pub application_definition_kind: Option<String>,
}

/// Load metrics of an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationLoadInfo {
    pub id: String,
    #[serde(default)]
    pub minimum_nodes: i64,
    #[serde(default)]
    pub maximum_nodes: i64,
    #[serde(default)]
    pub node_count: i64,
    #[serde(default)]
    pub application_load_metric_information: Vec<Value>,
}

/// Health of an application and its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationHealth {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub aggregated_health_state: HealthState,
    #[serde(default)]
    pub health_events: Vec<Value>,
    #[serde(default)]
    pub unhealthy_evaluations: Vec<Value>,
    #[serde(default)]
    pub service_health_states: Vec<Value>,
    #[serde(default)]
    pub deployed_application_health_states: Vec<Value>,
}

/// Filters for application list queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationListQuery {
    /// Bit mask over application definition kinds; 0 selects all.
    pub definition_kind_filter: u32,
    pub application_type_name: Option<String>,
    pub exclude_application_parameters: bool,
    pub paging: PagingOptions,
}

/// Filters for application health queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationHealthQuery {
    pub events_health_state_filter: HealthStateFilter,
    pub services_health_state_filter: HealthStateFilter,
    pub deployed_applications_health_state_filter: HealthStateFilter,
    pub exclude_health_statistics: bool,
    pub server_timeout: ServerTimeout,
}

/// Parameters to start an application upgrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationUpgradeDescription {
    pub name: String,
    pub target_application_type_version: String,
    #[serde(default)]
    pub parameters: Vec<ApplicationParameter>,
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

impl ApplicationUpgradeDescription {
    /// Rolling upgrade in the cluster's default monitoring mode.
    pub fn rolling(name: impl Into<String>, target_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_application_type_version: target_version.into(),
            parameters: Vec::new(),
            upgrade_kind: "Rolling".to_string(),
            rolling_upgrade_mode: Some("UnmonitoredAuto".to_string()),
            upgrade_replica_set_check_timeout_secs: None,
            force_restart: None,
            monitoring_policy: None,
            application_health_policy: None,
        }
    }
}

/// Progress of an application upgrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationUpgradeProgressInfo {
    pub name: String,
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub target_application_type_version: Option<String>,
    #[serde(default)]
    pub upgrade_state: Option<String>,
    #[serde(default)]
    pub next_upgrade_domain: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}
