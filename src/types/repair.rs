//! Repair task descriptors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RepairTaskState {
    Invalid,
    Created,
    Claimed,
    Preparing,
    Approved,
    Executing,
    Restoring,
    Completed,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A repair task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepairTask {
    pub task_id: String,
    /// Optimistic concurrency version; "0" or absent skips the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub state: RepairTaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<i32>,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perform_preparing_health_check: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perform_restoring_health_check: Option<bool>,
}

impl RepairTask {
    /// New task in the `Created` state targeting the given nodes.
    pub fn for_nodes(
        task_id: impl Into<String>,
        action: impl Into<String>,
        nodes: &[&str],
    ) -> Self {
        Self {
            task_id: task_id.into(),
            version: None,
            description: None,
            state: RepairTaskState::Created,
            flags: None,
            action: action.into(),
            target: Some(serde_json::json!({ "Kind": "Node", "NodeNames": nodes })),
            executor: None,
            executor_data: None,
            impact: None,
            result_status: None,
            result_code: None,
            result_details: None,
            history: None,
            perform_preparing_health_check: None,
            perform_restoring_health_check: None,
        }
    }
}

/// New version of a repair task after a successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepairTaskUpdateInfo {
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepairTaskCancelDescription {
    pub task_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub request_abort: bool,
}

/// Identifies a task by id and expected version. Used by delete and
/// force-approve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepairTaskVersionedId {
    pub task_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepairTaskUpdateHealthPolicyDescription {
    pub task_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perform_preparing_health_check: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perform_restoring_health_check: Option<bool>,
}

/// Bit mask over repair task states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RepairTaskStateFilter(u32);

impl RepairTaskStateFilter {
    pub const DEFAULT: RepairTaskStateFilter = RepairTaskStateFilter(0);
    pub const CREATED: RepairTaskStateFilter = RepairTaskStateFilter(1);
    pub const CLAIMED: RepairTaskStateFilter = RepairTaskStateFilter(2);
    pub const PREPARING: RepairTaskStateFilter = RepairTaskStateFilter(4);
    pub const APPROVED: RepairTaskStateFilter = RepairTaskStateFilter(8);
    pub const EXECUTING: RepairTaskStateFilter = RepairTaskStateFilter(16);
    pub const RESTORING: RepairTaskStateFilter = RepairTaskStateFilter(32);
    pub const COMPLETED: RepairTaskStateFilter = RepairTaskStateFilter(64);
    pub const ACTIVE: RepairTaskStateFilter = RepairTaskStateFilter(63);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn union(self, other: RepairTaskStateFilter) -> Self {
        Self(self.0 | other.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairTaskQuery {
    /// Task id prefix.
    pub task_id_filter: Option<String>,
    pub state_filter: RepairTaskStateFilter,
    pub executor_filter: Option<String>,
}
