//! Service type descriptors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A service type declared by an application type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceTypeInfo {
    /// Kind-specific description (stateful or stateless), passed through.
    pub service_type_description: Value,
    #[serde(default)]
    pub service_manifest_name: Option<String>,
    #[serde(default)]
    pub service_manifest_version: Option<String>,
    #[serde(default)]
    pub is_service_group: bool,
}

impl ServiceTypeInfo {
    pub fn service_type_name(&self) -> Option<&str> {
        self.service_type_description
            .get("ServiceTypeName")
            .and_then(|v| v.as_str())
    }
}

/// A service type registered on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeployedServiceTypeInfo {
    pub service_type_name: String,
    #[serde(default)]
    pub service_manifest_name: Option<String>,
    #[serde(default)]
    pub code_package_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub service_package_activation_id: Option<String>,
}
